//! Recruiter sessions: descriptor plus analysed candidates, owned by the store and
//! handed to handlers through `AppState`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::affinity::{rank, AffinityScale, RankBy};
use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub descriptor: Option<String>,
    pub scale: AffinityScale,
    pub candidates: Vec<CandidateRecord>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new(scale: AffinityScale) -> Self {
        Self {
            id: Uuid::new_v4(),
            descriptor: None,
            scale,
            candidates: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn candidate(&self, candidate_id: Uuid) -> Result<&CandidateRecord, AppError> {
        self.candidates
            .iter()
            .find(|c| c.candidate_id == candidate_id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
    }

    /// Candidates in upload order, optionally restricted to favorites.
    pub fn selection(&self, favorites_only: bool) -> Vec<CandidateRecord> {
        self.candidates
            .iter()
            .filter(|c| !favorites_only || c.favorite)
            .cloned()
            .collect()
    }
}

/// Which candidates to show and in what order. Shared by ranking and export routes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SelectionQuery {
    /// Defaults to the ordering that matches the session scale.
    pub by: Option<RankBy>,
    #[serde(default)]
    pub favorites_only: bool,
}

impl SelectionQuery {
    pub fn apply(&self, session: &Session) -> (RankBy, Vec<CandidateRecord>) {
        let by = self.by.unwrap_or_else(|| RankBy::from(session.scale));
        let mut records = session.selection(self.favorites_only);
        rank(&mut records, by);
        (by, records)
    }
}

/// In-memory session store. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, scale: AffinityScale) -> Session {
        let session = Session::new(scale);
        self.inner.write().await.insert(session.id, session.clone());
        info!(session_id = %session.id, ?scale, "Session created");
        session
    }

    /// Snapshot of the session.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.inner.write().await.remove(&id);
        removed.ok_or_else(|| not_found(id))?;
        info!(session_id = %id, "Session discarded");
        Ok(())
    }

    /// Replaces the descriptor. Previously analysed candidates are kept.
    pub async fn set_descriptor(&self, id: Uuid, descriptor: String) -> Result<Session, AppError> {
        self.update(id, |session| {
            session.descriptor = Some(descriptor);
            Ok(())
        })
        .await
    }

    pub async fn append_candidates(
        &self,
        id: Uuid,
        records: Vec<CandidateRecord>,
    ) -> Result<Session, AppError> {
        self.update(id, |session| {
            session.candidates.extend(records);
            Ok(())
        })
        .await
    }

    pub async fn set_favorite(
        &self,
        id: Uuid,
        candidate_id: Uuid,
        favorite: bool,
    ) -> Result<CandidateRecord, AppError> {
        let session = self
            .update(id, |session| {
                let record = session
                    .candidates
                    .iter_mut()
                    .find(|c| c.candidate_id == candidate_id)
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Candidate {candidate_id} not found"))
                    })?;
                record.favorite = favorite;
                Ok(())
            })
            .await?;
        session.candidate(candidate_id).cloned()
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> Result<Session, AppError>
    where
        F: FnOnce(&mut Session) -> Result<(), AppError>,
    {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        apply(session)?;
        Ok(session.clone())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
