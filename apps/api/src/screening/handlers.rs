//! Axum route handlers for sessions, descriptors, candidate analysis and ranking.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::affinity::{category_distribution, AffinityCategory, AffinityScale, RankBy};
use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, FailedCandidate};
use crate::screening::analyzer::{analyze_batch, BatchOutcome, UploadedCv};
use crate::screening::descriptor::{generate_descriptor, normalize_descriptor, DescriptorAnswers};
use crate::screening::pdf::looks_like_pdf;
use crate::session::{SelectionQuery, Session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub scale: Option<AffinityScale>,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub scale: AffinityScale,
    pub descriptor: Option<String>,
    pub candidate_count: usize,
    pub favorite_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            scale: session.scale,
            descriptor: session.descriptor.clone(),
            candidate_count: session.candidates.len(),
            favorite_count: session.candidates.iter().filter(|c| c.favorite).count(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DescriptorUpload {
    pub descriptor: String,
}

#[derive(Debug, Serialize)]
pub struct DescriptorResponse {
    pub descriptor: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: AffinityCategory,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub ranked_by: RankBy,
    pub candidates: Vec<CandidateRecord>,
    pub distribution: Vec<CategoryCount>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteToggle {
    pub favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub left: Uuid,
    pub right: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub left: CandidateRecord,
    pub right: CandidateRecord,
    /// Candidate with the higher affinity (category first, then score). `None` on a tie.
    pub stronger: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    request: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, Json<SessionSummary>) {
    let Json(request) = request.unwrap_or_default();
    let scale = request.scale.unwrap_or(state.config.default_scale);
    let session = state.sessions.create(scale).await;
    (StatusCode::CREATED, Json(SessionSummary::from(&session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.get(session_id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/descriptor
///
/// Stores a descriptor the recruiter already has (uploaded text file contents).
pub async fn handle_put_descriptor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<DescriptorUpload>,
) -> Result<Json<SessionSummary>, AppError> {
    let descriptor = normalize_descriptor(&request.descriptor)?;
    let session = state.sessions.set_descriptor(session_id, descriptor).await?;
    info!(%session_id, "Descriptor uploaded");
    Ok(Json(SessionSummary::from(&session)))
}

/// POST /api/v1/sessions/:id/descriptor/generate
///
/// Drafts a descriptor from the recruiter's three answers and stores it.
pub async fn handle_generate_descriptor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(answers): Json<DescriptorAnswers>,
) -> Result<Json<DescriptorResponse>, AppError> {
    // Unknown session fails before the model is called.
    state.sessions.get(session_id).await?;

    let descriptor = generate_descriptor(state.llm.as_ref(), &answers).await?;
    state
        .sessions
        .set_descriptor(session_id, descriptor.clone())
        .await?;
    Ok(Json(DescriptorResponse { descriptor }))
}

/// POST /api/v1/sessions/:id/candidates
///
/// Multipart upload of one or more PDF résumés. Each file is analysed in turn;
/// files that cannot be read or analysed are listed under `failed`.
pub async fn handle_upload_candidates(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<BatchOutcome>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let descriptor = session.descriptor.ok_or_else(|| {
        AppError::Validation("load or generate a descriptor before uploading CVs".to_string())
    })?;

    let mut uploads = Vec::new();
    let mut rejected = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("{file_name}: {e}")))?;

        if looks_like_pdf(&file_name, &data) {
            uploads.push(UploadedCv { file_name, data });
        } else {
            rejected.push(FailedCandidate {
                file_name,
                reason: "only PDF files are accepted".to_string(),
            });
        }
    }

    if uploads.is_empty() && rejected.is_empty() {
        return Err(AppError::Validation("no files uploaded".to_string()));
    }

    info!(%session_id, files = uploads.len(), "Analysing uploaded CVs");
    let mut outcome = analyze_batch(state.llm.as_ref(), &descriptor, uploads, session.scale).await;
    rejected.append(&mut outcome.failed);
    outcome.failed = rejected;

    state
        .sessions
        .append_candidates(session_id, outcome.analyzed.clone())
        .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/sessions/:id/ranking
pub async fn handle_ranking(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<RankingResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let (ranked_by, candidates) = query.apply(&session);
    let distribution = category_distribution(&candidates)
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category,
            label: category.label(),
            count,
        })
        .collect();

    Ok(Json(RankingResponse {
        ranked_by,
        candidates,
        distribution,
    }))
}

/// PATCH /api/v1/sessions/:id/candidates/:candidate_id/favorite
pub async fn handle_set_favorite(
    State(state): State<AppState>,
    Path((session_id, candidate_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<FavoriteToggle>,
) -> Result<Json<CandidateRecord>, AppError> {
    let record = state
        .sessions
        .set_favorite(session_id, candidate_id, request.favorite)
        .await?;
    Ok(Json(record))
}

/// GET /api/v1/sessions/:id/compare?left=..&right=..
pub async fn handle_compare(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let left = session.candidate(query.left)?.clone();
    let right = session.candidate(query.right)?.clone();

    let stronger = match (left.category, left.numeric_score).cmp(&(right.category, right.numeric_score)) {
        std::cmp::Ordering::Greater => Some(left.candidate_id),
        std::cmp::Ordering::Less => Some(right.candidate_id),
        std::cmp::Ordering::Equal => None,
    };

    Ok(Json(CompareResponse {
        left,
        right,
        stronger,
    }))
}
