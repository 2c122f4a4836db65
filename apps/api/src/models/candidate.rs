use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::affinity::{Affinity, AffinityCategory, AffinityScore};

/// Outcome of analysing one résumé against the session descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: Uuid,
    pub file_name: String,
    pub analysis_text: String,
    pub category: AffinityCategory,
    /// `None` when the analysis carried no score; never conflated with 0.
    pub numeric_score: Option<AffinityScore>,
    pub favorite: bool,
    pub analyzed_at: DateTime<Utc>,
}

impl CandidateRecord {
    pub fn new(file_name: impl Into<String>, analysis_text: String, affinity: Affinity) -> Self {
        Self {
            candidate_id: Uuid::new_v4(),
            file_name: file_name.into(),
            analysis_text,
            category: affinity.category,
            numeric_score: affinity.numeric_score,
            favorite: false,
            analyzed_at: Utc::now(),
        }
    }
}

/// A résumé that could not be analysed. Reported next to the successes, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedCandidate {
    pub file_name: String,
    pub reason: String,
}
