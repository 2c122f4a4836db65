//! Axum route handler for stateless affinity extraction.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::affinity::{
    extract_category, extract_numeric_score, find_numeric_score, AffinityCategory, AffinityScore,
};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub category: AffinityCategory,
    pub label: &'static str,
    pub color: String,
    pub numeric_score: Option<AffinityScore>,
    /// `numeric_score` with absence shown as 0, for consumers of the plain numeric scale.
    pub score_or_zero: u8,
}

/// POST /api/v1/affinity/extract
///
/// Classifies a block of analysis text. Never fails on content: text without any
/// signal comes back as `Unclassified` with no score.
pub async fn handle_extract(Json(request): Json<ExtractRequest>) -> Json<ExtractResponse> {
    let category = extract_category(&request.text);
    Json(ExtractResponse {
        category,
        label: category.label(),
        color: format!("#{:06X}", category.color()),
        numeric_score: find_numeric_score(&request.text),
        score_or_zero: extract_numeric_score(&request.text),
    })
}
