//! Per-candidate analysis: prompt the model with descriptor + CV, then derive affinity.

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::affinity::{Affinity, AffinityScale};
use crate::errors::AppError;
use crate::llm_client::prompts::RECRUITER_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::candidate::{CandidateRecord, FailedCandidate};
use crate::screening::pdf::extract_pdf_text;
use crate::screening::prompts::{ANALYSIS_CATEGORICAL_TEMPLATE, ANALYSIS_NUMERIC_TEMPLATE};

/// One uploaded résumé, still undecoded.
#[derive(Debug, Clone)]
pub struct UploadedCv {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub analyzed: Vec<CandidateRecord>,
    pub failed: Vec<FailedCandidate>,
}

fn analysis_prompt(descriptor: &str, cv_text: &str, scale: AffinityScale) -> String {
    let template = match scale {
        AffinityScale::Numeric => ANALYSIS_NUMERIC_TEMPLATE,
        AffinityScale::Categorical => ANALYSIS_CATEGORICAL_TEMPLATE,
    };
    template
        .replace("{descriptor}", descriptor)
        .replace("{cv_text}", cv_text)
}

/// Analyses one CV against the descriptor and derives its affinity.
pub async fn analyze_candidate(
    generator: &dyn TextGenerator,
    descriptor: &str,
    file_name: &str,
    cv_text: &str,
    scale: AffinityScale,
) -> Result<CandidateRecord, AppError> {
    if cv_text.trim().is_empty() {
        return Err(AppError::Validation(format!("{file_name}: CV text is empty")));
    }

    let prompt = analysis_prompt(descriptor, cv_text.trim(), scale);
    let analysis = generator.complete(&prompt, RECRUITER_SYSTEM).await?;
    let affinity = Affinity::assess(&analysis, scale);

    let score = affinity.numeric_score.map(|s| s.value());
    info!(file_name, category = %affinity.category, ?score, "Candidate analysed");

    Ok(CandidateRecord::new(file_name, analysis, affinity))
}

/// Analyses uploads one after another. A file that fails (unreadable PDF, model
/// error) is recorded in `failed` and the batch moves on.
pub async fn analyze_batch(
    generator: &dyn TextGenerator,
    descriptor: &str,
    uploads: Vec<UploadedCv>,
    scale: AffinityScale,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for upload in uploads {
        let result = match extract_pdf_text(upload.data).await {
            Ok(text) => {
                analyze_candidate(generator, descriptor, &upload.file_name, &text, scale)
                    .await
                    .map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(record) => outcome.analyzed.push(record),
            Err(reason) => {
                warn!(file_name = %upload.file_name, %reason, "Candidate skipped");
                outcome.failed.push(FailedCandidate {
                    file_name: upload.file_name,
                    reason,
                });
            }
        }
    }

    outcome
}
