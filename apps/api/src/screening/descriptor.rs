//! Job descriptor intake: uploaded text or generated from three recruiter answers.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::RECRUITER_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::screening::prompts::DESCRIPTOR_PROMPT_TEMPLATE;

/// The recruiter's answers used to draft a descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptorAnswers {
    /// Type of role sought.
    #[serde(default)]
    pub role: String,
    /// Technical knowledge or skills required.
    #[serde(default)]
    pub skills: String,
    /// Desirable human profile or prior experience.
    #[serde(default)]
    pub profile: String,
}

impl DescriptorAnswers {
    fn is_blank(&self) -> bool {
        [&self.role, &self.skills, &self.profile]
            .iter()
            .all(|a| a.trim().is_empty())
    }

    fn to_prompt(&self) -> String {
        DESCRIPTOR_PROMPT_TEMPLATE
            .replace("{role}", self.role.trim())
            .replace("{skills}", self.skills.trim())
            .replace("{profile}", self.profile.trim())
    }
}

/// Cleans an uploaded descriptor. Rejects text that is empty once trimmed.
pub fn normalize_descriptor(raw: &str) -> Result<String, AppError> {
    let text = raw.trim_start_matches('\u{feff}').trim();
    if text.is_empty() {
        return Err(AppError::Validation("descriptor cannot be empty".to_string()));
    }
    Ok(text.to_string())
}

/// Drafts a descriptor from the recruiter's answers.
pub async fn generate_descriptor(
    generator: &dyn TextGenerator,
    answers: &DescriptorAnswers,
) -> Result<String, AppError> {
    if answers.is_blank() {
        return Err(AppError::Validation(
            "at least one descriptor answer is required".to_string(),
        ));
    }

    let descriptor = generator
        .complete(&answers.to_prompt(), RECRUITER_SYSTEM)
        .await?;
    info!(chars = descriptor.len(), "Descriptor generated");

    normalize_descriptor(&descriptor)
}
