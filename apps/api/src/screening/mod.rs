// Screening: descriptor intake, PDF text extraction and per-candidate analysis.
// All LLM calls go through the TextGenerator seam in llm_client.

pub mod analyzer;
pub mod descriptor;
pub mod handlers;
pub mod pdf;
pub mod prompts;
