//! Report exports: spreadsheet and Markdown document of a ranked candidate list.

pub mod excel;
pub mod handlers;
pub mod report;

use thiserror::Error;

pub use excel::generate_ranking_xlsx;
pub use report::generate_markdown_report;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("report formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Displayed score: blank when the analysis carried none.
pub(crate) fn score_cell(score: Option<crate::affinity::AffinityScore>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}
