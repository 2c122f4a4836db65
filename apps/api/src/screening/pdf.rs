//! PDF text extraction for uploaded résumés.

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not read PDF: {0}")]
    Extraction(String),

    #[error("PDF decoder crashed on this file")]
    DecoderPanic,

    #[error("PDF contains no extractable text (scanned image?)")]
    NoText,
}

/// Extracts the text layer of a PDF.
///
/// Runs on the blocking pool: decoding is CPU-bound and `pdf-extract` can panic on
/// malformed files, which surfaces here as `DecoderPanic` instead of tearing down the task.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, PdfError> {
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| PdfError::Extraction(e.to_string()))
    })
    .await
    .map_err(|_| PdfError::DecoderPanic)??;

    if text.trim().is_empty() {
        return Err(PdfError::NoText);
    }
    Ok(text)
}

/// True when the upload looks like a PDF by name or magic bytes.
pub fn looks_like_pdf(file_name: &str, data: &[u8]) -> bool {
    data.starts_with(b"%PDF") || file_name.to_ascii_lowercase().ends_with(".pdf")
}

/// One-page résumé with a plain text layer.
#[cfg(test)]
pub(crate) const SAMPLE_CV_PDF: &[u8] = include_bytes!("../../fixtures/cv_sample.pdf");
