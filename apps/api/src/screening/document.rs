//! Document text extraction.
//!
//! Text-layer extraction only. Scanned/image-only PDFs yield empty or
//! near-empty text and that is NOT an error at this layer — the resume
//! parser diagnoses emptiness. `Unreadable` is reserved for structurally
//! corrupt input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unreadable document: {0}")]
    Unreadable(String),
}

/// Converts uploaded resume bytes into plain text.
///
/// PDFs go through `pdf-extract`, which concatenates per-page text in
/// document order. Anything else is treated as plain text and decoded
/// lossily, so a stray encoding never kills a file.
pub fn extract_text(bytes: &[u8], declared_type: &str) -> Result<String, DocumentError> {
    if is_pdf(bytes, declared_type) {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Unreadable(e.to_string()))
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

fn is_pdf(bytes: &[u8], declared_type: &str) -> bool {
    let declared = declared_type.to_ascii_lowercase();
    declared.contains("pdf") || bytes.starts_with(b"%PDF-")
}
