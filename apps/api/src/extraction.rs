//! PDF text extraction — the upstream collaborator of the analysis pipeline.
//!
//! Extraction is CPU-bound; callers on the async runtime must wrap
//! [`extract_text`] in `tokio::task::spawn_blocking`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unreadable PDF: {0}")]
    Unreadable(String),

    #[error("No text found in PDF")]
    Empty,
}

/// Extracts the text layer from an in-memory PDF.
///
/// A PDF that parses but yields only whitespace (scanned images, empty
/// pages) is reported as [`ExtractionError::Empty`] — there is nothing to
/// analyze and the completion call must not be attempted.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }

    Ok(text)
}

/// Truncates to at most `max_chars` characters, on a char boundary.
///
/// Resume text is cut down before prompt construction to bound token spend;
/// the parser never truncates.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
