//! Text extraction for uploaded resume PDFs.
//!
//! Pages are decoded in document order and concatenated without separators.
//! A decoder failure on any page aborts the whole extraction: callers get a
//! `DocumentParseError`, never partial text. Pages that decode to nothing
//! contribute an empty string.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum DocumentParseError {
    #[error("document is empty")]
    Empty,

    #[error("document is not a PDF")]
    NotPdf,

    #[error("failed to decode PDF: {0}")]
    Decode(String),

    #[error("PDF decoder aborted: {0}")]
    DecoderPanic(String),
}

/// Extracts the plain text of a PDF held in memory.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentParseError> {
    if bytes.is_empty() {
        return Err(DocumentParseError::Empty);
    }
    if !has_pdf_header(bytes) {
        return Err(DocumentParseError::NotPdf);
    }

    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| DocumentParseError::DecoderPanic(panic_message(payload.as_ref())))?
    .map_err(|e| DocumentParseError::Decode(e.to_string()))?;

    debug!("Extracted {} page(s) from {} byte PDF", pages.len(), bytes.len());

    Ok(pages.concat())
}

/// Runs [`extract_text`] on the blocking pool so the decoder never stalls the runtime.
pub async fn extract_text_async(bytes: bytes::Bytes) -> Result<String, DocumentParseError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| DocumentParseError::DecoderPanic(e.to_string()))?
}

/// PDF readers accept the header anywhere in the first 1024 bytes.
fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(1024)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown decoder panic".to_string()
    }
}
