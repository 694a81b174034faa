//! PDF engine adapters
//!
//! Thin wrappers around `lopdf` for the two things this service does with
//! PDFs: assembling image pages and rewriting existing documents.

mod optimize;
mod writer;

pub use optimize::*;
pub use writer::*;

use crate::error::{AppError, Result};

/// How far into a file the `%PDF-` marker may appear
pub const PDF_HEADER_WINDOW: usize = 1024;

#[cfg(test)]
pub(crate) fn page_count(bytes: &[u8]) -> Result<usize> {
    let document = lopdf::Document::load_mem(bytes)?;
    Ok(document.get_pages().len())
}

/// Reject files with no `%PDF-` marker near the start
///
/// Readers accept leading junk such as a BOM or a stray line break before
/// the marker, so only the first [`PDF_HEADER_WINDOW`] bytes are searched.
pub(crate) fn ensure_pdf_header(bytes: &[u8]) -> Result<()> {
    let window = &bytes[..bytes.len().min(PDF_HEADER_WINDOW)];
    if !window.windows(5).any(|w| w == b"%PDF-") {
        return Err(AppError::BadRequest("file is not a PDF (missing %PDF- header)".to_string()));
    }
    Ok(())
}
