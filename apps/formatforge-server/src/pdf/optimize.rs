//! Structural PDF rewrite
//!
//! The document is loaded, stripped of unreachable objects and empty
//! streams, renumbered, deflated and written into a fresh buffer. Nothing
//! here re-encodes images; size savings come from the structure alone.

use lopdf::Document;

use crate::error::{AppError, Result};

/// Outcome of a rewrite
#[derive(Debug, Clone)]
pub struct RewrittenPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub pruned_objects: usize,
}

/// Rewrite `bytes` page tree and all through a fresh writer
///
/// Whether `bytes` is a PDF at all is left to the parser.
pub fn rewrite_pdf(bytes: &[u8]) -> Result<RewrittenPdf> {
    let mut doc = Document::load_mem(bytes)?;

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(AppError::BadRequest("PDF has no pages".to_string()));
    }

    let pruned = doc.prune_objects();
    let emptied = doc.delete_zero_length_streams();
    doc.renumber_objects();
    doc.compress();

    let mut output = Vec::with_capacity(bytes.len());
    doc.save_to(&mut output)?;

    tracing::debug!(
        "Rewrote PDF: {} page(s), pruned {} object(s), dropped {} empty stream(s), {} -> {} bytes",
        page_count,
        pruned.len(),
        emptied.len(),
        bytes.len(),
        output.len()
    );

    Ok(RewrittenPdf {
        bytes: output,
        page_count,
        pruned_objects: pruned.len() + emptied.len(),
    })
}
