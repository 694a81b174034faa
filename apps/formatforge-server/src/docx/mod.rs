//! PDF to DOCX conversion
//!
//! The structural conversion itself is done by an external tool behind the
//! [`DocxConverter`] trait. This module owns the temporary files around it.

mod converter;
mod scratch;

pub use converter::*;
pub use scratch::*;

use std::path::Path;

use crate::error::{AppError, Result};
use crate::pdf::ensure_pdf_header;

/// Convert PDF bytes to DOCX bytes
///
/// Both temporary files live in one [`ScratchDir`] that is removed when this
/// function returns, whichever way it returns.
pub async fn convert_pdf_to_docx(
    converter: &dyn DocxConverter,
    temp_root: Option<&Path>,
    pdf: &[u8],
) -> Result<Vec<u8>> {
    if pdf.is_empty() {
        return Err(AppError::BadRequest("uploaded file is empty".to_string()));
    }
    ensure_pdf_header(pdf)?;

    let scratch = ScratchDir::create(temp_root)?;
    let input = scratch.input_pdf();
    let output = scratch.output_docx();

    tokio::fs::write(&input, pdf).await?;

    tracing::debug!(
        "Converting {} bytes with {} in {}",
        pdf.len(),
        converter.name(),
        scratch.path().display()
    );
    converter.convert(&input, &output).await?;

    let docx = tokio::fs::read(&output).await.map_err(|e| {
        AppError::Conversion(format!("converter produced no readable output: {}", e))
    })?;

    Ok(docx)
}
