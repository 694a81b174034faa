//! Image(s) to PDF

use crate::config::ConversionConfig;
use crate::error::{AppError, Result};
use crate::imaging::{compose_page, decode_data_uri, decode_rgb};
use crate::pdf::{PageAssembler, PageOptions};

/// Compose every data-URI image onto its own canvas and bind them into one PDF
///
/// Pages are composed and encoded one at a time; at most one full-size
/// canvas is held in memory.
pub fn images_to_pdf(images: &[String], config: &ConversionConfig) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(AppError::EmptyImageList);
    }
    if images.len() > config.max_pages {
        return Err(AppError::TooManyPages {
            count: images.len(),
            max: config.max_pages,
        });
    }

    let mut assembler = PageAssembler::new(PageOptions {
        dpi: config.canvas_dpi,
        quality: config.page_quality,
    })?;

    for (index, uri) in images.iter().enumerate() {
        let bytes = decode_data_uri(uri)?;
        let source = decode_rgb(&bytes)?;
        tracing::debug!(
            "Image {}: {}x{} ({} bytes)",
            index + 1,
            source.width(),
            source.height(),
            bytes.len()
        );
        let canvas = compose_page(&source, config.canvas)?;
        assembler.add_page(&canvas)?;
    }

    assembler.finish()
}
