//! Single-file compression

use crate::db::{OriginalType, OutputType};
use crate::error::{AppError, Result};
use crate::imaging::{decode_data_uri, decode_rgb, encode_jpeg};
use crate::pdf::rewrite_pdf;

pub const JPEG_MIME: &str = "image/jpeg";
pub const PDF_MIME: &str = "application/pdf";

/// What a filename says the upload is, resolved once from its extension
///
/// The extension is whatever follows the last `.`, so a bare `.png` is an
/// image and a name without any `.` is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Unsupported,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg") | Some("jpeg") | Some("png") => FileKind::Image,
            Some("pdf") => FileKind::Pdf,
            _ => FileKind::Unsupported,
        }
    }
}

/// A compressed file ready to send back
#[derive(Debug, Clone)]
pub struct CompressedFile {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub original_type: OriginalType,
    pub output_type: OutputType,
}

/// Compress a data-URI file according to its filename
///
/// Images are re-encoded as JPEG at `jpeg_quality`; PDFs are structurally
/// rewritten. Anything else is rejected before the payload is decoded.
pub fn compress_file(data_uri: &str, filename: &str, jpeg_quality: u8) -> Result<CompressedFile> {
    let (original_type, output_type, mime) = match FileKind::from_filename(filename) {
        FileKind::Image => (OriginalType::Image, OutputType::Image, JPEG_MIME),
        FileKind::Pdf => (OriginalType::Pdf, OutputType::Pdf, PDF_MIME),
        FileKind::Unsupported => return Err(AppError::UnsupportedFileType(filename.to_string())),
    };

    let bytes = decode_data_uri(data_uri)?;

    let output = match original_type {
        OriginalType::Image => encode_jpeg(&decode_rgb(&bytes)?, jpeg_quality)?,
        OriginalType::Pdf => rewrite_pdf(&bytes)?.bytes,
    };

    let compressed = CompressedFile {
        bytes: output,
        mime,
        original_type,
        output_type,
    };

    tracing::info!(
        "Compressed {} ({}): {} -> {} bytes",
        filename,
        compressed.mime,
        bytes.len(),
        compressed.bytes.len()
    );

    Ok(compressed)
}

/// Name under which a compressed file is reported
pub fn compressed_filename(filename: &str) -> String {
    format!("compressed_{}", filename)
}
