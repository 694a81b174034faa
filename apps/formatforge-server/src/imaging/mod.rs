//! Image handling
//!
//! Decoding of data-URI payloads, page composition and JPEG encoding.
//! Pixel work is delegated to the `image` crate.

mod compositor;
mod data_uri;

pub use compositor::*;
pub use data_uri::*;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::error::Result;

/// Decode image bytes of any supported format into 8-bit RGB
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.to_rgb8())
}

/// Encode an RGB image as baseline JPEG at `quality` (1-100)
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder.encode_image(image)?;
    Ok(buffer)
}
