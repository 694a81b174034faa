//! Page compositor
//!
//! Fits an image of arbitrary aspect ratio onto a fixed-size white canvas:
//! scaled uniformly until one side touches the canvas edge, then centered.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Canvas background
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Target canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// A4 rendered at 300 DPI
    pub const A4_300_DPI: CanvasSize = CanvasSize {
        width: 2480,
        height: 3508,
    };

    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AppError::Config(format!(
                "canvas dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }
}

/// Where the scaled image lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Placement {
    /// Compute the aspect-preserving fit of a `width`x`height` source
    pub fn fit(width: u32, height: u32, canvas: CanvasSize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AppError::InvalidImage(format!(
                "image has zero dimension ({}x{})",
                width, height
            )));
        }
        if canvas.width == 0 || canvas.height == 0 {
            return Err(AppError::Config(format!(
                "canvas dimensions must be positive, got {}x{}",
                canvas.width, canvas.height
            )));
        }

        let (w, h) = (u64::from(width), u64::from(height));
        let (cw, ch) = (u64::from(canvas.width), u64::from(canvas.height));

        // w/h > cw/ch, compared without floating point
        let (new_width, new_height) = if w * ch > cw * h {
            (cw, cw * h / w)
        } else {
            (ch * w / h, ch)
        };

        // Extreme ratios can floor a side to zero
        let new_width = new_width.max(1) as u32;
        let new_height = new_height.max(1) as u32;

        Ok(Self {
            width: new_width,
            height: new_height,
            x: (canvas.width - new_width) / 2,
            y: (canvas.height - new_height) / 2,
        })
    }
}

/// Scale `source` onto a fresh canvas, centered, with Lanczos resampling
pub fn compose_page(source: &RgbImage, canvas: CanvasSize) -> Result<RgbImage> {
    let placement = Placement::fit(source.width(), source.height(), canvas)?;

    let resized = if (placement.width, placement.height) == source.dimensions() {
        source.clone()
    } else {
        imageops::resize(source, placement.width, placement.height, FilterType::Lanczos3)
    };

    let mut page = RgbImage::from_pixel(canvas.width, canvas.height, BACKGROUND);
    imageops::replace(&mut page, &resized, i64::from(placement.x), i64::from(placement.y));

    tracing::trace!(
        "Composed {}x{} source as {}x{} at ({}, {})",
        source.width(),
        source.height(),
        placement.width,
        placement.height,
        placement.x,
        placement.y
    );

    Ok(page)
}
