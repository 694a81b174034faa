//! Multi-page PDF assembly
//!
//! Each canvas becomes one page: the pixels are embedded as a JPEG image
//! XObject (`DCTDecode`) stretched over a MediaBox sized from the canvas
//! resolution, so a 2480x3508 canvas at 300 DPI yields an A4 page.

use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::{AppError, Result};
use crate::imaging::encode_jpeg;

/// Points per inch in PDF user space
const POINTS_PER_INCH: f32 = 72.0;

/// Page assembly options
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    /// Resolution the canvases were rendered at
    pub dpi: u32,
    /// JPEG quality of the embedded page images
    pub quality: u8,
}

/// Incrementally builds one PDF, one canvas per page
///
/// Canvases are JPEG-encoded as they are added, so callers can drop the
/// pixel buffer before composing the next page.
pub struct PageAssembler {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    options: PageOptions,
}

impl PageAssembler {
    pub fn new(options: PageOptions) -> Result<Self> {
        if options.dpi == 0 {
            return Err(AppError::Config("page DPI must be positive".to_string()));
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        Ok(Self {
            doc,
            pages_id,
            kids: Vec::new(),
            options,
        })
    }

    /// Append `canvas` as the next page
    pub fn add_page(&mut self, canvas: &RgbImage) -> Result<()> {
        let page_id = add_image_page(&mut self.doc, self.pages_id, canvas, self.options)?;
        self.kids.push(page_id.into());
        Ok(())
    }

    /// Write the page tree and catalog and serialize the document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.kids.is_empty() {
            return Err(AppError::EmptyImageList);
        }

        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        // Only the content streams are deflated; JPEG streams opt out
        self.doc.compress();

        let mut output = Vec::new();
        self.doc.save_to(&mut output)?;

        tracing::debug!("Assembled PDF with {} page(s), {} bytes", count, output.len());

        Ok(output)
    }
}

fn add_image_page(
    doc: &mut Document,
    pages_id: ObjectId,
    canvas: &RgbImage,
    options: PageOptions,
) -> Result<ObjectId> {
    let (width_px, height_px) = canvas.dimensions();
    let width_pt = width_px as f32 * POINTS_PER_INCH / options.dpi as f32;
    let height_pt = height_px as f32 * POINTS_PER_INCH / options.dpi as f32;

    let jpeg = encode_jpeg(canvas, options.quality)?;
    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width_px),
            "Height" => i64::from(height_px),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    )
    .with_compression(false);
    let image_id = doc.add_object(image);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width_pt.into(),
                    0.into(),
                    0.into(),
                    height_pt.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
    });

    Ok(page_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const OPTIONS: PageOptions = PageOptions { dpi: 300, quality: 90 };

    fn page_image_size(doc: &Document, page_id: ObjectId) -> (i64, i64) {
        let page = doc.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
        let image = doc.get_object(image_id).unwrap().as_stream().unwrap();
        (
            image.dict.get(b"Width").unwrap().as_i64().unwrap(),
            image.dict.get(b"Height").unwrap().as_i64().unwrap(),
        )
    }

    #[test]
    fn test_pages_keep_input_order() {
        let mut assembler = PageAssembler::new(OPTIONS).unwrap();
        for (width, height) in [(30, 40), (50, 60), (70, 80)] {
            assembler
                .add_page(&RgbImage::from_pixel(width, height, Rgb([255, 0, 0])))
                .unwrap();
        }

        let bytes = assembler.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_ids = doc.get_pages();

        assert_eq!(page_ids.len(), 3);
        let sizes: Vec<(i64, i64)> = page_ids.values().map(|id| page_image_size(&doc, *id)).collect();
        assert_eq!(sizes, vec![(30, 40), (50, 60), (70, 80)]);
    }

    #[test]
    fn test_a4_canvas_maps_to_a4_points() {
        let mut assembler = PageAssembler::new(OPTIONS).unwrap();
        assembler
            .add_page(&RgbImage::from_pixel(2480, 3508, Rgb([255, 255, 255])))
            .unwrap();
        let bytes = assembler.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let page_id = *doc.get_pages().get(&1).unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();

        assert!((width - 595.2).abs() < 0.01);
        assert!((height - 841.92).abs() < 0.01);
    }

    #[test]
    fn test_empty_page_list_rejected() {
        let assembler = PageAssembler::new(OPTIONS).unwrap();
        assert!(matches!(assembler.finish(), Err(AppError::EmptyImageList)));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let options = PageOptions { dpi: 0, quality: 90 };
        assert!(matches!(PageAssembler::new(options), Err(AppError::Config(_))));
    }
}
