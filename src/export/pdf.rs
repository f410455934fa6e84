//! Minimal PDF composition: raster images plus simple Helvetica text lines.

use image::RgbaImage;
use lopdf::{Document, Object, Stream, dictionary};

use crate::config::PageSize;
use crate::error::ExportError;

/// Placement in PDF points, origin at the bottom left of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: String,
}

pub struct DocumentPage {
    pub size: PageSize,
    pub image: Option<(RgbaImage, Placement)>,
    pub text: Vec<TextLine>,
}

/// One page whose height follows the raster's aspect ratio, with the raster
/// filling it edge to edge.
pub fn compose_document(raster: &RgbaImage, page_width: f32) -> Result<Vec<u8>, ExportError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(ExportError::Document("cannot compose an empty raster".to_owned()));
    }
    let height = page_width * raster.height() as f32 / raster.width() as f32;
    let size = PageSize {
        width: page_width,
        height,
    };
    compose_pages(vec![DocumentPage {
        size,
        image: Some((
            raster.clone(),
            Placement {
                x: 0.0,
                y: 0.0,
                width: page_width,
                height,
            },
        )),
        text: Vec::new(),
    }])
}

pub fn compose_pages(pages: Vec<DocumentPage>) -> Result<Vec<u8>, ExportError> {
    if pages.is_empty() {
        return Err(ExportError::Document("document has no pages".to_owned()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut content = String::new();
        let mut xobjects = lopdf::Dictionary::new();

        if let Some((image, placement)) = &page.image {
            let image_id = doc.add_object(image_stream(image));
            xobjects.set("Im0", image_id);
            content.push_str(&format!(
                "q {} 0 0 {} {} {} cm /Im0 Do Q\n",
                placement.width, placement.height, placement.x, placement.y
            ));
        }

        for line in &page.text {
            content.push_str(&format!(
                "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
                line.size,
                line.x,
                line.y,
                escape_text(&line.text)
            ));
        }

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), page.size.width.into(), page.size.height.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
                "XObject" => xobjects,
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// RGB image XObject; transparency is flattened onto white
fn image_stream(image: &RgbaImage) -> Stream {
    let mut rgb = Vec::with_capacity((image.width() * image.height() * 3) as usize);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        for channel in [r, g, b] {
            rgb.push(((channel as u32 * alpha + 255 * (255 - alpha)) / 255) as u8);
        }
    }

    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb,
    )
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() => escaped.push(c),
            // Base-14 fonts only cover Latin-1 reliably
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_page_follows_aspect_ratio() {
        let raster = RgbaImage::from_pixel(600, 300, image::Rgba([255, 0, 0, 255]));
        let bytes = compose_document(&raster, 595.28).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let raster = RgbaImage::new(0, 0);
        assert!(matches!(
            compose_document(&raster, 595.28),
            Err(ExportError::Document(_))
        ));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Page (1) \\ 2"), "Page \\(1\\) \\\\ 2");
        assert_eq!(escape_text("🎨 art"), "? art");
    }
}
