use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use image::{GrayImage, ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::{LoadFailure, ValidationError};

pub const UPLOAD_SCHEME: &str = "upload://";

/// Luma gradient above which a pixel counts as a line
const EDGE_THRESHOLD: i32 = 96;

/// Reject anything that isn't an image or is too large, before decoding
pub fn validate_upload(mime: &str, size: usize, limit: usize) -> Result<(), ValidationError> {
    if !mime.starts_with("image/") {
        return Err(ValidationError::UnsupportedType {
            mime: mime.to_owned(),
        });
    }
    if size > limit {
        return Err(ValidationError::TooLarge { size, limit });
    }
    Ok(())
}

/// Guess a mime type from a file name, for sources (like dropped files)
/// that don't report one
pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Turn a photo or drawing into black-on-white line art using a Sobel
/// gradient on the luma channel.
pub fn extract_outline(bytes: &[u8]) -> Result<RgbaImage, LoadFailure> {
    let luma = image::load_from_memory(bytes)?.to_luma8();
    Ok(edges(&luma))
}

fn edges(luma: &GrayImage) -> RgbaImage {
    let (width, height) = luma.dimensions();
    let at = |x: i64, y: i64| -> i32 {
        let x = x.clamp(0, width as i64 - 1) as u32;
        let y = y.clamp(0, height as i64 - 1) as u32;
        luma.get_pixel(x, y).0[0] as i32
    };

    RgbaImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let gx = at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1)
            - at(x - 1, y - 1)
            - 2 * at(x - 1, y)
            - at(x - 1, y + 1);
        let gy = at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1)
            - at(x - 1, y - 1)
            - 2 * at(x, y - 1)
            - at(x + 1, y - 1);
        if gx.abs() + gy.abs() > EDGE_THRESHOLD {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// In-memory home of processed uploads, addressed by `upload://<id>` URLs.
/// Cloning shares the same store.
#[derive(Clone, Default)]
pub struct UploadStore {
    outlines: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an outline as PNG and return its URL
    pub fn insert(&self, outline: &RgbaImage) -> Result<String, LoadFailure> {
        let mut png = Vec::new();
        outline.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        let url = format!("{UPLOAD_SCHEME}{}", Uuid::new_v4());
        self.outlines.lock().insert(url.clone(), png);
        Ok(url)
    }

    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.outlines.lock().get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.outlines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload() {
        let limit = 10 * 1024 * 1024;
        assert!(validate_upload("image/png", 1024, limit).is_ok());
        assert!(validate_upload("image/png", limit, limit).is_ok());
        assert_eq!(
            validate_upload("image/png", limit + 1, limit),
            Err(ValidationError::TooLarge {
                size: limit + 1,
                limit
            })
        );
        assert!(matches!(
            validate_upload("application/pdf", 10, limit),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_mime_from_file_name() {
        assert_eq!(mime_from_file_name("Cat.PNG"), "image/png");
        assert_eq!(mime_from_file_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_from_file_name("notes.txt"), "application/octet-stream");
        assert_eq!(mime_from_file_name("README"), "application/octet-stream");
    }

    #[test]
    fn test_edges_of_a_filled_square() {
        let luma = GrayImage::from_fn(20, 20, |x, y| {
            if (5..15).contains(&x) && (5..15).contains(&y) {
                image::Luma([0])
            } else {
                image::Luma([255])
            }
        });
        let outline = edges(&luma);
        // Flat regions stay white, the border turns black
        assert_eq!(outline.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(outline.get_pixel(10, 10).0, [255, 255, 255, 255]);
        assert_eq!(outline.get_pixel(5, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_store_roundtrip() {
        let store = UploadStore::new();
        let url = store.insert(&RgbaImage::new(4, 4)).unwrap();
        assert!(url.starts_with(UPLOAD_SCHEME));
        assert!(store.clone().get(&url).is_some());
        assert_eq!(store.len(), 1);
    }
}
