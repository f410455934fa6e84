use egui::Color32;
use image::{RgbaImage, imageops::FilterType};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::raster;
use crate::error::LoadFailure;

/// The outline bitmap at the bottom of the surface stack
#[derive(Clone)]
pub struct BackgroundImage {
    source: String,
    pixels: RgbaImage,
    is_placeholder: bool,
}

// Custom Debug implementation so logs don't dump the pixel buffer
impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("source", &self.source)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("is_placeholder", &self.is_placeholder)
            .finish()
    }
}

impl BackgroundImage {
    /// Decode encoded image bytes and scale them to `canvas_width`, keeping
    /// the aspect ratio.
    pub fn decode(source: &str, bytes: &[u8], canvas_width: u32) -> Result<Self, LoadFailure> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(LoadFailure::Unsupported(format!("{source} has no pixels")));
        }
        Ok(Self::from_rgba(source, decoded, canvas_width))
    }

    pub fn from_rgba(source: &str, pixels: RgbaImage, canvas_width: u32) -> Self {
        let pixels = scale_to_width(pixels, canvas_width);
        log::info!(
            "🖼️ Background {} ready: {}x{}",
            source,
            pixels.width(),
            pixels.height()
        );
        Self {
            source: source.to_owned(),
            pixels,
            is_placeholder: false,
        }
    }

    /// Fully transparent background, used before anything has been loaded
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            source: String::new(),
            pixels: RgbaImage::new(width, height),
            is_placeholder: false,
        }
    }

    /// Stand-in for an outline that could not be loaded: a grey dashed frame
    /// with a cross, sized to the canvas.
    pub fn placeholder(source: &str, width: u32, height: u32) -> Self {
        let pixels = Pixmap::new(width, height)
            .map(|mut pixmap| {
                draw_placeholder(&mut pixmap);
                raster::rgba_from_pixmap(&pixmap)
            })
            .unwrap_or_else(|| RgbaImage::new(width, height));

        Self {
            source: source.to_owned(),
            pixels,
            is_placeholder: true,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_placeholder(&self) -> bool {
        self.is_placeholder
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

fn scale_to_width(pixels: RgbaImage, width: u32) -> RgbaImage {
    if pixels.width() == width || width == 0 {
        return pixels;
    }
    let scale = width as f32 / pixels.width() as f32;
    let height = ((pixels.height() as f32 * scale).round() as u32).max(1);
    image::imageops::resize(&pixels, width, height, FilterType::Triangle)
}

fn draw_placeholder(pixmap: &mut Pixmap) {
    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let inset = (w.min(h) * 0.05).max(2.0);

    let mut paint = Paint::default();
    paint.set_color(raster::to_skia_color(Color32::from_gray(190)));
    paint.anti_alias = true;

    let stroke = Stroke {
        width: 3.0,
        dash: tiny_skia::StrokeDash::new(vec![12.0, 8.0], 0.0),
        ..Default::default()
    };

    let mut pb = PathBuilder::new();
    pb.move_to(inset, inset);
    pb.line_to(w - inset, inset);
    pb.line_to(w - inset, h - inset);
    pb.line_to(inset, h - inset);
    pb.close();
    pb.move_to(inset, inset);
    pb.line_to(w - inset, h - inset);
    pb.move_to(w - inset, inset);
    pb.line_to(inset, h - inset);

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_scales_to_canvas_width() {
        let img = RgbaImage::from_pixel(300, 150, image::Rgba([255, 255, 255, 255]));
        let background = BackgroundImage::decode("test", &encode_png(&img), 600).unwrap();
        assert_eq!(background.width(), 600);
        assert_eq!(background.height(), 300);
        assert!(!background.is_placeholder());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = BackgroundImage::decode("garbage", b"definitely not an image", 600);
        assert!(matches!(result, Err(LoadFailure::Decode(_))));
    }

    #[test]
    fn test_placeholder_has_canvas_size() {
        let background = BackgroundImage::placeholder("missing", 120, 80);
        assert!(background.is_placeholder());
        assert_eq!((background.width(), background.height()), (120, 80));
        assert_eq!(background.source(), "missing");
    }
}
