mod background;
pub mod raster;

pub use background::BackgroundImage;

use egui::Color32;
use image::RgbaImage;
use thiserror::Error;
use tiny_skia::Pixmap;

use crate::stroke::{StrokeId, StrokeRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot allocate a {width}x{height} drawing surface")]
pub struct SurfaceError {
    pub width: u32,
    pub height: u32,
}

/// Free-draw settings that newly started strokes pick up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub color: Color32,
    pub width: f32,
}

/// The editable drawing stack: one background image at the bottom, then the
/// session's objects in insertion order.
pub struct DrawingSurface {
    width: u32,
    height: u32,
    background_color: Color32,
    fill_tolerance: u8,
    background: BackgroundImage,
    // Canvas color with the background composited on top
    base: Pixmap,
    objects: Vec<StrokeRecord>,
    brush: BrushSettings,
    // Bumped on every visible change so renderers can cache textures
    version: u64,
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .field("objects", &self.objects.len())
            .field("brush", &self.brush)
            .field("version", &self.version)
            .finish()
    }
}

impl DrawingSurface {
    pub fn new(
        width: u32,
        height: u32,
        background_color: Color32,
        fill_tolerance: u8,
    ) -> Result<Self, SurfaceError> {
        let background = BackgroundImage::blank(width, height);
        let base = compose_base(width, height, background_color, &background)?;
        Ok(Self {
            width,
            height,
            background_color,
            fill_tolerance,
            background,
            base,
            objects: Vec::new(),
            brush: BrushSettings {
                color: Color32::BLACK,
                width: 1.0,
            },
            version: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn background(&self) -> &BackgroundImage {
        &self.background
    }

    /// Replace the background. Objects drawn over the old image are dropped,
    /// since they belong to a different coloring target.
    pub fn set_background(&mut self, background: BackgroundImage) -> Result<(), SurfaceError> {
        self.base = compose_base(self.width, self.height, self.background_color, &background)?;
        self.background = background;
        self.objects.clear();
        self.version += 1;
        Ok(())
    }

    pub fn set_brush(&mut self, color: Color32, width: f32) {
        self.brush = BrushSettings { color, width };
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn add(&mut self, record: StrokeRecord) -> StrokeId {
        let id = record.id();
        self.objects.push(record);
        self.version += 1;
        id
    }

    pub fn remove_last(&mut self) -> Option<StrokeRecord> {
        let removed = self.objects.pop();
        if removed.is_some() {
            self.version += 1;
        }
        removed
    }

    pub fn objects(&self) -> &[StrokeRecord] {
        &self.objects
    }

    /// Number of drawables on the stack, the background included
    pub fn object_count(&self) -> usize {
        self.objects.len() + 1
    }

    pub fn stroke_count(&self) -> usize {
        self.objects.len()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Composite background and objects, bottom to top
    pub fn rasterize(&self) -> Pixmap {
        render_layers(&self.base, &self.objects, self.fill_tolerance)
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        raster::rgba_from_pixmap(&self.rasterize())
    }

    /// Owned copy of everything needed to render the current state. Lets an
    /// export run without borrowing the surface.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            base: self.base.clone(),
            objects: self.objects.clone(),
            fill_tolerance: self.fill_tolerance,
        }
    }
}

#[derive(Clone)]
pub struct SurfaceSnapshot {
    base: Pixmap,
    objects: Vec<StrokeRecord>,
    fill_tolerance: u8,
}

impl SurfaceSnapshot {
    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    pub fn rasterize(&self) -> Pixmap {
        render_layers(&self.base, &self.objects, self.fill_tolerance)
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        raster::rgba_from_pixmap(&self.rasterize())
    }
}

fn render_layers(base: &Pixmap, objects: &[StrokeRecord], fill_tolerance: u8) -> Pixmap {
    let mut pixmap = base.clone();
    for record in objects {
        raster::draw_record(&mut pixmap, record, fill_tolerance);
    }
    pixmap
}

fn compose_base(
    width: u32,
    height: u32,
    background_color: Color32,
    background: &BackgroundImage,
) -> Result<Pixmap, SurfaceError> {
    let error = SurfaceError { width, height };
    let mut base = raster::blank_pixmap(width, height, background_color).ok_or(error.clone())?;
    if background.width() > 0 && background.height() > 0 {
        let top = raster::pixmap_from_rgba(background.pixels()).ok_or(error)?;
        raster::draw_over(&mut base, &top);
    }
    Ok(base)
}
