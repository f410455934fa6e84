use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, Shape, Stroke, TextureHandle, TextureOptions};

use crate::stroke::StrokeRecord;
use crate::surface::DrawingSurface;

/// Projects a [`DrawingSurface`] onto the screen.
///
/// The composited surface is uploaded as a single texture and only
/// re-uploaded when the surface version changes. The stroke being drawn is
/// painted on top as egui shapes, so live drawing never re-rasterizes.
#[derive(Default)]
pub struct Renderer {
    // Cached surface texture and the surface version it shows
    texture: Option<(u64, TextureHandle)>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("texture_version", &self.texture.as_ref().map(|(v, _)| *v))
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version of the surface currently uploaded, if any
    pub fn cached_version(&self) -> Option<u64> {
        self.texture.as_ref().map(|(version, _)| *version)
    }

    pub fn surface_texture(&mut self, ctx: &Context, surface: &DrawingSurface) -> &TextureHandle {
        let version = surface.version();
        let (cached, handle) = self.texture.get_or_insert_with(|| {
            let handle = ctx.load_texture("coloring_surface", color_image(surface), TextureOptions::LINEAR);
            (version, handle)
        });
        if *cached != version {
            handle.set(color_image(surface), TextureOptions::LINEAR);
            *cached = version;
            log::debug!("Uploaded surface texture v{version}");
        }
        handle
    }

    /// Draw the surface filling `rect`, plus the in-progress stroke
    pub fn render(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        rect: Rect,
        surface: &DrawingSurface,
        preview: Option<&StrokeRecord>,
    ) {
        let texture = self.surface_texture(ctx, surface);
        painter.image(
            texture.id(),
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
        painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::GRAY));

        if let Some(StrokeRecord::Path {
            points,
            color,
            thickness,
            ..
        }) = preview
        {
            let scale = rect.width() / surface.width() as f32;
            let screen: Vec<Pos2> = points
                .iter()
                .map(|p| to_screen(rect, surface, *p))
                .collect();
            let width = thickness * scale;
            match screen.as_slice() {
                [] => {}
                [single] => {
                    painter.circle_filled(*single, width / 2.0, *color);
                }
                _ => {
                    painter.add(Shape::line(screen, Stroke::new(width, *color)));
                }
            }
        }
    }
}

fn color_image(surface: &DrawingSurface) -> ColorImage {
    let raster = surface.to_rgba_image();
    ColorImage::from_rgba_unmultiplied(
        [raster.width() as usize, raster.height() as usize],
        raster.as_raw(),
    )
}

/// Largest rect inside `available` with the surface's aspect ratio, centered
pub fn fit_canvas(available: Rect, surface: &DrawingSurface) -> Rect {
    let (width, height) = (surface.width() as f32, surface.height() as f32);
    let scale = (available.width() / width).min(available.height() / height).max(0.0);
    Rect::from_center_size(available.center(), egui::vec2(width * scale, height * scale))
}

/// Screen position to surface pixel coordinates
pub fn to_canvas(rect: Rect, surface: &DrawingSurface, screen: Pos2) -> Pos2 {
    let sx = surface.width() as f32 / rect.width();
    let sy = surface.height() as f32 / rect.height();
    Pos2::new((screen.x - rect.min.x) * sx, (screen.y - rect.min.y) * sy)
}

pub fn to_screen(rect: Rect, surface: &DrawingSurface, canvas: Pos2) -> Pos2 {
    let sx = rect.width() / surface.width() as f32;
    let sy = rect.height() / surface.height() as f32;
    Pos2::new(rect.min.x + canvas.x * sx, rect.min.y + canvas.y * sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{MutableStroke, PathKind};

    fn surface() -> DrawingSurface {
        DrawingSurface::new(200, 100, Color32::WHITE, 32).unwrap()
    }

    #[test]
    fn test_fit_canvas_keeps_aspect_ratio() {
        let available = Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 400.0));
        let rect = fit_canvas(available, &surface());
        assert_eq!(rect.width(), 400.0);
        assert_eq!(rect.height(), 200.0);
        assert_eq!(rect.center(), available.center());
    }

    #[test]
    fn test_coordinate_mapping_roundtrip() {
        let surface = surface();
        let rect = Rect::from_min_size(Pos2::new(50.0, 20.0), egui::vec2(400.0, 200.0));
        let canvas = to_canvas(rect, &surface, Pos2::new(250.0, 120.0));
        assert_eq!(canvas, Pos2::new(100.0, 50.0));
        assert_eq!(to_screen(rect, &surface, canvas), Pos2::new(250.0, 120.0));
    }

    #[test]
    fn test_texture_follows_surface_version() {
        let ctx = Context::default();
        let mut renderer = Renderer::new();
        let mut surface = surface();

        let first = renderer.surface_texture(&ctx, &surface).id();
        assert_eq!(renderer.cached_version(), Some(surface.version()));

        let mut stroke = MutableStroke::new(PathKind::Paint, Color32::RED, 4.0);
        stroke.add_point(Pos2::new(10.0, 10.0));
        surface.add(stroke.into_record());

        let second = renderer.surface_texture(&ctx, &surface).id();
        assert_eq!(first, second);
        assert_eq!(renderer.cached_version(), Some(surface.version()));
    }

    #[test]
    fn test_render_with_preview() {
        let ctx = Context::default();
        let surface = surface();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(200.0, 100.0));
        let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let mut stroke = MutableStroke::new(PathKind::Paint, Color32::BLUE, 5.0);
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(50.0, 50.0));

        let mut renderer = Renderer::new();
        renderer.render(&ctx, &painter, rect, &surface, Some(&stroke.to_preview()));
        assert!(renderer.cached_version().is_some());
    }
}
