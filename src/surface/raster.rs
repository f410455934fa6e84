//! Rasterization of surface objects using tiny-skia

use egui::Color32;
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Stroke, Transform,
};

use crate::stroke::StrokeRecord;

pub fn blank_pixmap(width: u32, height: u32, color: Color32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(to_skia_color(color));
    Some(pixmap)
}

pub fn to_skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Copy an unpremultiplied image into a premultiplied pixmap
pub fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(img.width(), img.height())?;
    let mut data = Vec::with_capacity(img.as_raw().len());
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[
            premultiplied.red(),
            premultiplied.green(),
            premultiplied.blue(),
            premultiplied.alpha(),
        ]);
    }
    Pixmap::from_vec(data, size)
}

pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        dst.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }
    img
}

/// Draw `top` over `base` at the origin using source-over blending
pub fn draw_over(base: &mut Pixmap, top: &Pixmap) {
    base.draw_pixmap(
        0,
        0,
        top.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

/// Render one surface object on top of what the pixmap already holds
pub fn draw_record(pixmap: &mut Pixmap, record: &StrokeRecord, fill_tolerance: u8) {
    match record {
        StrokeRecord::Path {
            points,
            color,
            thickness,
            ..
        } => draw_path(pixmap, points, *color, *thickness),
        StrokeRecord::Fill { seed, color, .. } => {
            if !seed.x.is_finite() || !seed.y.is_finite() || seed.x < 0.0 || seed.y < 0.0 {
                return;
            }
            flood_fill(
                pixmap,
                seed.x as u32,
                seed.y as u32,
                *color,
                fill_tolerance,
            );
        }
    }
}

fn draw_path(pixmap: &mut Pixmap, points: &[egui::Pos2], color: Color32, thickness: f32) {
    let mut paint = Paint::default();
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    match points {
        [] => {}
        [dot] => {
            // A tap without movement leaves a round dab
            if let Some(path) = PathBuilder::from_circle(dot.x, dot.y, thickness / 2.0) {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        [first, rest @ ..] => {
            let mut pb = PathBuilder::new();
            pb.move_to(first.x, first.y);
            for point in rest {
                pb.line_to(point.x, point.y);
            }
            let Some(path) = pb.finish() else {
                return;
            };

            let stroke = Stroke {
                width: thickness,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// 4-connected flood fill of the region around `(x, y)` whose pixels are
/// within `tolerance` of the seed pixel on every channel.
pub fn flood_fill(pixmap: &mut Pixmap, x: u32, y: u32, color: Color32, tolerance: u8) {
    let (width, height) = (pixmap.width(), pixmap.height());
    if x >= width || y >= height {
        return;
    }

    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let replacement = ColorU8::from_rgba(r, g, b, a).premultiply();

    let pixels = pixmap.pixels_mut();
    let index = |x: u32, y: u32| (y * width + x) as usize;
    let target = pixels[index(x, y)];
    if target == replacement {
        return;
    }

    let mut visited = vec![false; pixels.len()];
    let mut stack = vec![(x, y)];

    while let Some((px, py)) = stack.pop() {
        let i = index(px, py);
        if visited[i] || !within_tolerance(pixels[i], target, tolerance) {
            continue;
        }
        visited[i] = true;
        pixels[i] = replacement;

        if px > 0 {
            stack.push((px - 1, py));
        }
        if px + 1 < width {
            stack.push((px + 1, py));
        }
        if py > 0 {
            stack.push((px, py - 1));
        }
        if py + 1 < height {
            stack.push((px, py + 1));
        }
    }
}

fn within_tolerance(a: PremultipliedColorU8, b: PremultipliedColorU8, tolerance: u8) -> bool {
    a.red().abs_diff(b.red()) <= tolerance
        && a.green().abs_diff(b.green()) <= tolerance
        && a.blue().abs_diff(b.blue()) <= tolerance
        && a.alpha().abs_diff(b.alpha()) <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn test_fill_with_non_finite_seed_is_ignored() {
        let mut pixmap = blank_pixmap(10, 10, Color32::WHITE).unwrap();
        for seed in [
            Pos2::new(f32::NAN, 3.0),
            Pos2::new(3.0, f32::NAN),
            Pos2::new(f32::INFINITY, 3.0),
            Pos2::new(3.0, f32::NEG_INFINITY),
        ] {
            draw_record(&mut pixmap, &StrokeRecord::fill(seed, Color32::RED), 32);
        }
        assert_eq!(pixel(&pixmap, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixmap, 9, 9), [255, 255, 255, 255]);
    }

    #[test]
    fn test_fill_stops_at_outline() {
        let mut pixmap = blank_pixmap(40, 40, Color32::WHITE).unwrap();
        // Vertical black wall at x = 20
        let wall = StrokeRecord::Path {
            id: uuid::Uuid::nil(),
            kind: crate::stroke::PathKind::Paint,
            points: vec![Pos2::new(20.0, -5.0), Pos2::new(20.0, 45.0)],
            color: Color32::BLACK,
            thickness: 4.0,
        };
        draw_record(&mut pixmap, &wall, 32);

        flood_fill(&mut pixmap, 5, 5, Color32::RED, 32);

        assert_eq!(pixel(&pixmap, 5, 5), [255, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 0, 39), [255, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 35, 20), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixmap, 20, 20), [0, 0, 0, 255]);
    }

    #[test]
    fn test_fill_outside_canvas_is_noop() {
        let mut pixmap = blank_pixmap(10, 10, Color32::WHITE).unwrap();
        let before = pixmap.clone();
        flood_fill(&mut pixmap, 10, 3, Color32::RED, 0);
        assert_eq!(pixmap.data(), before.data());
    }

    #[test]
    fn test_single_point_draws_a_dot() {
        let mut pixmap = blank_pixmap(20, 20, Color32::WHITE).unwrap();
        draw_path(&mut pixmap, &[Pos2::new(10.0, 10.0)], Color32::BLUE, 8.0);
        assert_eq!(pixel(&pixmap, 10, 10), [0, 0, 255, 255]);
        assert_eq!(pixel(&pixmap, 1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_rgba_pixmap_conversion_keeps_opaque_pixels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([12, 34, 56, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 0, 0]));
        let pixmap = pixmap_from_rgba(&img).unwrap();
        assert_eq!(rgba_from_pixmap(&pixmap), img);
    }
}
