//! Built-in line-art, drawn procedurally so the app works offline.
//!
//! Drawings are described on a 100x100 grid and scaled to the requested size.

use image::RgbaImage;
use tiny_skia::{Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::surface::raster;

pub const BUILTIN_SCHEME: &str = "builtin://";

enum Shape {
    Circle(f32, f32, f32),
    Ellipse(f32, f32, f32, f32),
    Line(&'static [(f32, f32)]),
    Polygon(&'static [(f32, f32)]),
    Curve((f32, f32), (f32, f32), (f32, f32)),
}

use Shape::*;

const DRAWINGS: &[(&str, &[Shape])] = &[
    (
        "cat",
        &[
            Circle(50.0, 55.0, 30.0),
            Polygon(&[(25.0, 42.0), (28.0, 15.0), (45.0, 27.0)]),
            Polygon(&[(55.0, 27.0), (72.0, 15.0), (75.0, 42.0)]),
            Circle(40.0, 50.0, 4.0),
            Circle(60.0, 50.0, 4.0),
            Polygon(&[(47.0, 60.0), (53.0, 60.0), (50.0, 64.0)]),
            Curve((42.0, 68.0), (50.0, 75.0), (58.0, 68.0)),
            Line(&[(18.0, 58.0), (36.0, 62.0)]),
            Line(&[(64.0, 62.0), (82.0, 58.0)]),
        ],
    ),
    (
        "dog",
        &[
            Circle(50.0, 55.0, 28.0),
            Ellipse(22.0, 50.0, 8.0, 18.0),
            Ellipse(78.0, 50.0, 8.0, 18.0),
            Circle(40.0, 48.0, 4.0),
            Circle(60.0, 48.0, 4.0),
            Ellipse(50.0, 62.0, 6.0, 4.0),
            Curve((40.0, 70.0), (50.0, 78.0), (60.0, 70.0)),
        ],
    ),
    (
        "elephant",
        &[
            Ellipse(58.0, 58.0, 30.0, 20.0),
            Circle(28.0, 45.0, 15.0),
            Ellipse(34.0, 45.0, 8.0, 11.0),
            Curve((16.0, 52.0), (6.0, 72.0), (16.0, 85.0)),
            Line(&[(40.0, 74.0), (40.0, 90.0)]),
            Line(&[(55.0, 77.0), (55.0, 90.0)]),
            Line(&[(68.0, 77.0), (68.0, 90.0)]),
            Line(&[(80.0, 72.0), (80.0, 90.0)]),
            Circle(24.0, 42.0, 2.0),
        ],
    ),
    (
        "lion",
        &[
            Circle(50.0, 50.0, 36.0),
            Circle(50.0, 50.0, 22.0),
            Circle(42.0, 45.0, 3.0),
            Circle(58.0, 45.0, 3.0),
            Polygon(&[(46.0, 54.0), (54.0, 54.0), (50.0, 59.0)]),
            Curve((42.0, 62.0), (50.0, 68.0), (58.0, 62.0)),
        ],
    ),
    (
        "car",
        &[
            Polygon(&[
                (10.0, 60.0),
                (20.0, 60.0),
                (30.0, 42.0),
                (70.0, 42.0),
                (80.0, 60.0),
                (90.0, 60.0),
                (90.0, 75.0),
                (10.0, 75.0),
            ]),
            Polygon(&[(34.0, 46.0), (48.0, 46.0), (48.0, 58.0), (27.0, 58.0)]),
            Polygon(&[(52.0, 46.0), (66.0, 46.0), (73.0, 58.0), (52.0, 58.0)]),
            Circle(28.0, 75.0, 9.0),
            Circle(72.0, 75.0, 9.0),
        ],
    ),
    (
        "airplane",
        &[
            Ellipse(50.0, 50.0, 40.0, 8.0),
            Polygon(&[(40.0, 50.0), (55.0, 15.0), (62.0, 50.0)]),
            Polygon(&[(40.0, 50.0), (55.0, 85.0), (62.0, 50.0)]),
            Polygon(&[(12.0, 50.0), (8.0, 32.0), (20.0, 46.0)]),
        ],
    ),
    (
        "train",
        &[
            Polygon(&[(55.0, 30.0), (85.0, 30.0), (85.0, 70.0), (55.0, 70.0)]),
            Polygon(&[(15.0, 45.0), (55.0, 45.0), (55.0, 70.0), (15.0, 70.0)]),
            Polygon(&[(22.0, 45.0), (22.0, 30.0), (32.0, 30.0), (32.0, 45.0)]),
            Polygon(&[(62.0, 36.0), (78.0, 36.0), (78.0, 50.0), (62.0, 50.0)]),
            Circle(25.0, 76.0, 7.0),
            Circle(45.0, 76.0, 7.0),
            Circle(70.0, 76.0, 7.0),
        ],
    ),
    (
        "boat",
        &[
            Polygon(&[(10.0, 60.0), (90.0, 60.0), (75.0, 80.0), (25.0, 80.0)]),
            Line(&[(50.0, 60.0), (50.0, 15.0)]),
            Polygon(&[(53.0, 18.0), (53.0, 55.0), (80.0, 55.0)]),
            Curve((5.0, 90.0), (27.0, 84.0), (50.0, 90.0)),
            Curve((50.0, 90.0), (73.0, 96.0), (95.0, 90.0)),
        ],
    ),
    (
        "eagle",
        &[
            Ellipse(50.0, 57.0, 12.0, 22.0),
            Polygon(&[(40.0, 47.0), (5.0, 30.0), (38.0, 62.0)]),
            Polygon(&[(60.0, 47.0), (95.0, 30.0), (62.0, 62.0)]),
            Circle(50.0, 30.0, 8.0),
            Polygon(&[(50.0, 31.0), (57.0, 35.0), (50.0, 38.0)]),
            Polygon(&[(44.0, 78.0), (50.0, 92.0), (56.0, 78.0)]),
        ],
    ),
    (
        "owl",
        &[
            Ellipse(50.0, 58.0, 26.0, 32.0),
            Circle(40.0, 45.0, 8.0),
            Circle(60.0, 45.0, 8.0),
            Circle(40.0, 45.0, 3.0),
            Circle(60.0, 45.0, 3.0),
            Polygon(&[(47.0, 52.0), (53.0, 52.0), (50.0, 58.0)]),
            Polygon(&[(30.0, 32.0), (33.0, 18.0), (41.0, 29.0)]),
            Polygon(&[(59.0, 29.0), (67.0, 18.0), (70.0, 32.0)]),
        ],
    ),
    (
        "butterfly",
        &[
            Ellipse(50.0, 50.0, 3.0, 22.0),
            Ellipse(33.0, 38.0, 15.0, 13.0),
            Ellipse(67.0, 38.0, 15.0, 13.0),
            Ellipse(36.0, 65.0, 11.0, 10.0),
            Ellipse(64.0, 65.0, 11.0, 10.0),
            Curve((49.0, 28.0), (45.0, 18.0), (40.0, 15.0)),
            Curve((51.0, 28.0), (55.0, 18.0), (60.0, 15.0)),
        ],
    ),
    (
        "bee",
        &[
            Ellipse(52.0, 56.0, 24.0, 16.0),
            Line(&[(44.0, 41.0), (44.0, 71.0)]),
            Line(&[(56.0, 40.0), (56.0, 72.0)]),
            Ellipse(44.0, 32.0, 9.0, 12.0),
            Ellipse(60.0, 32.0, 9.0, 12.0),
            Circle(22.0, 54.0, 8.0),
            Line(&[(76.0, 56.0), (86.0, 56.0)]),
        ],
    ),
    (
        "tree",
        &[
            Polygon(&[(44.0, 92.0), (44.0, 62.0), (56.0, 62.0), (56.0, 92.0)]),
            Circle(50.0, 38.0, 25.0),
            Circle(30.0, 52.0, 14.0),
            Circle(70.0, 52.0, 14.0),
        ],
    ),
    (
        "flower",
        &[
            Circle(50.0, 24.0, 10.0),
            Circle(66.0, 40.0, 10.0),
            Circle(50.0, 56.0, 10.0),
            Circle(34.0, 40.0, 10.0),
            Circle(50.0, 40.0, 8.0),
            Curve((50.0, 66.0), (44.0, 80.0), (50.0, 95.0)),
            Ellipse(60.0, 80.0, 9.0, 4.0),
        ],
    ),
    (
        "sun",
        &[
            Circle(50.0, 50.0, 20.0),
            Line(&[(50.0, 24.0), (50.0, 8.0)]),
            Line(&[(50.0, 76.0), (50.0, 92.0)]),
            Line(&[(24.0, 50.0), (8.0, 50.0)]),
            Line(&[(76.0, 50.0), (92.0, 50.0)]),
            Line(&[(31.0, 31.0), (20.0, 20.0)]),
            Line(&[(69.0, 31.0), (80.0, 20.0)]),
            Line(&[(31.0, 69.0), (20.0, 80.0)]),
            Line(&[(69.0, 69.0), (80.0, 80.0)]),
        ],
    ),
    (
        "moon",
        &[
            Curve((58.0, 12.0), (0.0, 50.0), (58.0, 88.0)),
            Curve((58.0, 88.0), (30.0, 50.0), (58.0, 12.0)),
            Circle(72.0, 30.0, 3.0),
            Circle(80.0, 60.0, 2.0),
        ],
    ),
    (
        "star",
        &[Polygon(&[
            (50.0, 10.0),
            (61.0, 38.0),
            (91.0, 38.0),
            (67.0, 57.0),
            (76.0, 86.0),
            (50.0, 68.0),
            (24.0, 86.0),
            (33.0, 57.0),
            (9.0, 38.0),
            (39.0, 38.0),
        ])],
    ),
    (
        "cloud",
        &[
            Circle(34.0, 56.0, 15.0),
            Circle(52.0, 46.0, 19.0),
            Circle(70.0, 56.0, 14.0),
            Line(&[(19.0, 70.0), (84.0, 70.0)]),
        ],
    ),
    (
        "rainbow",
        &[
            Curve((8.0, 78.0), (50.0, -6.0), (92.0, 78.0)),
            Curve((18.0, 78.0), (50.0, 10.0), (82.0, 78.0)),
            Curve((28.0, 78.0), (50.0, 26.0), (72.0, 78.0)),
            Line(&[(8.0, 78.0), (28.0, 78.0)]),
            Line(&[(72.0, 78.0), (92.0, 78.0)]),
        ],
    ),
    (
        "mountain",
        &[
            Polygon(&[
                (5.0, 85.0),
                (35.0, 30.0),
                (55.0, 60.0),
                (70.0, 40.0),
                (95.0, 85.0),
            ]),
            Line(&[(27.0, 45.0), (35.0, 52.0), (43.0, 45.0)]),
        ],
    ),
    (
        "dragon",
        &[
            Circle(30.0, 40.0, 14.0),
            Circle(26.0, 37.0, 3.0),
            Polygon(&[(24.0, 28.0), (20.0, 14.0), (31.0, 27.0)]),
            Polygon(&[(34.0, 27.0), (40.0, 14.0), (40.0, 30.0)]),
            Ellipse(58.0, 62.0, 25.0, 15.0),
            Polygon(&[(50.0, 50.0), (62.0, 15.0), (76.0, 49.0)]),
            Curve((82.0, 64.0), (98.0, 76.0), (86.0, 90.0)),
            Line(&[(48.0, 75.0), (46.0, 90.0)]),
            Line(&[(68.0, 75.0), (70.0, 90.0)]),
        ],
    ),
];

pub fn drawing_names() -> impl Iterator<Item = &'static str> {
    DRAWINGS.iter().map(|(name, _)| *name)
}

pub fn builtin_url(name: &str) -> String {
    format!("{BUILTIN_SCHEME}{name}")
}

/// Render a named drawing as black lines on white. `None` for unknown names.
pub fn render_builtin(name: &str, width: u32, height: u32) -> Option<RgbaImage> {
    let (_, shapes) = DRAWINGS.iter().find(|(n, _)| *n == name)?;
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let mut paint = Paint::default();
    paint.set_color(tiny_skia::Color::BLACK);
    paint.anti_alias = true;

    let scale_x = width as f32 / 100.0;
    let scale_y = height as f32 / 100.0;
    let stroke = Stroke {
        width: (width.min(height) as f32 / 200.0).max(1.5),
        line_cap: tiny_skia::LineCap::Round,
        line_join: tiny_skia::LineJoin::Round,
        ..Default::default()
    };

    for shape in shapes.iter() {
        if let Some(path) = build_path(shape, scale_x, scale_y) {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    Some(raster::rgba_from_pixmap(&pixmap))
}

fn build_path(shape: &Shape, sx: f32, sy: f32) -> Option<Path> {
    match shape {
        Circle(cx, cy, r) => {
            let rect = tiny_skia::Rect::from_xywh((cx - r) * sx, (cy - r) * sy, 2.0 * r * sx, 2.0 * r * sy)?;
            PathBuilder::from_oval(rect)
        }
        Ellipse(cx, cy, rx, ry) => {
            let rect = tiny_skia::Rect::from_xywh((cx - rx) * sx, (cy - ry) * sy, 2.0 * rx * sx, 2.0 * ry * sy)?;
            PathBuilder::from_oval(rect)
        }
        Line(points) | Polygon(points) => {
            let ((x0, y0), rest) = points.split_first()?;
            let mut pb = PathBuilder::new();
            pb.move_to(x0 * sx, y0 * sy);
            for (x, y) in rest {
                pb.line_to(x * sx, y * sy);
            }
            if matches!(shape, Polygon(_)) {
                pb.close();
            }
            pb.finish()
        }
        Curve((x0, y0), (cx, cy), (x1, y1)) => {
            let mut pb = PathBuilder::new();
            pb.move_to(x0 * sx, y0 * sy);
            pb.quad_to(cx * sx, cy * sy, x1 * sx, y1 * sy);
            pb.finish()
        }
    }
}
