use coloring_book::acquisition::catalog;
use coloring_book::export::ClipboardSink;
use coloring_book::error::ClipboardError;
use coloring_book::{
    ColoringSession, CommandOutcome, ExportKind, ImageRequest, ImageResolver, SessionConfig,
    SessionError, SessionState, ToolKind,
};
use egui::{Color32, Pos2};
use futures::executor::block_on;
use std::collections::HashMap;

// Helper to open a catalog entry on a fresh session
fn open_catalog(config: SessionConfig, id: &str) -> ColoringSession {
    let resolver = ImageResolver::new(&config);
    let mut session = ColoringSession::new(config).unwrap();
    let warning = block_on(session.open(&resolver, ImageRequest::Catalog { id: id.to_owned() }))
        .unwrap();
    assert!(warning.is_none(), "unexpected warning: {warning:?}");
    session
}

fn small_session() -> ColoringSession {
    open_catalog(
        SessionConfig {
            canvas_width: 120,
            canvas_height: 120,
            ..Default::default()
        },
        "1",
    )
}

fn draw(session: &mut ColoringSession, points: &[(f32, f32)]) -> CommandOutcome {
    let (first, rest) = points.split_first().unwrap();
    let down = session.pointer_down(Pos2::new(first.0, first.1)).unwrap();
    let last = rest.last().unwrap_or(first);
    for (x, y) in rest.iter().take(rest.len().saturating_sub(1)) {
        session.pointer_move(Pos2::new(*x, *y)).unwrap();
    }
    // Fill commits on press, strokes on release
    match session.pointer_up(Pos2::new(last.0, last.1)).unwrap() {
        CommandOutcome::Unchanged => down,
        up => up,
    }
}

#[test]
fn test_brush_size_is_always_clamped() {
    let mut session = small_session();
    for n in [0, 1, 2, 25, 49, 50, 51, 100, 1000, u32::MAX] {
        let stored = session.set_brush_size(n).unwrap();
        assert_eq!(stored, n.clamp(1, 50));
        assert_eq!(session.brush_size(), stored);
    }
}

#[test]
fn test_undo_converges_without_removing_background() {
    let mut session = small_session();

    // Only the background: no-op
    assert_eq!(session.undo().unwrap(), CommandOutcome::Unchanged);
    assert_eq!(session.surface().object_count(), 1);

    let k = 5;
    for i in 0..k {
        let y = 10.0 + 20.0 * i as f32;
        draw(&mut session, &[(10.0, y), (60.0, y), (100.0, y)]);
    }
    assert_eq!(session.surface().stroke_count(), k);

    for remaining in (0..k).rev() {
        assert!(matches!(session.undo().unwrap(), CommandOutcome::StrokeRemoved(_)));
        assert_eq!(session.surface().stroke_count(), remaining);
    }

    assert_eq!(session.undo().unwrap(), CommandOutcome::Unchanged);
    assert_eq!(session.surface().object_count(), 1);
    assert!(!session.surface().background().is_placeholder());
}

#[test]
fn test_eraser_paints_background_color() {
    let mut session = small_session();
    session.select_color(Color32::BLUE).unwrap();

    session.select_tool(ToolKind::Brush).unwrap();
    draw(&mut session, &[(10.0, 10.0), (80.0, 80.0)]);

    session.select_tool(ToolKind::Eraser).unwrap();
    draw(&mut session, &[(80.0, 10.0), (10.0, 80.0)]);

    let strokes = session.strokes();
    assert_eq!(strokes[0].color(), Color32::BLUE);
    assert!(!strokes[0].is_erase());
    assert_eq!(strokes[1].color(), session.config().background_color);
    assert!(strokes[1].is_erase());

    // The active color survives an eraser round trip
    session.select_tool(ToolKind::Brush).unwrap();
    draw(&mut session, &[(5.0, 60.0), (90.0, 60.0)]);
    assert_eq!(session.strokes()[2].color(), Color32::BLUE);
}

#[test]
fn test_color_change_does_not_touch_existing_strokes() {
    let mut session = small_session();
    session.select_color(Color32::GREEN).unwrap();
    draw(&mut session, &[(10.0, 10.0), (80.0, 80.0)]);
    session.select_color(Color32::YELLOW).unwrap();

    assert_eq!(session.strokes()[0].color(), Color32::GREEN);
}

#[test]
fn test_fill_tool_adds_a_fill_object() {
    let mut session = small_session();
    session.select_tool(ToolKind::Fill).unwrap();
    session.select_color(Color32::RED).unwrap();

    let outcome = draw(&mut session, &[(3.0, 3.0)]);
    assert!(matches!(outcome, CommandOutcome::StrokeAdded(_)));
    assert_eq!(session.surface().stroke_count(), 1);

    let raster = session.surface().to_rgba_image();
    assert_eq!(raster.get_pixel(3, 3).0, [255, 0, 0, 255]);
}

#[test]
fn test_redo_reports_not_available() {
    let mut session = small_session();
    draw(&mut session, &[(10.0, 10.0), (80.0, 80.0)]);
    session.undo().unwrap();

    assert!(matches!(session.redo(), Err(SessionError::RedoUnavailable)));
    assert_eq!(session.surface().stroke_count(), 0);
}

#[test]
fn test_state_machine_through_export() {
    let mut session = ColoringSession::new(SessionConfig::default()).unwrap();
    assert_eq!(session.state(), SessionState::Uninitialized);
    assert!(matches!(
        session.pointer_down(Pos2::new(1.0, 1.0)),
        Err(SessionError::NotReady(SessionState::Uninitialized))
    ));

    let mut session = small_session();
    assert_eq!(session.state(), SessionState::Ready);

    let job = session.begin_export(ExportKind::Image).unwrap();
    assert_eq!(session.state(), SessionState::Exporting);
    assert!(matches!(
        session.begin_export(ExportKind::Image),
        Err(SessionError::ExportInProgress)
    ));
    assert!(matches!(session.undo(), Err(SessionError::NotReady(SessionState::Exporting))));

    let artifact = session.complete_export(job.run()).unwrap();
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(artifact.file_name, "coloring-Happy-Cat.png");
}

#[test]
fn test_opening_another_image_resets_strokes() {
    let config = SessionConfig {
        canvas_width: 120,
        canvas_height: 120,
        ..Default::default()
    };
    let resolver = ImageResolver::new(&config);
    let mut session = ColoringSession::new(config).unwrap();

    block_on(session.open(&resolver, ImageRequest::Catalog { id: "1".to_owned() })).unwrap();
    draw(&mut session, &[(10.0, 10.0), (80.0, 80.0)]);
    assert!(session.history().can_undo());

    block_on(session.open(&resolver, ImageRequest::Catalog { id: "2".to_owned() })).unwrap();
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.surface().stroke_count(), 0);
    assert!(!session.history().can_undo());
    assert_eq!(session.image().map(|image| image.title.as_str()), Some("Magic Dragon"));
}

struct DeniedClipboard;

impl ClipboardSink for DeniedClipboard {
    fn set_image(&mut self, _width: usize, _height: usize, _rgba: &[u8]) -> Result<(), ClipboardError> {
        Err(ClipboardError::PermissionDenied)
    }
}

#[derive(Default)]
struct RecordingClipboard {
    images: Vec<(usize, usize, usize)>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_image(&mut self, width: usize, height: usize, rgba: &[u8]) -> Result<(), ClipboardError> {
        self.images.push((width, height, rgba.len()));
        Ok(())
    }
}

#[test]
fn test_clipboard_payload_is_raw_rgba() {
    let mut session = small_session();
    let mut clipboard = RecordingClipboard::default();
    let artifact = session.export_as_clipboard_payload(&mut clipboard).unwrap();

    assert_eq!(artifact.kind, ExportKind::Clipboard);
    assert_eq!(clipboard.images, vec![(120, 120, 120 * 120 * 4)]);
}

#[test]
fn test_clipboard_denial_is_recoverable() {
    let mut session = small_session();
    let err = session
        .export_as_clipboard_payload(&mut DeniedClipboard)
        .unwrap_err();

    assert!(matches!(err, SessionError::Clipboard(ClipboardError::PermissionDenied)));
    assert!(err.user_message().contains("Try saving instead"));
    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.export_as_image().is_ok());
}

#[test]
fn test_animals_scenario_dominant_color_is_selected_red() {
    let animals = catalog::first_in_category("animals").unwrap();
    let mut session = open_catalog(SessionConfig::default(), &animals.id);
    assert_eq!(session.state(), SessionState::Ready);
    assert!(!session.surface().background().is_placeholder());

    session.select_color(Color32::RED).unwrap();
    session.set_brush_size(20).unwrap();
    let zig_zag: Vec<(f32, f32)> = (0..10)
        .map(|i| {
            let x = if i % 2 == 0 { 50.0 } else { 550.0 };
            (x, 60.0 + 50.0 * i as f32)
        })
        .collect();
    draw(&mut session, &zig_zag);

    let artifact = session.export_as_image().unwrap();
    let raster = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();

    let mut counts: HashMap<[u8; 4], usize> = HashMap::new();
    for pixel in raster.pixels() {
        if pixel.0 != [255, 255, 255, 255] {
            *counts.entry(pixel.0).or_default() += 1;
        }
    }
    assert!(!counts.is_empty());

    let (dominant, _) = counts.iter().max_by_key(|(_, count)| **count).unwrap();
    assert_eq!(*dominant, [255, 0, 0, 255]);
}
