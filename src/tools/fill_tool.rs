use egui::Pos2;

use crate::command::Command;
use crate::stroke::StrokeRecord;
use crate::surface::DrawingSurface;
use crate::tools::{Tool, ToolKind};

/// Flood fills the region under the pointer with the brush color
#[derive(Debug, Clone, Default)]
pub struct FillTool;

impl FillTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for FillTool {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Fill
    }

    fn deactivate(&mut self, _surface: &DrawingSurface) {}

    fn on_pointer_down(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command> {
        if !pos.x.is_finite()
            || !pos.y.is_finite()
            || pos.x < 0.0
            || pos.y < 0.0
            || pos.x >= surface.width() as f32
            || pos.y >= surface.height() as f32
        {
            return None;
        }
        Some(Command::AddStroke(StrokeRecord::fill(
            pos,
            surface.brush().color,
        )))
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _surface: &DrawingSurface) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _surface: &DrawingSurface) -> Option<Command> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_fill_outside_surface_is_ignored() {
        let mut surface = DrawingSurface::new(20, 20, Color32::WHITE, 32).unwrap();
        surface.set_brush(Color32::GREEN, 3.0);
        let mut tool = FillTool::new();

        assert!(tool.on_pointer_down(Pos2::new(25.0, 5.0), &surface).is_none());
        let command = tool.on_pointer_down(Pos2::new(5.0, 5.0), &surface);
        assert!(matches!(
            command,
            Some(Command::AddStroke(StrokeRecord::Fill { color, .. })) if color == Color32::GREEN
        ));
    }

    #[test]
    fn test_fill_at_non_finite_position_is_ignored() {
        let surface = DrawingSurface::new(20, 20, Color32::WHITE, 32).unwrap();
        let mut tool = FillTool::new();
        for pos in [
            Pos2::new(f32::NAN, 5.0),
            Pos2::new(5.0, f32::NAN),
            Pos2::new(f32::NEG_INFINITY, 5.0),
            Pos2::new(5.0, f32::INFINITY),
        ] {
            assert!(tool.on_pointer_down(pos, &surface).is_none(), "{pos:?}");
        }
    }
}
