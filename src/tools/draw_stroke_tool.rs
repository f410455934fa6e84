use egui::Pos2;

use crate::command::Command;
use crate::stroke::{MutableStroke, PathKind, StrokeRecord};
use crate::surface::DrawingSurface;
use crate::tools::{Tool, ToolKind};

/// Free-hand drawing. Brush and eraser are the same mechanism; the surface
/// brush decides the color.
#[derive(Debug, Clone)]
pub struct DrawStrokeTool {
    kind: PathKind,
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<MutableStroke>,
}

impl DrawStrokeTool {
    pub fn new(kind: PathKind) -> Self {
        Self {
            kind,
            current_stroke: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }
}

impl Tool for DrawStrokeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            PathKind::Paint => "Brush",
            PathKind::Erase => "Eraser",
        }
    }

    fn kind(&self) -> ToolKind {
        match self.kind {
            PathKind::Paint => ToolKind::Brush,
            PathKind::Erase => ToolKind::Eraser,
        }
    }

    fn activate(&mut self, _surface: &DrawingSurface) {
        self.current_stroke = None;
    }

    fn deactivate(&mut self, _surface: &DrawingSurface) {
        self.current_stroke = None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command> {
        let brush = surface.brush();
        let mut stroke = MutableStroke::new(self.kind, brush.color, brush.width);
        stroke.add_point(pos);

        // A missed release leaves the previous stroke open; keep what was drawn
        let unfinished = self.current_stroke.replace(stroke)?;
        log::debug!(
            "{} stroke committed without a release ({} points)",
            self.name(),
            unfinished.points().len()
        );
        Some(Command::AddStroke(unfinished.into_record()))
    }

    fn on_pointer_move(&mut self, pos: Pos2, _surface: &DrawingSurface) -> Option<Command> {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(pos);
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, _surface: &DrawingSurface) -> Option<Command> {
        let mut stroke = self.current_stroke.take()?;
        stroke.add_point(pos);
        log::debug!(
            "{} stroke finished with {} points",
            self.name(),
            stroke.points().len()
        );
        Some(Command::AddStroke(stroke.into_record()))
    }

    fn preview(&self) -> Option<StrokeRecord> {
        self.current_stroke.as_ref().map(MutableStroke::to_preview)
    }
}
