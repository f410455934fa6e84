use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::stroke::{PathKind, StrokeRecord};
use crate::surface::DrawingSurface;

/// The tools a child can pick from. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Fill,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Brush, ToolKind::Fill, ToolKind::Eraser];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Brush => "🖌 Brush",
            ToolKind::Fill => "🪣 Fill",
            ToolKind::Eraser => "⌫ Eraser",
        }
    }
}

/// Tool trait defines how pointer input on the surface becomes commands
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    fn kind(&self) -> ToolKind;

    /// Called when the tool is selected (activated).
    /// Can be used to initialize or reset tool state.
    fn activate(&mut self, _surface: &DrawingSurface) {
        // default: do nothing
    }

    /// Called when the tool is deselected (deactivated).
    /// Must drop any in-progress preview.
    fn deactivate(&mut self, surface: &DrawingSurface);

    /// Handle pointer press on the canvas.
    fn on_pointer_down(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down.
    fn on_pointer_move(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command>;

    /// Handle pointer release. Return a Command to **finalize** an action.
    fn on_pointer_up(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command>;

    /// The in-progress object, if any, for live rendering
    fn preview(&self) -> Option<StrokeRecord> {
        None
    }
}

mod draw_stroke_tool;
pub use draw_stroke_tool::DrawStrokeTool;

mod fill_tool;
pub use fill_tool::FillTool;

/// Enum dispatch over the concrete tools, avoiding `Box<dyn Tool>`
#[derive(Debug, Clone)]
pub enum ToolType {
    DrawStroke(DrawStrokeTool),
    Fill(FillTool),
}

impl ToolType {
    pub fn new_instance(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Brush => Self::DrawStroke(DrawStrokeTool::new(PathKind::Paint)),
            ToolKind::Eraser => Self::DrawStroke(DrawStrokeTool::new(PathKind::Erase)),
            ToolKind::Fill => Self::Fill(FillTool::new()),
        }
    }

    pub fn is_drawing(&self) -> bool {
        match self {
            Self::DrawStroke(tool) => tool.is_drawing(),
            Self::Fill(_) => false,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::DrawStroke(tool) => tool.name(),
            Self::Fill(tool) => tool.name(),
        }
    }

    fn kind(&self) -> ToolKind {
        match self {
            Self::DrawStroke(tool) => tool.kind(),
            Self::Fill(tool) => tool.kind(),
        }
    }

    fn activate(&mut self, surface: &DrawingSurface) {
        match self {
            Self::DrawStroke(tool) => tool.activate(surface),
            Self::Fill(tool) => tool.activate(surface),
        }
    }

    fn deactivate(&mut self, surface: &DrawingSurface) {
        match self {
            Self::DrawStroke(tool) => tool.deactivate(surface),
            Self::Fill(tool) => tool.deactivate(surface),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_down(pos, surface),
            Self::Fill(tool) => tool.on_pointer_down(pos, surface),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_move(pos, surface),
            Self::Fill(tool) => tool.on_pointer_move(pos, surface),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, surface: &DrawingSurface) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_up(pos, surface),
            Self::Fill(tool) => tool.on_pointer_up(pos, surface),
        }
    }

    fn preview(&self) -> Option<StrokeRecord> {
        match self {
            Self::DrawStroke(tool) => tool.preview(),
            Self::Fill(tool) => tool.preview(),
        }
    }
}
