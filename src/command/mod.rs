mod history;

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::stroke::{StrokeId, StrokeRecord};
use crate::surface::DrawingSurface;
use crate::tools::ToolKind;

pub use history::CommandHistory;

/// Discrete inputs that drive a coloring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    SelectTool(ToolKind),
    SelectColor(Color32),
    SetBrushSize(u32),
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    /// Commit a finished object to the surface
    AddStroke(StrokeRecord),
    Undo,
    Redo,
}

/// What applying a command changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Nothing visible changed
    Unchanged,
    /// Tool, color or size changed
    SettingsChanged,
    StrokeAdded(StrokeId),
    StrokeRemoved(StrokeId),
}

impl Command {
    /// Only surface edits go on the undo stack
    pub fn can_undo(&self) -> bool {
        matches!(self, Command::AddStroke(_))
    }

    /// Apply a surface edit. Session-level commands are ignored here.
    pub fn execute(&self, surface: &mut DrawingSurface) -> CommandOutcome {
        match self {
            Command::AddStroke(record) => CommandOutcome::StrokeAdded(surface.add(record.clone())),
            _ => CommandOutcome::Unchanged,
        }
    }

    pub fn undo(&self, surface: &mut DrawingSurface) -> CommandOutcome {
        match self {
            Command::AddStroke(_) => surface
                .remove_last()
                .map_or(CommandOutcome::Unchanged, |removed| {
                    CommandOutcome::StrokeRemoved(removed.id())
                }),
            _ => CommandOutcome::Unchanged,
        }
    }
}
