use super::{Command, CommandOutcome};
use crate::error::{SessionError, SessionResult};
use crate::surface::DrawingSurface;

/// Undo-only history of surface edits. Redo is deliberately not kept.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and add it to the history if it is undoable
    pub fn execute(&mut self, command: Command, surface: &mut DrawingSurface) -> CommandOutcome {
        let outcome = command.execute(surface);
        if command.can_undo() {
            self.undo_stack.push(command);
        }
        outcome
    }

    /// Undo the last surface edit. No-op when only the background is left.
    pub fn undo(&mut self, surface: &mut DrawingSurface) -> CommandOutcome {
        match self.undo_stack.pop() {
            Some(command) => command.undo(surface),
            None => CommandOutcome::Unchanged,
        }
    }

    pub fn redo(&mut self, _surface: &mut DrawingSurface) -> SessionResult<CommandOutcome> {
        Err(SessionError::RedoUnavailable)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        false
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeRecord;
    use egui::{Color32, Pos2};

    #[test]
    fn test_undo_converges_to_background() {
        let mut surface = DrawingSurface::new(20, 20, Color32::WHITE, 32).unwrap();
        let mut history = CommandHistory::new();

        for i in 0..3 {
            let record = StrokeRecord::fill(Pos2::new(i as f32, 0.0), Color32::RED);
            history.execute(Command::AddStroke(record), &mut surface);
        }
        assert_eq!(surface.stroke_count(), 3);

        for expected in (0..3).rev() {
            assert!(matches!(
                history.undo(&mut surface),
                CommandOutcome::StrokeRemoved(_)
            ));
            assert_eq!(surface.stroke_count(), expected);
        }

        assert_eq!(history.undo(&mut surface), CommandOutcome::Unchanged);
        assert_eq!(surface.object_count(), 1);
    }

    #[test]
    fn test_redo_is_not_available() {
        let mut surface = DrawingSurface::new(20, 20, Color32::WHITE, 32).unwrap();
        let mut history = CommandHistory::new();
        history.execute(
            Command::AddStroke(StrokeRecord::fill(Pos2::ZERO, Color32::RED)),
            &mut surface,
        );
        history.undo(&mut surface);

        assert!(!history.can_redo());
        assert!(matches!(
            history.redo(&mut surface),
            Err(SessionError::RedoUnavailable)
        ));
        assert_eq!(surface.stroke_count(), 0);
    }

    #[test]
    fn test_settings_commands_are_not_recorded() {
        let mut surface = DrawingSurface::new(20, 20, Color32::WHITE, 32).unwrap();
        let mut history = CommandHistory::new();
        history.execute(Command::SetBrushSize(4), &mut surface);
        assert!(!history.can_undo());
    }
}
