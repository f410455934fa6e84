use thiserror::Error;

use crate::state::SessionState;

/// Errors that can occur during session state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// The outline image could not be made available. Never fatal: the session
/// substitutes a placeholder and keeps going.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("outline image not found: {0}")]
    NotFound(String),
    #[error("outline image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    #[error("outline image could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported outline source: {0}")]
    Unsupported(String),
}

/// Rejections that happen before an upload is processed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an image file! ({mime} is not an image)")]
    UnsupportedType { mime: String },
    #[error("File is too large! Please select an image smaller than {}MB.", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("coloring image not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Load(#[from] LoadFailure),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to compose document: {0}")]
    Document(String),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("artwork pixels do not match its {width}x{height} size")]
    Malformed { width: u32, height: u32 },
}

impl From<lopdf::Error> for ExportError {
    fn from(error: lopdf::Error) -> Self {
        ExportError::Document(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard access was denied")]
    PermissionDenied,
    #[error("no clipboard is available on this platform")]
    Unavailable,
    #[error("clipboard error: {0}")]
    Backend(String),
}

/// Umbrella error for everything a [`crate::ColoringSession`] can report
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is not ready (currently {0:?})")]
    NotReady(SessionState),
    #[error("an export is already in progress")]
    ExportInProgress,
    #[error("redo is not available")]
    RedoUnavailable,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Load(#[from] LoadFailure),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    #[error(transparent)]
    Surface(#[from] crate::surface::SurfaceError),
}

impl SessionError {
    /// Text shown to the user in the status line
    pub fn user_message(&self) -> String {
        match self {
            SessionError::NotReady(SessionState::Loading) => {
                "Loading your coloring page... 🎨".to_owned()
            }
            SessionError::NotReady(_) => "Pick a picture to color first!".to_owned(),
            SessionError::ExportInProgress => "Hang on, still saving your artwork!".to_owned(),
            SessionError::RedoUnavailable => "Redo is not available.".to_owned(),
            SessionError::Clipboard(_) => {
                "Failed to copy to clipboard. Try saving instead!".to_owned()
            }
            SessionError::Export(err) => format!("Could not save your artwork: {err}"),
            SessionError::Load(err) => format!("Showing a placeholder picture: {err}"),
            SessionError::Acquisition(AcquisitionError::Validation(err)) => err.to_string(),
            SessionError::Acquisition(AcquisitionError::NotFound(_)) => {
                "Image not found! 😢".to_owned()
            }
            SessionError::Acquisition(err) => err.to_string(),
            SessionError::Transition(TransitionError::InvalidStateTransition {
                from: "Loading",
                ..
            }) => "Hang on, still loading your picture!".to_owned(),
            SessionError::Transition(TransitionError::InvalidStateTransition {
                from: "Exporting",
                ..
            }) => "Hang on, still saving your artwork!".to_owned(),
            SessionError::Transition(_) => "Oops! Please try that again.".to_owned(),
            SessionError::Surface(err) => err.to_string(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::TooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "File is too large! Please select an image smaller than 10MB."
        );

        let err = ValidationError::UnsupportedType {
            mime: "text/plain".to_owned(),
        };
        assert!(err.to_string().starts_with("Please select an image file!"));
    }

    #[test]
    fn test_transition_messages_are_friendly() {
        let busy = |from: &'static str| {
            SessionError::from(TransitionError::InvalidStateTransition { from, to: "Loading" })
                .user_message()
        };
        assert_eq!(busy("Loading"), "Hang on, still loading your picture!");
        assert_eq!(busy("Exporting"), "Hang on, still saving your artwork!");
        assert!(!busy("Ready").contains("transition"));
    }

    #[test]
    fn test_clipboard_message_suggests_saving() {
        let err = SessionError::from(ClipboardError::PermissionDenied);
        assert!(err.user_message().contains("Try saving instead"));
    }
}
