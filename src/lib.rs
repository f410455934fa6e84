#![warn(clippy::all, rust_2018_idioms)]

pub mod acquisition;
pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod gallery;
pub mod pages;
pub mod palette;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod task;
pub mod tools;

pub use acquisition::{ColoringImage, Difficulty, ImageRequest, ImageResolver, ImageSource};
pub use app::ColoringApp;
pub use command::{Command, CommandHistory, CommandOutcome};
pub use config::{SessionConfig, ToolSettings};
pub use error::{SessionError, SessionResult};
pub use export::{ExportArtifact, ExportKind};
pub use gallery::{Gallery, GalleryItem};
pub use pages::{Page, PageSetGenerator};
pub use renderer::Renderer;
pub use session::ColoringSession;
pub use state::SessionState;
pub use stroke::{StrokeId, StrokeRecord};
pub use surface::DrawingSurface;
pub use tools::{Tool, ToolKind};
