use std::path::PathBuf;
use std::time::Duration;

use crate::acquisition::{self, ColoringImage, ImageRequest, ImageResolver, upload};
use crate::command::{Command, CommandOutcome};
use crate::config::{self, SessionConfig, ToolSettings};
use crate::error::{AcquisitionError, ExportError, LoadFailure, SessionError};
use crate::export::{ExportArtifact, ExportKind, SystemClipboard};
use crate::gallery::{ArtworkId, Gallery};
use crate::pages::{self, PageSetGenerator};
use crate::panels::{central_panel, status_panel, tools_panel};
use crate::renderer::Renderer;
use crate::session::{self, ColoringSession};
use crate::task::PendingTask;

type LoadResult = Result<(ColoringImage, Result<Vec<u8>, LoadFailure>), AcquisitionError>;

/// Picker state for the print dialog
#[derive(Debug, Clone)]
pub struct PrintOptions {
    pub count: usize,
    pub category: Option<String>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            count: pages::PAGE_COUNT_OPTIONS[0],
            category: None,
        }
    }
}

pub struct ColoringApp {
    session: ColoringSession,
    resolver: ImageResolver,
    renderer: Renderer,
    // Persisted between runs, applied whenever a new image becomes Ready
    settings: ToolSettings,
    generator: PageSetGenerator,
    gallery: Gallery,
    downloads: PathBuf,
    pending_load: Option<PendingTask<LoadResult>>,
    pending_export: Option<PendingTask<Result<ExportArtifact, ExportError>>>,
    pending_print: Option<PendingTask<Result<Vec<u8>, ExportError>>>,
    status: Option<String>,
    pub prompt: String,
    pub prompt_category: String,
    pub print: PrintOptions,
}

impl ColoringApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, SessionError> {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolSettings>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let mut app = Self::with_settings(startup_config(), settings)?;

        // Start on the first catalog entry so there is something to color
        app.open(ImageRequest::Catalog { id: "1".to_owned() });
        Ok(app)
    }

    pub fn with_settings(config: SessionConfig, settings: ToolSettings) -> Result<Self, SessionError> {
        let resolver = ImageResolver::new(&config);
        let downloads = config
            .downloads_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        let session = ColoringSession::new(config)?;
        Ok(Self {
            session,
            resolver,
            renderer: Renderer::new(),
            settings,
            generator: PageSetGenerator::default(),
            gallery: Gallery::new(),
            downloads,
            pending_load: None,
            pending_export: None,
            pending_print: None,
            status: None,
            prompt: String::new(),
            prompt_category: "animals".to_owned(),
            print: PrintOptions::default(),
        })
    }

    pub fn session(&self) -> &ColoringSession {
        &self.session
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn generator(&self) -> &PageSetGenerator {
        &self.generator
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending_load.is_some() || self.pending_export.is_some() || self.pending_print.is_some()
    }

    pub fn renderer_and_session(&mut self) -> (&mut Renderer, &ColoringSession) {
        (&mut self.renderer, &self.session)
    }

    fn report(&mut self, err: SessionError) {
        log::warn!("⚠️ {err}");
        self.status = Some(err.user_message());
    }

    fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.status = Some(message);
    }

    /// Apply a command, recording settings changes and surfacing errors
    pub fn apply(&mut self, command: Command) {
        match self.session.apply(command) {
            Ok(CommandOutcome::SettingsChanged) => {
                self.settings = ToolSettings {
                    tool: self.session.tool(),
                    color: self.session.active_color(),
                    brush_size: self.session.brush_size(),
                };
            }
            Ok(_) => {}
            Err(err) => self.report(err),
        }
    }

    fn apply_settings(&mut self) {
        let ToolSettings {
            tool,
            color,
            brush_size,
        } = self.settings.clone();
        for command in [
            Command::SelectTool(tool),
            Command::SelectColor(color),
            Command::SetBrushSize(brush_size),
        ] {
            if let Err(err) = self.session.apply(command) {
                self.report(err);
            }
        }
    }

    /// Start resolving a new coloring target in the background
    pub fn open(&mut self, request: ImageRequest) {
        if let Err(err) = self.session.validate_request(&request) {
            self.report(AcquisitionError::from(err).into());
            return;
        }
        if let Err(err) = self.session.begin_loading() {
            self.report(err);
            return;
        }
        self.status = Some("Loading your coloring page... 🎨".to_owned());

        let resolver = self.resolver.clone();
        self.pending_load = Some(PendingTask::spawn(async move {
            acquisition::acquire(&resolver, request).await
        }));
    }

    pub fn export(&mut self, kind: ExportKind) {
        match self.session.begin_export(kind) {
            Ok(job) => {
                self.pending_export = Some(PendingTask::spawn(async move { job.run() }));
            }
            Err(err) => self.report(err),
        }
    }

    /// Compose a printable page set. Runs beside the session and never
    /// touches its state.
    pub fn print_pages(&mut self) {
        if self.pending_print.is_some() {
            self.report(SessionError::ExportInProgress);
            return;
        }
        let pages = self
            .generator
            .generate(self.print.count, self.print.category.as_deref());
        let page_size = self.session.config().page_size;
        self.pending_print = Some(PendingTask::spawn(async move {
            pages::print_document(&pages, page_size)
        }));
    }

    fn poll_tasks(&mut self) {
        if let Some(result) = self.pending_load.as_ref().and_then(PendingTask::poll) {
            self.pending_load = None;
            self.settle_load(result);
        }

        if let Some(result) = self.pending_export.as_ref().and_then(PendingTask::poll) {
            self.pending_export = None;
            match self.session.complete_export(result) {
                Ok(artifact) => {
                    // Kept even if delivery fails, so it can be saved from the gallery
                    self.deliver(&artifact);
                    self.gallery.add(artifact, self.session.image().cloned());
                }
                Err(err) => self.report(err),
            }
        }

        if let Some(result) = self.pending_print.as_ref().and_then(PendingTask::poll) {
            self.pending_print = None;
            match result {
                Ok(bytes) => self.deliver(&ExportArtifact {
                    kind: ExportKind::Document,
                    file_name: "coloring-pages.pdf".to_owned(),
                    width: 0,
                    height: 0,
                    bytes,
                }),
                Err(err) => self.report(err.into()),
            }
        }
    }

    fn settle_load(&mut self, result: LoadResult) {
        let warning = match result {
            Ok((image, outline)) => match self.session.finish_loading(image, outline) {
                Ok(warning) => warning.map(SessionError::from),
                Err(err) => Some(err),
            },
            Err(err) => match self.session.fail_loading(err) {
                Ok(err) | Err(err) => Some(err),
            },
        };

        self.apply_settings();
        match warning {
            Some(err) => self.report(err),
            None => {
                let title = self
                    .session
                    .image()
                    .map_or("your picture", |image| image.title.as_str())
                    .to_owned();
                self.notify(format!("Ready to color {title}!"));
            }
        }
    }

    fn deliver(&mut self, artifact: &ExportArtifact) {
        match artifact.kind {
            ExportKind::Clipboard => {
                match session::deliver_to_clipboard(artifact, &mut SystemClipboard) {
                    Ok(()) => self.notify("Copied to clipboard! 📋"),
                    Err(err) => self.report(err),
                }
            }
            ExportKind::Image | ExportKind::Document => {
                match save_artifact(artifact, &self.downloads) {
                    Ok(location) => self.notify(format!("Saved {location} 💾")),
                    Err(err) => self.report(err.into()),
                }
            }
        }
    }

    /// Save a gallery artwork again. Clipboard copies are written as PNG.
    pub fn save_from_gallery(&mut self, id: ArtworkId) {
        let Some(item) = self.gallery.get(id) else {
            return;
        };
        match item.download() {
            Ok(file) => self.deliver(&file),
            Err(err) => self.report(err.into()),
        }
    }

    pub fn copy_from_gallery(&mut self, id: ArtworkId) {
        let Some(item) = self.gallery.get(id) else {
            return;
        };
        match item.clipboard_payload() {
            Ok(Some(payload)) => self.deliver(&payload),
            Ok(None) => self.notify("Documents can only be saved."),
            Err(err) => self.report(err.into()),
        }
    }

    pub fn like_in_gallery(&mut self, id: ArtworkId) {
        if let Some(likes) = self.gallery.like(id) {
            log::debug!("Artwork {id} has {likes} likes");
        }
    }

    pub fn remove_from_gallery(&mut self, id: ArtworkId) {
        if let Some(item) = self.gallery.remove(id) {
            self.notify(format!("Removed {} from the gallery", item.title));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // One load at a time; the last drop wins
        if let Some(file) = dropped.into_iter().last() {
            let file_name = if file.name.is_empty() {
                file.path
                    .as_ref()
                    .and_then(|path| path.file_name())
                    .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
            } else {
                file.name.clone()
            };
            let mime = if file.mime.is_empty() {
                upload::mime_from_file_name(&file_name).to_owned()
            } else {
                file.mime.clone()
            };

            let bytes = match (&file.bytes, &file.path) {
                (Some(bytes), _) => Ok(bytes.to_vec()),
                (None, Some(path)) => read_dropped(path),
                (None, None) => Err(LoadFailure::Unsupported(file_name.clone())),
            };
            match bytes {
                Ok(bytes) => self.open(ImageRequest::Upload {
                    file_name,
                    mime,
                    bytes,
                }),
                Err(err) => self.report(err.into()),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn startup_config() -> SessionConfig {
    match std::env::current_dir() {
        Ok(dir) => SessionConfig::load(&dir.join(config::CONFIG_FILE)),
        Err(err) => {
            log::warn!("⚠️ No working directory for config lookup: {err}");
            SessionConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn startup_config() -> SessionConfig {
    SessionConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn read_dropped(path: &std::path::Path) -> Result<Vec<u8>, LoadFailure> {
    Ok(std::fs::read(path)?)
}

#[cfg(target_arch = "wasm32")]
fn read_dropped(path: &std::path::Path) -> Result<Vec<u8>, LoadFailure> {
    Err(LoadFailure::Unsupported(path.display().to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_artifact(artifact: &ExportArtifact, dir: &std::path::Path) -> Result<String, ExportError> {
    let path = artifact.save_to(dir)?;
    Ok(path.display().to_string())
}

#[cfg(target_arch = "wasm32")]
fn save_artifact(artifact: &ExportArtifact, _dir: &std::path::Path) -> Result<String, ExportError> {
    Err(ExportError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("cannot save {} from the browser build", artifact.file_name),
    )))
}

impl eframe::App for ColoringApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        status_panel(self, ctx);
        central_panel(self, ctx);

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionState;
    use crate::tools::ToolKind;
    use std::time::Instant;

    fn wait_until_idle(app: &mut ColoringApp) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_busy() {
            assert!(Instant::now() < deadline, "background work never settled");
            std::thread::sleep(Duration::from_millis(5));
            app.poll_tasks();
        }
    }

    fn small_config() -> SessionConfig {
        SessionConfig {
            canvas_width: 80,
            canvas_height: 80,
            ..Default::default()
        }
    }

    #[test]
    fn test_settings_are_applied_after_loading() {
        let settings = ToolSettings {
            tool: ToolKind::Eraser,
            color: egui::Color32::RED,
            brush_size: 33,
        };
        let mut app = ColoringApp::with_settings(small_config(), settings).unwrap();
        app.open(ImageRequest::Catalog { id: "3".to_owned() });
        wait_until_idle(&mut app);

        assert_eq!(app.session().state(), SessionState::Ready);
        assert_eq!(app.session().tool(), ToolKind::Eraser);
        assert_eq!(app.session().brush_size(), 33);
        assert_eq!(app.status(), Some("Ready to color Beautiful Flower!"));
    }

    #[test]
    fn test_settings_changes_are_recorded() {
        let mut app = ColoringApp::with_settings(small_config(), ToolSettings::default()).unwrap();
        app.open(ImageRequest::Catalog { id: "1".to_owned() });
        wait_until_idle(&mut app);

        app.apply(Command::SetBrushSize(0));
        app.apply(Command::SelectTool(ToolKind::Fill));
        assert_eq!(app.settings().brush_size, 1);
        assert_eq!(app.settings().tool, ToolKind::Fill);
    }

    #[test]
    fn test_rejected_upload_reports_message() {
        let mut app = ColoringApp::with_settings(small_config(), ToolSettings::default()).unwrap();
        app.open(ImageRequest::Upload {
            file_name: "notes.txt".to_owned(),
            mime: "text/plain".to_owned(),
            bytes: vec![1, 2, 3],
        });
        assert!(!app.is_busy());
        assert_eq!(app.session().state(), SessionState::Uninitialized);
        assert!(app.status().unwrap_or_default().starts_with("Please select an image file!"));
    }

    #[test]
    fn test_unknown_catalog_id_still_becomes_ready() {
        let mut app = ColoringApp::with_settings(small_config(), ToolSettings::default()).unwrap();
        app.open(ImageRequest::Catalog { id: "404".to_owned() });
        wait_until_idle(&mut app);

        assert_eq!(app.session().state(), SessionState::Ready);
        assert!(app.session().surface().background().is_placeholder());
        assert_eq!(app.status(), Some("Image not found! 😢"));
    }

    #[test]
    fn test_exports_are_collected_in_gallery() {
        let downloads = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            downloads_dir: Some(downloads.path().to_path_buf()),
            ..small_config()
        };
        let mut app = ColoringApp::with_settings(config, ToolSettings::default()).unwrap();
        app.open(ImageRequest::Catalog { id: "1".to_owned() });
        wait_until_idle(&mut app);
        assert!(app.gallery().is_empty());

        app.export(ExportKind::Image);
        wait_until_idle(&mut app);
        app.export(ExportKind::Document);
        wait_until_idle(&mut app);

        let items = app.gallery().items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.title == "Happy Cat"));
        assert_eq!(items[0].artwork.kind, ExportKind::Image);
        assert!(items[0].can_copy());
        assert!(!items[1].can_copy());

        let png = downloads.path().join("coloring-Happy-Cat.png");
        std::fs::remove_file(&png).unwrap();
        let id = items[0].id;
        app.save_from_gallery(id);
        assert!(png.exists());
        assert!(app.status().unwrap_or_default().starts_with("Saved"));

        app.like_in_gallery(id);
        assert_eq!(app.gallery().get(id).map(|item| item.likes), Some(1));
        app.remove_from_gallery(id);
        assert_eq!(app.gallery().len(), 1);
    }

    #[test]
    fn test_open_while_loading_asks_to_wait() {
        let mut app = ColoringApp::with_settings(small_config(), ToolSettings::default()).unwrap();
        app.open(ImageRequest::Catalog { id: "1".to_owned() });
        app.open(ImageRequest::Catalog { id: "2".to_owned() });
        assert_eq!(app.status(), Some("Hang on, still loading your picture!"));

        wait_until_idle(&mut app);
        assert_eq!(app.session().image().map(|image| image.id.as_str()), Some("1"));
    }

    #[test]
    fn test_redo_reports_not_available() {
        let mut app = ColoringApp::with_settings(small_config(), ToolSettings::default()).unwrap();
        app.apply(Command::Redo);
        assert_eq!(app.status(), Some("Redo is not available."));
    }
}
