use egui::{Color32, Pos2};

use crate::acquisition::{self, ColoringImage, ImageRequest, ImageSource, upload};
use crate::command::{Command, CommandHistory, CommandOutcome};
use crate::config::{self, SessionConfig};
use crate::error::{
    AcquisitionError, ExportError, LoadFailure, SessionError, SessionResult, TransitionError,
    ValidationError,
};
use crate::export::{ClipboardSink, ExportArtifact, ExportJob, ExportKind};
use crate::state::SessionState;
use crate::stroke::StrokeRecord;
use crate::surface::{BackgroundImage, DrawingSurface};
use crate::tools::{Tool, ToolKind, ToolType};

/// In-memory state of one coloring interaction.
///
/// Every mutation goes through a discrete method (or [`ColoringSession::apply`])
/// and is validated against the [`SessionState`]. Nothing here is persisted.
pub struct ColoringSession {
    config: SessionConfig,
    state: SessionState,
    tool: ToolType,
    brush_size: u32,
    active_color: Color32,
    surface: DrawingSurface,
    history: CommandHistory,
    image: Option<ColoringImage>,
}

impl std::fmt::Debug for ColoringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColoringSession")
            .field("state", &self.state)
            .field("tool", &self.tool.kind())
            .field("brush_size", &self.brush_size)
            .field("active_color", &self.active_color)
            .field("surface", &self.surface)
            .field("image", &self.image.as_ref().map(|image| &image.id))
            .finish()
    }
}

impl ColoringSession {
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        let surface = DrawingSurface::new(
            config.canvas_width,
            config.canvas_height,
            config.background_color,
            config.fill_tolerance,
        )?;
        let mut session = Self {
            state: SessionState::Uninitialized,
            tool: ToolType::new_instance(ToolKind::Brush),
            brush_size: config::clamp_brush_size(config.default_brush_size),
            active_color: config.default_color,
            surface,
            history: CommandHistory::new(),
            image: None,
            config,
        };
        session.configure_brush();
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tool(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn active_color(&self) -> Color32 {
        self.active_color
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn image(&self) -> Option<&ColoringImage> {
        self.image.as_ref()
    }

    pub fn strokes(&self) -> &[StrokeRecord] {
        self.surface.objects()
    }

    /// The object currently being drawn, not yet committed
    pub fn preview(&self) -> Option<StrokeRecord> {
        self.tool.preview()
    }

    fn transition_to(&mut self, new_state: SessionState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(new_state) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        log::info!("Session {} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
        Ok(())
    }

    fn require_ready(&self) -> SessionResult<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            state => Err(SessionError::NotReady(state)),
        }
    }

    /// Brush and eraser share the free-draw brush; only the color differs
    fn configure_brush(&mut self) {
        let color = match self.tool.kind() {
            ToolKind::Eraser => self.surface.background_color(),
            ToolKind::Brush | ToolKind::Fill => self.active_color,
        };
        self.surface.set_brush(color, self.brush_size as f32);
    }

    // ---- loading -------------------------------------------------------

    /// Checks that must pass before a request is processed at all
    pub fn validate_request(&self, request: &ImageRequest) -> Result<(), ValidationError> {
        match request {
            ImageRequest::Upload { mime, bytes, .. } => {
                upload::validate_upload(mime, bytes.len(), self.config.max_upload_bytes)
            }
            ImageRequest::Catalog { .. } | ImageRequest::Generate { .. } => Ok(()),
        }
    }

    pub fn begin_loading(&mut self) -> SessionResult<()> {
        self.transition_to(SessionState::Loading)?;
        Ok(())
    }

    /// Install the resolved image. A failed outline is replaced by a
    /// placeholder and returned as a warning; the session is Ready either way.
    pub fn finish_loading(
        &mut self,
        image: ColoringImage,
        outline: Result<Vec<u8>, LoadFailure>,
    ) -> SessionResult<Option<LoadFailure>> {
        if !self.state.is_loading() {
            return Err(SessionError::NotReady(self.state));
        }

        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let url = image.outline_image_url.clone();
        let (background, warning) = match outline
            .and_then(|bytes| BackgroundImage::decode(&url, &bytes, width))
        {
            Ok(background) => (background, None),
            Err(failure) => {
                log::warn!("⚠️ Could not load outline for {}: {failure}", image.id);
                (BackgroundImage::placeholder(&url, width, height), Some(failure))
            }
        };

        self.install_background(background)?;
        self.image = Some(image);
        self.transition_to(SessionState::Ready)?;
        Ok(warning)
    }

    /// Resolution failed outright. The session still becomes usable, on a
    /// placeholder, and the error is handed back for display.
    pub fn fail_loading(&mut self, error: AcquisitionError) -> SessionResult<SessionError> {
        if !self.state.is_loading() {
            return Err(SessionError::NotReady(self.state));
        }
        log::warn!("⚠️ Could not resolve coloring image: {error}");
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        self.install_background(BackgroundImage::placeholder("", width, height))?;
        self.image = None;
        self.transition_to(SessionState::Ready)?;
        Ok(error.into())
    }

    fn install_background(&mut self, background: BackgroundImage) -> SessionResult<()> {
        self.surface.set_background(background)?;
        self.history.clear();
        let kind = self.tool.kind();
        self.tool.deactivate(&self.surface);
        self.tool = ToolType::new_instance(kind);
        self.tool.activate(&self.surface);
        self.configure_brush();
        Ok(())
    }

    /// Validate, resolve and load in one go. Validation failures leave the
    /// session untouched.
    pub async fn open(
        &mut self,
        source: &dyn ImageSource,
        request: ImageRequest,
    ) -> SessionResult<Option<SessionError>> {
        self.validate_request(&request)
            .map_err(AcquisitionError::from)?;
        self.begin_loading()?;
        match acquisition::acquire(source, request).await {
            Ok((image, outline)) => Ok(self
                .finish_loading(image, outline)?
                .map(SessionError::from)),
            Err(error) => Ok(Some(self.fail_loading(error)?)),
        }
    }

    // ---- tools ---------------------------------------------------------

    pub fn select_tool(&mut self, kind: ToolKind) -> SessionResult<CommandOutcome> {
        self.require_ready()?;
        if self.tool.is_drawing() {
            log::debug!("Switching tools drops the {} stroke in progress", self.tool.name());
        }
        self.tool.deactivate(&self.surface);
        self.tool = ToolType::new_instance(kind);
        self.tool.activate(&self.surface);
        self.configure_brush();
        log::info!("🛠️ Tool: {}", self.tool.name());
        Ok(CommandOutcome::SettingsChanged)
    }

    /// Only affects strokes started afterwards
    pub fn select_color(&mut self, color: Color32) -> SessionResult<CommandOutcome> {
        self.require_ready()?;
        self.active_color = color;
        self.configure_brush();
        Ok(CommandOutcome::SettingsChanged)
    }

    /// Returns the stored size, clamped to the supported range
    pub fn set_brush_size(&mut self, size: u32) -> SessionResult<u32> {
        self.require_ready()?;
        self.brush_size = config::clamp_brush_size(size);
        self.configure_brush();
        Ok(self.brush_size)
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> SessionResult<CommandOutcome> {
        self.require_ready()?;
        let command = self.tool.on_pointer_down(pos, &self.surface);
        Ok(self.commit(command))
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> SessionResult<CommandOutcome> {
        self.require_ready()?;
        let command = self.tool.on_pointer_move(pos, &self.surface);
        Ok(self.commit(command))
    }

    pub fn pointer_up(&mut self, pos: Pos2) -> SessionResult<CommandOutcome> {
        self.require_ready()?;
        let command = self.tool.on_pointer_up(pos, &self.surface);
        Ok(self.commit(command))
    }

    fn commit(&mut self, command: Option<Command>) -> CommandOutcome {
        match command {
            Some(command) => self.history.execute(command, &mut self.surface),
            None => CommandOutcome::Unchanged,
        }
    }

    /// Remove the most recent object. The background is never removed.
    pub fn undo(&mut self) -> SessionResult<CommandOutcome> {
        self.require_ready()?;
        Ok(self.history.undo(&mut self.surface))
    }

    pub fn redo(&mut self) -> SessionResult<CommandOutcome> {
        self.history.redo(&mut self.surface)
    }

    pub fn apply(&mut self, command: Command) -> SessionResult<CommandOutcome> {
        match command {
            Command::SelectTool(kind) => self.select_tool(kind),
            Command::SelectColor(color) => self.select_color(color),
            Command::SetBrushSize(size) => self
                .set_brush_size(size)
                .map(|_| CommandOutcome::SettingsChanged),
            Command::PointerDown(pos) => self.pointer_down(pos),
            Command::PointerMove(pos) => self.pointer_move(pos),
            Command::PointerUp(pos) => self.pointer_up(pos),
            command @ Command::AddStroke(_) => {
                self.require_ready()?;
                Ok(self.commit(Some(command)))
            }
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
        }
    }

    // ---- export --------------------------------------------------------

    /// Snapshot the surface and enter `Exporting`. Exactly one export can be
    /// in flight; settle it with [`ColoringSession::complete_export`].
    pub fn begin_export(&mut self, kind: ExportKind) -> SessionResult<ExportJob> {
        if self.state.is_exporting() {
            return Err(SessionError::ExportInProgress);
        }
        self.require_ready()?;
        self.transition_to(SessionState::Exporting)?;

        let title = self
            .image
            .as_ref()
            .map_or("artwork", |image| image.title.as_str());
        log::info!("📦 Exporting {title} as {kind:?}");
        Ok(ExportJob::new(
            kind,
            title,
            self.config.page_size,
            self.surface.snapshot(),
        ))
    }

    /// Return to `Ready`, whatever the outcome
    pub fn complete_export(
        &mut self,
        result: Result<ExportArtifact, ExportError>,
    ) -> SessionResult<ExportArtifact> {
        self.transition_to(SessionState::Ready)?;
        match result {
            Ok(artifact) => Ok(artifact),
            Err(err) => {
                log::warn!("⚠️ Export failed: {err}");
                Err(err.into())
            }
        }
    }

    pub fn export_as_image(&mut self) -> SessionResult<ExportArtifact> {
        let job = self.begin_export(ExportKind::Image)?;
        self.complete_export(job.run())
    }

    pub fn export_as_document(&mut self) -> SessionResult<ExportArtifact> {
        let job = self.begin_export(ExportKind::Document)?;
        self.complete_export(job.run())
    }

    pub fn export_as_clipboard_payload(
        &mut self,
        sink: &mut dyn ClipboardSink,
    ) -> SessionResult<ExportArtifact> {
        let job = self.begin_export(ExportKind::Clipboard)?;
        let artifact = self.complete_export(job.run())?;
        deliver_to_clipboard(&artifact, sink)?;
        Ok(artifact)
    }
}

/// Push a clipboard artifact to the sink
pub fn deliver_to_clipboard(
    artifact: &ExportArtifact,
    sink: &mut dyn ClipboardSink,
) -> SessionResult<()> {
    sink.set_image(
        artifact.width as usize,
        artifact.height as usize,
        &artifact.bytes,
    )
    .map_err(|err| {
        log::warn!("⚠️ Clipboard refused the artwork: {err}");
        SessionError::from(err)
    })
}
