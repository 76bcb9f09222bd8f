//! Host-facing editor facade.
//!
//! Owns the canvas, the tool session, the input controller and the renderer,
//! and exposes one method per host event. Event methods return whether a
//! redraw is needed; the host then calls [`Editor::rendered_frame`].

use crate::error::{AppError, AppResult};
use crate::host::{ColorPicker, SaveDialog};
use pixelink_core::{
    BrushShape, ButtonState, Canvas, EditorConfig, EditorSession, InputController, Key,
    PixelPoint, PixelSize, PointerEvent, ResizeHandle, Rgb, ToolKind,
};
use pixelink_render::{
    FileEncoder, Frame, ImageEncoder, RasterRenderer, RenderContext, Renderer, RendererError,
};
use std::path::{Path, PathBuf};

/// The editing core wired to a renderer and an image encoder.
pub struct Editor {
    config: EditorConfig,
    canvas: Canvas,
    session: EditorSession,
    controller: InputController,
    renderer: RasterRenderer,
    encoder: Box<dyn ImageEncoder>,
    dirty: bool,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("canvas_size", &self.canvas.size())
            .field("objects", &self.canvas.store.len())
            .field("tool", &self.session.tool)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Editor {
    /// Create an editor for a window of the given client size.
    pub fn new(config: EditorConfig, window_width: u32, window_height: u32) -> Self {
        let size = canvas_size(&config, window_width, window_height);
        log::info!("Editor started with a {}x{} canvas", size.width, size.height);
        Self {
            canvas: Canvas::with_config(size, &config),
            session: EditorSession::from_config(&config),
            controller: InputController::from_config(&config),
            renderer: RasterRenderer::new(),
            encoder: Box::new(FileEncoder),
            dirty: true,
            config,
        }
    }

    /// Replace the image encoder used for saving.
    pub fn with_encoder(mut self, encoder: Box<dyn ImageEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Whether the display frame is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Resize handle under the idle pointer, for cursor feedback.
    pub fn hover_handle(&self) -> ResizeHandle {
        self.controller.hover_handle()
    }

    fn touch(&mut self, changed: bool) -> bool {
        self.dirty |= changed;
        changed
    }

    pub fn on_pointer_down(&mut self, point: PixelPoint, buttons: ButtonState) -> bool {
        let changed = self
            .controller
            .pointer_down(&mut self.canvas, &self.session, point, buttons);
        self.touch(changed)
    }

    pub fn on_pointer_move(&mut self, point: PixelPoint, buttons: ButtonState) -> bool {
        let changed = self
            .controller
            .pointer_move(&mut self.canvas, &self.session, point, buttons);
        self.touch(changed)
    }

    pub fn on_pointer_up(&mut self, point: PixelPoint) -> bool {
        let changed = self.controller.pointer_up(&mut self.canvas, point);
        self.touch(changed)
    }

    /// Dispatch a pointer event.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, buttons } => self.on_pointer_down(position, buttons),
            PointerEvent::Move { position, buttons } => self.on_pointer_move(position, buttons),
            PointerEvent::Up { position } => self.on_pointer_up(position),
        }
    }

    pub fn on_key(&mut self, key: Key) -> bool {
        match key {
            Key::Escape => self.on_escape(),
        }
    }

    pub fn on_tool_selected(&mut self, tool: ToolKind) -> bool {
        let changed = self
            .controller
            .select_tool(&mut self.canvas, &mut self.session, tool);
        self.touch(changed)
    }

    pub fn on_color_chosen(&mut self, color: Rgb) {
        self.session.color = color;
        log::debug!("Color set to ({}, {}, {})", color.r, color.g, color.b);
    }

    /// Set the stroke thickness. Returns the clamped value in effect.
    pub fn on_thickness_changed(&mut self, thickness: u32) -> u32 {
        let applied = self.session.set_thickness(thickness);
        if applied != thickness {
            log::debug!("Thickness {} clamped to {}", thickness, applied);
        }
        applied
    }

    pub fn on_brush_shape_changed(&mut self, shape: BrushShape) {
        self.session.brush_shape = shape;
    }

    /// Remove every object and reset selection and loupe.
    pub fn on_clear(&mut self) -> bool {
        self.controller.cancel(&mut self.canvas);
        self.canvas.clear();
        log::info!("Canvas cleared");
        self.touch(true)
    }

    /// Abandon the current gesture, then dismiss the selection or the loupe.
    pub fn on_escape(&mut self) -> bool {
        let busy = self.controller.is_busy();
        if busy {
            self.controller.cancel(&mut self.canvas);
        }
        let dismissed = self.canvas.escape();
        self.touch(busy || dismissed)
    }

    /// Recompute the canvas from the window client size.
    pub fn on_resize(&mut self, window_width: u32, window_height: u32) -> bool {
        let size = canvas_size(&self.config, window_width, window_height);
        if size == self.canvas.size() {
            return false;
        }
        self.canvas.set_size(size);
        log::info!("Canvas resized to {}x{}", size.width, size.height);
        self.touch(true)
    }

    /// Ask the host for a color and apply it. Returns whether one was chosen.
    pub fn on_color_requested(&mut self, picker: &mut dyn ColorPicker) -> bool {
        match picker.pick_color(self.session.color) {
            Some(color) => {
                self.on_color_chosen(color);
                true
            }
            None => false,
        }
    }

    /// Ask the host for a path and save the canvas there.
    ///
    /// Returns the path written, or `None` when the dialog was cancelled.
    pub fn on_save_requested(&mut self, dialog: &mut dyn SaveDialog) -> AppResult<Option<PathBuf>> {
        let Some(path) = dialog.choose_path() else {
            log::debug!("Save cancelled");
            return Ok(None);
        };
        self.save_to(&path)?;
        Ok(Some(path))
    }

    /// Encode the canvas buffer, without overlays, to `path`.
    pub fn save_to(&mut self, path: &Path) -> AppResult<()> {
        self.render()?;
        let buffer = self
            .renderer
            .canvas_buffer()
            .ok_or_else(|| RendererError::Allocation("no canvas buffer".to_string()))?;
        self.encoder.encode(buffer, path).map_err(|e| {
            log::warn!("Saving {} failed: {}", path.display(), e);
            AppError::from(e)
        })
    }

    /// Render if anything changed and return the display frame.
    pub fn rendered_frame(&mut self) -> AppResult<&Frame> {
        if self.dirty || self.renderer.frame().is_none() {
            self.render()?;
        }
        self.renderer
            .frame()
            .ok_or_else(|| RendererError::Allocation("no display frame".to_string()).into())
    }

    fn render(&mut self) -> AppResult<()> {
        let ctx = RenderContext::new(&self.canvas).with_config(&self.config);
        self.renderer.render(&ctx)?;
        self.dirty = false;
        Ok(())
    }
}

/// Window client size minus the chrome.
fn canvas_size(config: &EditorConfig, window_width: u32, window_height: u32) -> PixelSize {
    PixelSize::new(
        window_width.saturating_sub(config.chrome.sidebar_width),
        window_height.saturating_sub(config.chrome.toolbar_height),
    )
}
