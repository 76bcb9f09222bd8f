//! Renderer trait abstraction.

use crate::buffer::Frame;
use peniko::Color;
use pixelink_core::canvas::Canvas;
use pixelink_core::config::EditorConfig;
use pixelink_core::handles::{OBJECT_HANDLE_HALF, SELECTION_HANDLE_HALF};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    /// A pixel buffer could not be allocated (zero-size or too large canvas).
    #[error("Allocation failed: {0}")]
    Allocation(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Color the canvas buffer is cleared to.
    pub background_color: Color,
    /// Outline of the selected object's bounding box.
    pub object_outline_color: Color,
    /// Fill of the selected object's handles.
    pub object_handle_color: Color,
    /// Outline and handles of the selection rectangle.
    pub selection_color: Color,
    /// Frame drawn around the magnified loupe view.
    pub loupe_frame_color: Color,
    pub object_handle_half: i32,
    pub selection_handle_half: i32,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            background_color: Color::WHITE,
            object_outline_color: Color::BLACK,
            object_handle_color: Color::WHITE,
            selection_color: Color::from_rgba8(0, 0, 255, 255),
            loupe_frame_color: Color::from_rgba8(255, 0, 0, 255),
            object_handle_half: OBJECT_HANDLE_HALF,
            selection_handle_half: SELECTION_HANDLE_HALF,
        }
    }

    /// Take background and handle sizes from the editor configuration.
    pub fn with_config(self, config: &EditorConfig) -> Self {
        self.with_background(config.background.into())
            .with_handle_sizes(config.object_handle_half, config.selection_handle_half)
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the half-widths of object and selection handles.
    pub fn with_handle_sizes(mut self, object_half: i32, selection_half: i32) -> Self {
        self.object_handle_half = object_half;
        self.selection_handle_half = selection_half;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Render the canvas and return the display frame.
    ///
    /// On error the frame is skipped; the next call retries from scratch.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<&Frame>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
