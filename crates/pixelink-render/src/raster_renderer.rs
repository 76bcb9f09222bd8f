//! Software renderer over a persistent canvas buffer.

use crate::buffer::{CanvasBuffer, Frame};
use crate::compose::{compose, layers, present};
use crate::raster::draw_object;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use pixelink_core::geometry::PixelSize;
use pixelink_core::shapes::Rgb;

/// Renders the canvas with tiny-skia.
///
/// Keeps three buffers of the canvas size: the canvas buffer holding every
/// placed object (ground truth for fills and export), a scratch buffer the
/// overlays are composed onto, and the display frame.
#[derive(Debug, Default)]
pub struct RasterRenderer {
    buffer: Option<CanvasBuffer>,
    scratch: Option<CanvasBuffer>,
    frame: Option<Frame>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The canvas buffer from the last successful render.
    pub fn canvas_buffer(&self) -> Option<&CanvasBuffer> {
        self.buffer.as_ref()
    }

    /// The display frame from the last successful render.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Canvas, scratch and frame buffers for `size`, reallocated when the
    /// canvas size changed.
    fn buffers(
        &mut self,
        size: PixelSize,
    ) -> RenderResult<(&mut CanvasBuffer, &mut CanvasBuffer, &mut Frame)> {
        if !self.buffer.as_ref().is_some_and(|b| b.size() == size) {
            // Drop stale buffers first so a failed allocation leaves nothing behind.
            self.buffer = None;
            self.scratch = None;
            self.frame = None;

            let buffer = CanvasBuffer::new(size)?;
            let scratch = CanvasBuffer::new(size)?;
            let frame = CanvasBuffer::new(size)?;
            log::debug!("Allocated {}x{} canvas buffers", size.width, size.height);
            self.buffer = Some(buffer);
            self.scratch = Some(scratch);
            self.frame = Some(frame);
        }
        match (self.buffer.as_mut(), self.scratch.as_mut(), self.frame.as_mut()) {
            (Some(buffer), Some(scratch), Some(frame)) => Ok((buffer, scratch, frame)),
            _ => Err(RendererError::Allocation("canvas buffers missing".to_string())),
        }
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<&Frame> {
        let canvas = ctx.canvas;
        let background: Rgb = self.background_color(ctx).into();
        let (buffer, scratch, frame) = match self.buffers(canvas.size()) {
            Ok(buffers) => buffers,
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return Err(e);
            }
        };

        buffer.clear(background);
        if canvas.loupe.is_drawing() {
            let view = canvas.loupe.view_rect();
            buffer.with_clip(Some(view), |b| {
                for object in canvas.store.iter() {
                    draw_object(b, object);
                }
            });
        } else {
            for object in canvas.store.iter() {
                buffer.with_clip(object.selection_clip, |b| draw_object(b, object));
            }
        }

        scratch.copy_from(buffer);
        compose(scratch, &layers(ctx), ctx);
        present(scratch, frame, &canvas.loupe, ctx.loupe_frame_color.into());
        Ok(frame)
    }
}
