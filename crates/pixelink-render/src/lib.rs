//! PixelInk Render Library
//!
//! Raster pipeline for the PixelInk canvas: replays drawing objects into an
//! off-screen buffer with tiny-skia, composes the editing overlays, presents
//! the (optionally magnified) frame and encodes the buffer to image files.

mod buffer;
mod compose;
mod export;
mod raster;
mod raster_renderer;
mod renderer;

pub use buffer::{CanvasBuffer, Frame};
pub use compose::{Layer, compose, layers, present};
pub use export::{ExportError, ExportResult, FileEncoder, ImageEncoder, ImageFormat};
pub use raster::{brush_path, draw_object, to_skia_path};
pub use raster_renderer::RasterRenderer;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
