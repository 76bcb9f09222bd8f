//! Frame composition: overlay layers and the present transform.

use crate::buffer::{CanvasBuffer, Frame};
use crate::raster::{draw_handle, draw_object, outline_rect, skia_rect};
use crate::renderer::RenderContext;
use pixelink_core::geometry::{PixelPoint, PixelRect};
use pixelink_core::handles::{Corner, handle_rect};
use pixelink_core::loupe::Loupe;
use pixelink_core::shapes::{DrawingObject, Rgb};
use tiny_skia::Transform;

/// Dash length of the dotted overlay outlines.
const DOT: f32 = 2.0;
/// Width of the frame around the magnified loupe view.
const LOUPE_FRAME_WIDTH: i32 = 2;

/// One overlay drawn over the canvas buffer, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer<'a> {
    /// Shape still being dragged out, clipped to the active selection.
    Provisional {
        object: &'a DrawingObject,
        clip: Option<PixelRect>,
    },
    /// Dotted bounding box and corner handles of the selected object.
    ObjectHandles { bbox: PixelRect, half: i32 },
    /// Dotted selection rectangle and its corner handles.
    Selection { rect: PixelRect, half: i32 },
}

/// Overlays for the current canvas state, bottom to top.
pub fn layers<'a>(ctx: &RenderContext<'a>) -> Vec<Layer<'a>> {
    let canvas = ctx.canvas;
    let mut layers = Vec::new();
    if let Some(object) = canvas.provisional.as_ref() {
        layers.push(Layer::Provisional {
            object,
            clip: canvas.selection.active_rect(),
        });
    }
    if let Some(object) = canvas.selected_object() {
        layers.push(Layer::ObjectHandles {
            bbox: object.bounding_box(),
            half: ctx.object_handle_half,
        });
    }
    if let Some(rect) = canvas.selection.active_rect() {
        layers.push(Layer::Selection {
            rect,
            half: ctx.selection_handle_half,
        });
    }
    layers
}

/// Paint `layers` in order onto `target`.
pub fn compose(target: &mut CanvasBuffer, layers: &[Layer], ctx: &RenderContext) {
    let outline: Rgb = ctx.object_outline_color.into();
    let handle_fill: Rgb = ctx.object_handle_color.into();
    let selection: Rgb = ctx.selection_color.into();

    for layer in layers {
        match *layer {
            Layer::Provisional { object, clip } => {
                target.with_clip(clip, |t| draw_object(t, object));
            }
            Layer::ObjectHandles { bbox, half } => {
                outline_rect(target, bbox, outline, Some(DOT));
                for corner in Corner::ALL {
                    draw_handle(target, handle_rect(corner.of(bbox), half), handle_fill, outline);
                }
            }
            Layer::Selection { rect, half } => {
                outline_rect(target, rect, selection, Some(DOT));
                for corner in Corner::ALL {
                    draw_handle(target, handle_rect(corner.of(rect), half), selection, selection);
                }
            }
        }
    }
}

/// Copy the composed image to the display frame.
///
/// With the loupe active the view rectangle is stretched over the whole frame
/// using the same pixel mapping as pointer input, then framed.
pub fn present(source: &CanvasBuffer, frame: &mut Frame, loupe: &Loupe, frame_color: Rgb) {
    if !loupe.is_active() || loupe.view_rect().is_empty() {
        frame.copy_from(source);
        return;
    }

    let size = frame.size();
    for y in 0..size.height as i32 {
        for x in 0..size.width as i32 {
            let src = loupe.canvas_to_view(PixelPoint::new(x, y), size);
            if let Some(color) = source.pixel(src.x, src.y) {
                frame.put(x, y, color);
            }
        }
    }
    draw_frame(frame, frame_color);
}

/// Solid border of [`LOUPE_FRAME_WIDTH`] around the frame edge.
fn draw_frame(frame: &mut Frame, color: Rgb) {
    let b = frame.size().bounds();
    let w = LOUPE_FRAME_WIDTH;
    let strips = [
        PixelRect::new(b.left, b.top, b.right, b.top + w),
        PixelRect::new(b.left, b.bottom - w, b.right, b.bottom),
        PixelRect::new(b.left, b.top, b.left + w, b.bottom),
        PixelRect::new(b.right - w, b.top, b.right, b.bottom),
    ];
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    frame.with_clip(None, |f| {
        f.draw(|pixmap, mask| {
            for strip in strips.iter().filter_map(|s| skia_rect(*s)) {
                pixmap.fill_rect(strip, &paint, Transform::identity(), mask);
            }
        });
    });
}
