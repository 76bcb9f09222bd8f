//! Rasterization of drawing objects into a canvas buffer.
//!
//! Geometry is built with kurbo and converted to tiny-skia paths. Every draw
//! goes through [`CanvasBuffer::draw`], so the buffer's clip applies.

use crate::buffer::CanvasBuffer;
use kurbo::{BezPath, Ellipse, PathEl, Point, Rect, Shape};
use pixelink_core::fill::flood_fill;
use pixelink_core::geometry::PixelRect;
use pixelink_core::shapes::{BrushShape, DrawingObject, ObjectKind, Rgb};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Stroke, StrokeDash, Transform};

/// Curve flattening tolerance for ellipses.
const TOLERANCE: f64 = 0.1;

/// Draw one object into `buffer` under the buffer's current clip.
pub fn draw_object(buffer: &mut CanvasBuffer, object: &DrawingObject) {
    let thickness = object.thickness.max(1) as f64;
    match object.kind {
        ObjectKind::FreeLine | ObjectKind::Eraser => {
            stroke_segment(buffer, object.start.to_kurbo(), object.end.to_kurbo(), thickness, object.color);
        }
        ObjectKind::Rectangle => {
            let path = object.bounding_box().to_kurbo().to_path(TOLERANCE);
            stroke_path(buffer, &path, thickness, object.color, LineCap::Butt);
        }
        ObjectKind::Circle => {
            let path = Ellipse::from_rect(object.square_box().to_kurbo()).to_path(TOLERANCE);
            stroke_path(buffer, &path, thickness, object.color, LineCap::Butt);
        }
        ObjectKind::Brush => {
            let path = brush_path(object);
            fill_path(buffer, &path, object.color, false);
            outline_path(buffer, &path, object.color);
        }
        ObjectKind::Fill => {
            flood_fill(buffer, object.start, object.color);
        }
    }
}

/// Footprint of a brush segment.
///
/// The segment's box is grown by `thickness` on every side, giving a brush
/// size of twice the thickness.
pub fn brush_path(object: &DrawingObject) -> BezPath {
    let bbox = object.bounding_box().inflate(object.thickness as i32);
    let side = bbox.width().min(bbox.height());
    let square = PixelRect::new(bbox.left, bbox.top, bbox.left + side, bbox.top + side);

    match object.brush_shape {
        BrushShape::Circle => Ellipse::from_rect(square.to_kurbo()).to_path(TOLERANCE),
        BrushShape::Square => square.to_kurbo().to_path(TOLERANCE),
        BrushShape::Ellipse => Ellipse::from_rect(bbox.to_kurbo()).to_path(TOLERANCE),
        BrushShape::Rectangle => bbox.to_kurbo().to_path(TOLERANCE),
        BrushShape::Triangle => {
            let r = bbox.to_kurbo();
            let mut path = BezPath::new();
            path.move_to(Point::new(((bbox.left + bbox.right) / 2) as f64, r.y0));
            path.line_to(Point::new(r.x0, r.y1));
            path.line_to(Point::new(r.x1, r.y1));
            path.close_path();
            path
        }
    }
}

/// Round-capped line. A zero-length segment leaves a round dot.
fn stroke_segment(buffer: &mut CanvasBuffer, start: Point, end: Point, width: f64, color: Rgb) {
    if start == end {
        let dot = Ellipse::new(start, (width / 2.0, width / 2.0), 0.0).to_path(TOLERANCE);
        fill_path(buffer, &dot, color, true);
        return;
    }
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);
    stroke_path(buffer, &path, width, color, LineCap::Round);
}

fn stroke_path(buffer: &mut CanvasBuffer, path: &BezPath, width: f64, color: Rgb, cap: LineCap) {
    let Some(path) = to_skia_path(path) else {
        return;
    };
    let paint = solid_paint(color, true);
    let stroke = Stroke {
        width: width as f32,
        line_cap: cap,
        line_join: if cap == LineCap::Round { LineJoin::Round } else { LineJoin::Miter },
        ..Default::default()
    };
    buffer.draw(|pixmap, mask| {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), mask);
    });
}

fn fill_path(buffer: &mut CanvasBuffer, path: &BezPath, color: Rgb, anti_alias: bool) {
    let Some(path) = to_skia_path(path) else {
        return;
    };
    let paint = solid_paint(color, anti_alias);
    buffer.draw(|pixmap, mask| {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), mask);
    });
}

/// 1px pen along `path`, pixel-centered so right and bottom edges are
/// covered inclusively.
fn outline_path(buffer: &mut CanvasBuffer, path: &BezPath, color: Rgb) {
    let Some(path) = to_skia_path(path) else {
        return;
    };
    let paint = solid_paint(color, false);
    let stroke = Stroke {
        width: 1.0,
        ..Default::default()
    };
    buffer.draw(|pixmap, mask| {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::from_translate(0.5, 0.5), mask);
    });
}

/// Fill the pixel square `rect` and outline it with `outline`.
pub(crate) fn draw_handle(buffer: &mut CanvasBuffer, rect: PixelRect, fill: Rgb, outline: Rgb) {
    if let Some(r) = skia_rect(rect) {
        let paint = solid_paint(fill, false);
        buffer.draw(|pixmap, mask| pixmap.fill_rect(r, &paint, Transform::identity(), mask));
    }
    outline_rect(buffer, rect, outline, None);
}

/// 1px outline along the inner edge of `rect`, dotted when `dash` is set.
pub(crate) fn outline_rect(buffer: &mut CanvasBuffer, rect: PixelRect, color: Rgb, dash: Option<f32>) {
    let r = rect.to_kurbo();
    let inner = Rect::new(r.x0 + 0.5, r.y0 + 0.5, (r.x1 - 0.5).max(r.x0 + 0.5), (r.y1 - 0.5).max(r.y0 + 0.5));
    let Some(path) = to_skia_path(&inner.to_path(TOLERANCE)) else {
        return;
    };
    let paint = solid_paint(color, false);
    let stroke = Stroke {
        width: 1.0,
        dash: dash.and_then(|len| StrokeDash::new(vec![len, len], 0.0)),
        ..Default::default()
    };
    buffer.draw(|pixmap, mask| {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), mask);
    });
}

fn solid_paint(color: Rgb, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = anti_alias;
    paint
}

pub(crate) fn skia_rect(rect: PixelRect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32)
}

/// Convert a kurbo path to a tiny-skia path.
pub fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelink_core::geometry::{PixelPoint, PixelSize};

    fn white_buffer(w: u32, h: u32) -> CanvasBuffer {
        let mut buffer = CanvasBuffer::new(PixelSize::new(w, h)).unwrap();
        buffer.clear(Rgb::WHITE);
        buffer
    }

    fn object(kind: ObjectKind, start: (i32, i32), end: (i32, i32), thickness: u32) -> DrawingObject {
        DrawingObject::new(kind, start.into(), end.into()).with_thickness(thickness)
    }

    #[test]
    fn test_freeline() {
        let mut buffer = white_buffer(40, 20);
        draw_object(&mut buffer, &object(ObjectKind::FreeLine, (5, 10), (25, 10), 4));
        assert_eq!(buffer.pixel(15, 10), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(15, 2), Some(Rgb::WHITE));
    }

    #[test]
    fn test_degenerate_line_is_dot() {
        let mut buffer = white_buffer(20, 20);
        draw_object(&mut buffer, &object(ObjectKind::FreeLine, (10, 10), (10, 10), 6));
        assert_ne!(buffer.pixel(10, 10), Some(Rgb::WHITE));
    }

    #[test]
    fn test_eraser_uses_stored_color() {
        let mut buffer = white_buffer(40, 20);
        buffer.clear(Rgb::BLACK);
        let eraser = object(ObjectKind::Eraser, (5, 10), (25, 10), 4).with_color(Rgb::WHITE);
        draw_object(&mut buffer, &eraser);
        assert_eq!(buffer.pixel(15, 10), Some(Rgb::WHITE));
    }

    #[test]
    fn test_rectangle_is_outline() {
        let mut buffer = white_buffer(40, 40);
        draw_object(&mut buffer, &object(ObjectKind::Rectangle, (30, 30), (10, 10), 2));
        assert_eq!(buffer.pixel(10, 20), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(20, 20), Some(Rgb::WHITE));
    }

    #[test]
    fn test_circle_is_square_forced() {
        let mut buffer = white_buffer(60, 30);
        draw_object(&mut buffer, &object(ObjectKind::Circle, (0, 0), (40, 20), 4));
        // Circle of diameter 20 at the top-left; nothing drawn past x = 22.
        assert_ne!(buffer.pixel(10, 1), Some(Rgb::WHITE));
        assert_eq!(buffer.pixel(10, 10), Some(Rgb::WHITE));
        assert_eq!(buffer.pixel(30, 10), Some(Rgb::WHITE));
    }

    #[test]
    fn test_brush_square() {
        let mut buffer = white_buffer(20, 20);
        let brush = object(ObjectKind::Brush, (10, 10), (10, 10), 3).with_brush_shape(BrushShape::Square);
        draw_object(&mut buffer, &brush);
        // Box (7, 7) - (13, 13) filled, with its right and bottom edges outlined.
        assert_eq!(buffer.count_color(Rgb::BLACK), 49);
        assert_eq!(buffer.pixel(7, 7), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(13, 13), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(14, 14), Some(Rgb::WHITE));
        assert_eq!(buffer.pixel(6, 6), Some(Rgb::WHITE));
    }

    #[test]
    fn test_brush_triangle_apex_on_top() {
        let mut buffer = white_buffer(20, 20);
        let brush = object(ObjectKind::Brush, (10, 10), (10, 10), 3).with_brush_shape(BrushShape::Triangle);
        draw_object(&mut buffer, &brush);
        assert_eq!(buffer.pixel(7, 7), Some(Rgb::WHITE));
        assert_eq!(buffer.pixel(7, 12), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(10, 8), Some(Rgb::BLACK));
        // Bottom row comes from the outline.
        assert_eq!(buffer.pixel(10, 13), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(10, 15), Some(Rgb::WHITE));
    }

    #[test]
    fn test_brush_rectangle_spans_segment() {
        let mut buffer = white_buffer(40, 20);
        let brush = object(ObjectKind::Brush, (5, 10), (30, 10), 2).with_brush_shape(BrushShape::Rectangle);
        draw_object(&mut buffer, &brush);
        // Box (3, 8) - (32, 12), edges inclusive.
        assert_eq!(buffer.count_color(Rgb::BLACK), 30 * 5);
    }

    #[test]
    fn test_fill_object_floods() {
        let mut buffer = white_buffer(10, 10);
        draw_object(&mut buffer, &DrawingObject::fill(PixelPoint::new(5, 5), Rgb::RED));
        assert_eq!(buffer.count_color(Rgb::RED), 100);
    }

    #[test]
    fn test_draw_respects_clip() {
        let mut buffer = white_buffer(40, 20);
        buffer.with_clip(Some(PixelRect::new(0, 0, 15, 20)), |b| {
            draw_object(b, &object(ObjectKind::FreeLine, (2, 10), (38, 10), 4));
        });
        assert_eq!(buffer.pixel(10, 10), Some(Rgb::BLACK));
        assert_eq!(buffer.pixel(20, 10), Some(Rgb::WHITE));
    }

    #[test]
    fn test_path_conversion() {
        let path = Rect::new(0.0, 0.0, 4.0, 4.0).to_path(TOLERANCE);
        let skia = to_skia_path(&path).unwrap();
        let bounds = skia.bounds();
        assert!((bounds.width() - 4.0).abs() < f32::EPSILON);
    }
}
