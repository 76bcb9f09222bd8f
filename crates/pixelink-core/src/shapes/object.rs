//! The placed drawing object.

use super::{BrushShape, Rgb};
use crate::geometry::{PixelPoint, PixelRect};
use serde::{Deserialize, Serialize};

/// Kind of primitive a [`DrawingObject`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// One segment of a freehand pen stroke.
    FreeLine,
    /// Rectangle outline spanning `start`..`end`.
    Rectangle,
    /// One segment of a brush stroke, stamped with a [`BrushShape`].
    Brush,
    /// One segment of an eraser stroke, drawn in the background color.
    Eraser,
    /// Circle outline inside the square-forced box of `start`..`end`.
    Circle,
    /// Flood fill seeded at `start`.
    Fill,
}

impl ObjectKind {
    /// Stroke kinds append one object per pointer movement sample.
    pub fn is_stroke(self) -> bool {
        matches!(self, ObjectKind::FreeLine | ObjectKind::Brush | ObjectKind::Eraser)
    }

    /// Shape kinds are dragged out as a provisional object first.
    pub fn is_shape(self) -> bool {
        matches!(self, ObjectKind::Rectangle | ObjectKind::Circle)
    }
}

/// A primitive placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingObject {
    pub kind: ObjectKind,
    pub start: PixelPoint,
    pub end: PixelPoint,
    /// Stroke width in pixels, always at least 1.
    pub thickness: u32,
    pub color: Rgb,
    /// Only meaningful for [`ObjectKind::Brush`].
    pub brush_shape: BrushShape,
    /// Region the object was drawn into while a selection was active.
    pub selection_clip: Option<PixelRect>,
}

impl DrawingObject {
    /// Create an object with a 1px black default style.
    pub fn new(kind: ObjectKind, start: PixelPoint, end: PixelPoint) -> Self {
        Self {
            kind,
            start,
            end,
            thickness: 1,
            color: Rgb::BLACK,
            brush_shape: BrushShape::default(),
            selection_clip: None,
        }
    }

    /// Create a fill object seeded at `seed`.
    pub fn fill(seed: PixelPoint, color: Rgb) -> Self {
        Self::new(ObjectKind::Fill, seed, seed).with_color(color)
    }

    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness.max(1);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_brush_shape(mut self, shape: BrushShape) -> Self {
        self.brush_shape = shape;
        self
    }

    pub fn with_selection_clip(mut self, clip: Option<PixelRect>) -> Self {
        self.selection_clip = clip;
        self
    }

    /// Normalized box spanned by `start` and `end`.
    pub fn bounding_box(&self) -> PixelRect {
        PixelRect::from_corners(self.start, self.end)
    }

    /// Box a circle is drawn into: side `min(w, h)` anchored at the top-left.
    pub fn square_box(&self) -> PixelRect {
        square_forced(self.bounding_box())
    }
}

/// Force a box to a square of side `min(w, h)` keeping its top-left corner.
pub(crate) fn square_forced(rect: PixelRect) -> PixelRect {
    let side = rect.width().min(rect.height());
    PixelRect::new(rect.left, rect.top, rect.left + side, rect.top + side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_is_normalized() {
        let obj = DrawingObject::new(
            ObjectKind::Rectangle,
            PixelPoint::new(40, 30),
            PixelPoint::new(10, 50),
        );
        assert_eq!(obj.bounding_box(), PixelRect::new(10, 30, 40, 50));
    }

    #[test]
    fn test_circle_square_box() {
        let obj = DrawingObject::new(
            ObjectKind::Circle,
            PixelPoint::new(60, 10),
            PixelPoint::new(10, 30),
        );
        assert_eq!(obj.square_box(), PixelRect::new(10, 10, 30, 30));
    }

    #[test]
    fn test_thickness_at_least_one() {
        let obj = DrawingObject::new(ObjectKind::FreeLine, PixelPoint::ORIGIN, PixelPoint::ORIGIN)
            .with_thickness(0);
        assert_eq!(obj.thickness, 1);
    }

    #[test]
    fn test_fill_seed() {
        let obj = DrawingObject::fill(PixelPoint::new(5, 7), Rgb::RED);
        assert_eq!(obj.kind, ObjectKind::Fill);
        assert_eq!(obj.start, obj.end);
        assert_eq!(obj.color, Rgb::RED);
    }

    #[test]
    fn test_kind_classes() {
        assert!(ObjectKind::Eraser.is_stroke());
        assert!(!ObjectKind::Fill.is_stroke());
        assert!(ObjectKind::Circle.is_shape());
        assert!(!ObjectKind::Brush.is_shape());
    }
}
