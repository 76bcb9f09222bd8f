//! Integer pixel geometry used by the editing core.
//!
//! Canvas coordinates are whole pixels. These types keep the editing logic in
//! exact integer arithmetic and convert to kurbo only at the rendering edge.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A point in integer canvas (or host window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by a delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn to_kurbo(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Size of the canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (nothing can be drawn).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The rectangle `(0, 0) - (width, height)`.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn to_kurbo(self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// An axis-aligned rectangle with integer edges.
///
/// Edges follow the raster convention: `right` and `bottom` are exclusive when
/// the rectangle is used as a pixel region (clips, loupe views), and inclusive
/// when used for pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a normalized rectangle from two opposite corners.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// A degenerate rectangle covering a single point.
    pub fn from_point(p: PixelPoint) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn top_left(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }

    pub fn top_right(&self) -> PixelPoint {
        PixelPoint::new(self.right, self.top)
    }

    pub fn bottom_left(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.bottom)
    }

    pub fn bottom_right(&self) -> PixelPoint {
        PixelPoint::new(self.right, self.bottom)
    }

    /// Swap edges so that `left <= right` and `top <= bottom`.
    pub fn normalized(self) -> Self {
        Self::from_corners(self.top_left(), self.bottom_right())
    }

    /// Clamp every edge into `bounds`.
    pub fn clamped_to(self, bounds: PixelRect) -> Self {
        let cx = |v: i32| v.clamp(bounds.left, bounds.right);
        let cy = |v: i32| v.clamp(bounds.top, bounds.bottom);
        Self::new(cx(self.left), cy(self.top), cx(self.right), cy(self.bottom))
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Inclusive containment, used for pointer hit-testing.
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Half-open containment, used for pixel regions.
    pub fn contains_pixel(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// True when this rectangle lies entirely inside `outer`.
    pub fn is_within(&self, outer: PixelRect) -> bool {
        self.left >= outer.left
            && self.top >= outer.top
            && self.right <= outer.right
            && self.bottom <= outer.bottom
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(self, amount: i32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// Overlapping region of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: PixelRect) -> Option<Self> {
        let r = Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    pub fn to_kurbo(self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.right as f64,
            self.bottom as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let r = PixelRect::from_corners(PixelPoint::new(50, 10), PixelPoint::new(5, 40));
        assert_eq!(r, PixelRect::new(5, 10, 50, 40));
        assert_eq!(r.width(), 45);
        assert_eq!(r.height(), 30);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = PixelSize::new(100, 80).bounds();
        let r = PixelRect::new(-10, 20, 150, 90).clamped_to(bounds);
        assert_eq!(r, PixelRect::new(0, 20, 100, 80));
    }

    #[test]
    fn test_contains_is_inclusive_for_pointers() {
        let r = PixelRect::new(0, 0, 10, 10);
        assert!(r.contains(PixelPoint::new(10, 10)));
        assert!(!r.contains_pixel(10, 10));
        assert!(r.contains_pixel(9, 9));
    }

    #[test]
    fn test_intersect() {
        let a = PixelRect::new(0, 0, 10, 10);
        let b = PixelRect::new(5, 5, 20, 20);
        assert_eq!(a.intersect(b), Some(PixelRect::new(5, 5, 10, 10)));
        assert_eq!(a.intersect(PixelRect::new(10, 10, 20, 20)), None);
    }

    #[test]
    fn test_is_within() {
        let bounds = PixelRect::new(0, 0, 100, 100);
        assert!(PixelRect::new(0, 0, 100, 100).is_within(bounds));
        assert!(!PixelRect::new(-1, 0, 50, 50).is_within(bounds));
    }
}
