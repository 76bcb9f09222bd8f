//! Loupe: a magnified sub-view of the canvas.
//!
//! While active, the display shows `view_rect` stretched over the whole
//! canvas area. With drawing enabled, pointer input in display space is
//! mapped back into the smaller view rectangle so strokes land where the
//! magnified image shows them.

use crate::geometry::{PixelPoint, PixelRect, PixelSize};
use kurbo::Affine;
use serde::{Deserialize, Serialize};

/// Default magnification.
pub const DEFAULT_FACTOR: f64 = 2.5;
/// Smallest allowed magnification.
pub const MIN_FACTOR: f64 = 1.25;
/// Largest allowed magnification.
pub const MAX_FACTOR: f64 = 8.0;

/// Magnification state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loupe {
    /// Sub-rectangle of the canvas currently magnified.
    view_rect: PixelRect,
    factor: f64,
    /// Whether pointer input is remapped into `view_rect`.
    drawing_enabled: bool,
    /// Whether the display shows the magnified view.
    active: bool,
    /// Point the view was centered on at activation.
    center: PixelPoint,
}

impl Default for Loupe {
    fn default() -> Self {
        Self {
            view_rect: PixelRect::EMPTY,
            factor: DEFAULT_FACTOR,
            drawing_enabled: false,
            active: false,
            center: PixelPoint::ORIGIN,
        }
    }
}

impl Loupe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inactive loupe with the given magnification.
    pub fn with_factor(factor: f64) -> Self {
        Self {
            factor: clamp_factor(factor),
            ..Self::default()
        }
    }

    pub fn view_rect(&self) -> PixelRect {
        self.view_rect
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn center(&self) -> PixelPoint {
        self.center
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    /// True when pointer input must be remapped into the view.
    pub fn is_drawing(&self) -> bool {
        self.active && self.drawing_enabled
    }

    /// Magnify the area around `center`.
    ///
    /// The view has size `canvas / factor` and is shifted, never shrunk, to
    /// stay inside the canvas.
    pub fn activate(&mut self, center: PixelPoint, canvas: PixelSize) {
        self.center = center;
        self.active = true;
        self.drawing_enabled = true;
        self.recompute_view(canvas);
        log::debug!(
            "loupe: active at ({}, {}), view {:?}",
            center.x,
            center.y,
            self.view_rect
        );
    }

    /// Change the magnification, recomputing the view when active.
    pub fn set_factor(&mut self, factor: f64, canvas: PixelSize) {
        self.factor = clamp_factor(factor);
        if self.active {
            self.recompute_view(canvas);
        }
    }

    /// Refit the view after a canvas size change.
    pub fn refit(&mut self, canvas: PixelSize) {
        if self.active {
            self.recompute_view(canvas);
        }
    }

    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        self.drawing_enabled = enabled;
    }

    pub fn deactivate(&mut self) {
        self.view_rect = PixelRect::EMPTY;
        self.active = false;
        self.drawing_enabled = false;
    }

    fn recompute_view(&mut self, canvas: PixelSize) {
        let cw = canvas.width as i32;
        let ch = canvas.height as i32;
        let vw = (canvas.width as f64 / self.factor) as i32;
        let vh = (canvas.height as f64 / self.factor) as i32;
        let left = (self.center.x - vw / 2).clamp(0, (cw - vw).max(0));
        let top = (self.center.y - vh / 2).clamp(0, (ch - vh).max(0));
        self.view_rect = PixelRect::new(left, top, left + vw, top + vh);
    }

    /// Affine mapping display (canvas-sized) coordinates into the view.
    pub fn canvas_to_view_transform(&self, canvas: PixelSize) -> Affine {
        let v = self.view_rect;
        if canvas.is_empty() {
            return Affine::IDENTITY;
        }
        Affine::translate((v.left as f64, v.top as f64))
            * Affine::scale_non_uniform(
                v.width() as f64 / canvas.width as f64,
                v.height() as f64 / canvas.height as f64,
            )
    }

    /// Affine stretching the view over the display.
    pub fn view_to_canvas_transform(&self, canvas: PixelSize) -> Affine {
        self.canvas_to_view_transform(canvas).inverse()
    }

    /// Map a display point into the view, rounding down to a pixel.
    pub fn canvas_to_view(&self, point: PixelPoint, canvas: PixelSize) -> PixelPoint {
        let v = self.view_rect;
        if canvas.is_empty() {
            return point;
        }
        PixelPoint::new(
            v.left + floor_div(point.x as i64 * v.width() as i64, canvas.width as i64),
            v.top + floor_div(point.y as i64 * v.height() as i64, canvas.height as i64),
        )
    }

    /// Map a view point to the first display pixel whose image lands on it.
    pub fn view_to_canvas(&self, point: PixelPoint, canvas: PixelSize) -> PixelPoint {
        let v = self.view_rect;
        if v.is_empty() {
            return point;
        }
        PixelPoint::new(
            ceil_div((point.x - v.left) as i64 * canvas.width as i64, v.width() as i64),
            ceil_div((point.y - v.top) as i64 * canvas.height as i64, v.height() as i64),
        )
    }

    /// Whether a mapped point falls inside the view.
    pub fn accepts(&self, point: PixelPoint) -> bool {
        self.view_rect.contains_pixel(point.x, point.y)
    }
}

fn clamp_factor(factor: f64) -> f64 {
    if factor.is_nan() {
        DEFAULT_FACTOR
    } else {
        factor.clamp(MIN_FACTOR, MAX_FACTOR)
    }
}

fn floor_div(n: i64, d: i64) -> i32 {
    n.div_euclid(d) as i32
}

fn ceil_div(n: i64, d: i64) -> i32 {
    -((-n).div_euclid(d)) as i32
}
