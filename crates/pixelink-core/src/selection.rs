//! Rectangle selection and its create/move/resize gestures.

use crate::geometry::{PixelPoint, PixelRect, PixelSize};
use crate::handles::{Corner, SELECTION_HANDLE_HALF, SelectionHit, selection_handle_at};
use serde::{Deserialize, Serialize};

/// Gesture currently driving the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    #[default]
    Idle,
    Creating,
    Moving,
    Resizing,
}

/// The single optional selection rectangle.
///
/// `rect` is kept normalized and, while creating or resizing, clamped to the
/// canvas bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    rect: PixelRect,
    active: bool,
    mode: SelectionMode,
    resize_handle: Option<Corner>,
    /// Pointer position when the current gesture began.
    anchor: PixelPoint,
    /// Rectangle captured when the current gesture began.
    original: PixelRect,
    handle_half: i32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            rect: PixelRect::EMPTY,
            active: false,
            mode: SelectionMode::Idle,
            resize_handle: None,
            anchor: PixelPoint::ORIGIN,
            original: PixelRect::EMPTY,
            handle_half: SELECTION_HANDLE_HALF,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different handle half-width for hit-testing.
    pub fn with_handle_half(mut self, half: i32) -> Self {
        self.handle_half = half;
        self
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// The rectangle, if a selection exists.
    pub fn active_rect(&self) -> Option<PixelRect> {
        self.active.then_some(self.rect)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn resize_handle(&self) -> Option<Corner> {
        self.resize_handle
    }

    pub fn handle_half(&self) -> i32 {
        self.handle_half
    }

    /// Begin creating a new selection at `point`.
    pub fn start(&mut self, point: PixelPoint) {
        self.rect = PixelRect::from_point(point);
        self.original = self.rect;
        self.anchor = point;
        self.active = true;
        self.mode = SelectionMode::Creating;
        self.resize_handle = None;
        log::debug!("selection: creating at ({}, {})", point.x, point.y);
    }

    /// Begin dragging `corner` of the active selection.
    pub fn begin_resize(&mut self, corner: Corner, point: PixelPoint) -> bool {
        if !self.can_begin_gesture() {
            return false;
        }
        self.anchor = point;
        self.original = self.rect;
        self.resize_handle = Some(corner);
        self.mode = SelectionMode::Resizing;
        log::debug!("selection: resizing {:?}", corner);
        true
    }

    /// Begin dragging the whole active selection.
    pub fn begin_move(&mut self, point: PixelPoint) -> bool {
        if !self.can_begin_gesture() {
            return false;
        }
        self.anchor = point;
        self.original = self.rect;
        self.mode = SelectionMode::Moving;
        log::debug!("selection: moving");
        true
    }

    fn can_begin_gesture(&self) -> bool {
        self.active && self.mode == SelectionMode::Idle
    }

    /// Advance the current gesture to `point`.
    ///
    /// Returns false when idle or when a move would leave the canvas; the
    /// rectangle is unchanged in that case.
    pub fn update(&mut self, point: PixelPoint, canvas: PixelSize) -> bool {
        let bounds = canvas.bounds();
        match self.mode {
            SelectionMode::Idle => false,
            SelectionMode::Creating => {
                self.rect = PixelRect::from_corners(self.anchor, point)
                    .clamped_to(bounds)
                    .normalized();
                true
            }
            SelectionMode::Resizing => {
                let Some(corner) = self.resize_handle else {
                    return false;
                };
                let p = PixelPoint::new(
                    point.x.clamp(bounds.left, bounds.right),
                    point.y.clamp(bounds.top, bounds.bottom),
                );
                let mut rect = self.original;
                match corner {
                    Corner::TopLeft => {
                        rect.left = p.x;
                        rect.top = p.y;
                    }
                    Corner::TopRight => {
                        rect.right = p.x;
                        rect.top = p.y;
                    }
                    Corner::BottomLeft => {
                        rect.left = p.x;
                        rect.bottom = p.y;
                    }
                    Corner::BottomRight => {
                        rect.right = p.x;
                        rect.bottom = p.y;
                    }
                }
                self.rect = rect.normalized();
                true
            }
            SelectionMode::Moving => {
                let moved = self
                    .original
                    .translate(point.x - self.anchor.x, point.y - self.anchor.y);
                if moved.is_within(bounds) {
                    self.rect = moved;
                    true
                } else {
                    log::debug!("selection: move rejected, would leave canvas");
                    false
                }
            }
        }
    }

    /// Finish the current gesture.
    pub fn end(&mut self) {
        self.mode = SelectionMode::Idle;
        self.resize_handle = None;
    }

    /// Drop the selection.
    /// Pull the rectangle back inside `canvas` after the canvas shrank.
    pub fn clamp_to(&mut self, canvas: PixelSize) {
        self.rect = self.rect.clamped_to(canvas.bounds());
        self.original = self.original.clamped_to(canvas.bounds());
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.mode = SelectionMode::Idle;
        self.resize_handle = None;
    }

    /// Part of the active selection under `point`.
    pub fn handle_at(&self, point: PixelPoint) -> Option<SelectionHit> {
        if !self.active {
            return None;
        }
        selection_handle_at(self.rect, point, self.handle_half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: PixelSize = PixelSize::new(200, 150);

    fn selection(left: i32, top: i32, right: i32, bottom: i32) -> Selection {
        let mut sel = Selection::new();
        sel.start(PixelPoint::new(left, top));
        sel.update(PixelPoint::new(right, bottom), CANVAS);
        sel.end();
        sel
    }

    fn assert_normalized(sel: &Selection) {
        let r = sel.rect();
        assert!(r.left <= r.right && r.top <= r.bottom, "not normalized: {:?}", r);
    }

    #[test]
    fn test_create() {
        let mut sel = Selection::new();
        sel.start(PixelPoint::new(50, 40));
        assert!(sel.is_active());
        assert_eq!(sel.mode(), SelectionMode::Creating);
        assert_eq!(sel.rect(), PixelRect::new(50, 40, 50, 40));

        sel.update(PixelPoint::new(10, 90), CANVAS);
        assert_eq!(sel.rect(), PixelRect::new(10, 40, 50, 90));
        sel.end();
        assert_eq!(sel.mode(), SelectionMode::Idle);
    }

    #[test]
    fn test_create_is_clamped() {
        let mut sel = Selection::new();
        sel.start(PixelPoint::new(50, 40));
        sel.update(PixelPoint::new(500, -20), CANVAS);
        assert_eq!(sel.rect(), PixelRect::new(50, 0, 200, 40));
        assert_normalized(&sel);
    }

    #[test]
    fn test_move_within_canvas() {
        let mut sel = selection(10, 10, 60, 60);
        assert!(sel.begin_move(PixelPoint::new(30, 30)));
        assert!(sel.update(PixelPoint::new(50, 40), CANVAS));
        assert_eq!(sel.rect(), PixelRect::new(30, 20, 80, 70));
    }

    #[test]
    fn test_move_off_canvas_rejected() {
        let mut sel = selection(0, 0, 50, 50);
        assert!(sel.begin_move(PixelPoint::new(25, 25)));
        assert!(!sel.update(PixelPoint::new(15, 15), CANVAS));
        assert_eq!(sel.rect(), PixelRect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_move_to_edge_accepted() {
        let mut sel = selection(100, 100, 150, 150);
        assert!(sel.begin_move(PixelPoint::new(100, 100)));
        assert!(sel.update(PixelPoint::new(150, 100), CANVAS));
        assert_eq!(sel.rect().right, 200);
    }

    #[test]
    fn test_resize_moves_owned_edges() {
        let mut sel = selection(20, 20, 100, 100);
        assert!(sel.begin_resize(Corner::TopRight, PixelPoint::new(100, 20)));
        sel.update(PixelPoint::new(140, 10), CANVAS);
        assert_eq!(sel.rect(), PixelRect::new(20, 10, 140, 100));
    }

    #[test]
    fn test_resize_past_opposite_edge_renormalizes() {
        let mut sel = selection(20, 20, 100, 100);
        sel.begin_resize(Corner::BottomRight, PixelPoint::new(100, 100));
        sel.update(PixelPoint::new(5, 300), CANVAS);
        assert_eq!(sel.rect(), PixelRect::new(5, 20, 20, 150));
        assert_normalized(&sel);
    }

    #[test]
    fn test_gestures_need_active_idle_selection() {
        let mut sel = Selection::new();
        assert!(!sel.begin_move(PixelPoint::new(0, 0)));
        assert!(!sel.update(PixelPoint::new(5, 5), CANVAS));

        sel.start(PixelPoint::new(1, 1));
        assert!(!sel.begin_resize(Corner::TopLeft, PixelPoint::new(1, 1)));
    }

    #[test]
    fn test_handle_at() {
        let mut sel = selection(20, 20, 100, 100);
        assert_eq!(
            sel.handle_at(PixelPoint::new(22, 18)),
            Some(SelectionHit::Corner(Corner::TopLeft))
        );
        assert_eq!(sel.handle_at(PixelPoint::new(60, 60)), Some(SelectionHit::Body));
        sel.clear();
        assert!(!sel.is_active());
        assert_eq!(sel.handle_at(PixelPoint::new(60, 60)), None);
    }
}
