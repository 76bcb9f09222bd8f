//! Hit-testing for object resize handles and selection handles.

use crate::geometry::{PixelPoint, PixelRect};
use crate::shapes::DrawingObject;
use serde::{Deserialize, Serialize};

/// Half-width of the square handles drawn on a selected object.
pub const OBJECT_HANDLE_HALF: i32 = 6;
/// Half-width of the square handles drawn on the selection rectangle.
pub const SELECTION_HANDLE_HALF: i32 = 8;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Hit-test order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this corner on `rect`.
    pub fn of(self, rect: PixelRect) -> PixelPoint {
        match self {
            Corner::TopLeft => rect.top_left(),
            Corner::TopRight => rect.top_right(),
            Corner::BottomLeft => rect.bottom_left(),
            Corner::BottomRight => rect.bottom_right(),
        }
    }
}

/// Region of a selected object under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Inside the bounding box, away from the corners.
    Move,
    #[default]
    None,
}

impl ResizeHandle {
    pub fn is_some(self) -> bool {
        self != ResizeHandle::None
    }
}

impl From<Corner> for ResizeHandle {
    fn from(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft => ResizeHandle::TopLeft,
            Corner::TopRight => ResizeHandle::TopRight,
            Corner::BottomLeft => ResizeHandle::BottomLeft,
            Corner::BottomRight => ResizeHandle::BottomRight,
        }
    }
}

/// Region of the selection rectangle under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionHit {
    Corner(Corner),
    Body,
}

/// The square handle area centered on `center`.
pub fn handle_rect(center: PixelPoint, half: i32) -> PixelRect {
    PixelRect::new(center.x - half, center.y - half, center.x + half, center.y + half)
}

/// Normalized box spanned by the object's endpoints.
pub fn bounding_box_of(object: &DrawingObject) -> PixelRect {
    object.bounding_box()
}

/// Which resize handle of `object` lies under `point`.
///
/// Corners of the bounding box are tested first, in the order of
/// [`Corner::ALL`], then the box body. Tests are inclusive.
pub fn resize_handle_at(object: &DrawingObject, point: PixelPoint, half: i32) -> ResizeHandle {
    let bbox = bounding_box_of(object);
    for corner in Corner::ALL {
        if handle_rect(corner.of(bbox), half).contains(point) {
            return corner.into();
        }
    }
    if bbox.contains(point) {
        ResizeHandle::Move
    } else {
        ResizeHandle::None
    }
}

/// Apply a drag of `handle` to `new_point`.
///
/// Corner handles overwrite one coordinate pair of the raw endpoints. `Move`
/// translates the object so that its current center lands on `new_point`.
pub fn apply_handle_edit(object: &mut DrawingObject, handle: ResizeHandle, new_point: PixelPoint) {
    match handle {
        ResizeHandle::TopLeft => object.start = new_point,
        ResizeHandle::TopRight => {
            object.end.x = new_point.x;
            object.start.y = new_point.y;
        }
        ResizeHandle::BottomLeft => {
            object.start.x = new_point.x;
            object.end.y = new_point.y;
        }
        ResizeHandle::BottomRight => object.end = new_point,
        ResizeHandle::Move => {
            let center = PixelPoint::new(
                object.start.x + (object.end.x - object.start.x) / 2,
                object.start.y + (object.end.y - object.start.y) / 2,
            );
            let dx = new_point.x - center.x;
            let dy = new_point.y - center.y;
            object.start = object.start.offset(dx, dy);
            object.end = object.end.offset(dx, dy);
        }
        ResizeHandle::None => {}
    }
}

/// Which part of the selection rectangle lies under `point`, corners first.
pub fn selection_handle_at(rect: PixelRect, point: PixelPoint, half: i32) -> Option<SelectionHit> {
    Corner::ALL
        .into_iter()
        .find(|corner| handle_rect(corner.of(rect), half).contains(point))
        .map(SelectionHit::Corner)
        .or_else(|| rect.contains(point).then_some(SelectionHit::Body))
}
