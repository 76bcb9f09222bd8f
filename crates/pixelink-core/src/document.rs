//! Ordered store of placed drawing objects.

use crate::geometry::PixelPoint;
use crate::handles::{ResizeHandle, resize_handle_at};
use crate::shapes::DrawingObject;
use serde::{Deserialize, Serialize};

/// Placed objects in render order.
///
/// Objects are only ever appended, edited in place, or cleared in bulk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingStore {
    objects: Vec<DrawingObject>,
}

impl DrawingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized object.
    pub fn append(&mut self, object: DrawingObject) {
        self.objects.push(object);
    }

    /// Move the end point of the most recent object.
    /// Returns false when the store is empty.
    pub fn mutate_last(&mut self, new_end: PixelPoint) -> bool {
        match self.objects.last_mut() {
            Some(last) => {
                last.end = new_end;
                true
            }
            None => false,
        }
    }

    /// Pop the most recent object.
    pub fn remove_last(&mut self) -> Option<DrawingObject> {
        self.objects.pop()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn get(&self, index: usize) -> Option<&DrawingObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DrawingObject> {
        self.objects.get_mut(index)
    }

    pub fn last(&self) -> Option<&DrawingObject> {
        self.objects.last()
    }

    /// Objects in render order (oldest first).
    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawingObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Index of the most recently added object whose handles or body
    /// contain `point`.
    pub fn topmost_hit(&self, point: PixelPoint, handle_half: i32) -> Option<usize> {
        self.objects
            .iter()
            .rposition(|obj| resize_handle_at(obj, point, handle_half) != ResizeHandle::None)
    }

    /// Serialize the store to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a store from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
