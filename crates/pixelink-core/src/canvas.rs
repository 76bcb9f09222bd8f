//! Editable canvas state.

use crate::config::EditorConfig;
use crate::document::DrawingStore;
use crate::geometry::PixelSize;
use crate::loupe::Loupe;
use crate::selection::Selection;
use crate::shapes::DrawingObject;

/// Runtime canvas state: the placed objects plus everything layered on top
/// of them while editing.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Placed objects in render order.
    pub store: DrawingStore,
    /// The rectangle selection.
    pub selection: Selection,
    /// The magnified sub-view.
    pub loupe: Loupe,
    /// Shape being dragged out, not yet in the store.
    pub provisional: Option<DrawingObject>,
    /// Index into the store of the object showing resize handles.
    selected: Option<usize>,
    size: PixelSize,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(PixelSize::default())
    }
}

impl Canvas {
    /// Create an empty canvas of the given size.
    pub fn new(size: PixelSize) -> Self {
        Self::with_config(size, &EditorConfig::default())
    }

    pub fn with_config(size: PixelSize, config: &EditorConfig) -> Self {
        Self {
            store: DrawingStore::new(),
            selection: Selection::new().with_handle_half(config.selection_handle_half),
            loupe: Loupe::with_factor(config.loupe_factor),
            provisional: None,
            selected: None,
            size,
        }
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Change the canvas size, keeping the selection and the loupe view inside
    /// the new bounds.
    pub fn set_size(&mut self, size: PixelSize) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.selection.clamp_to(size);
        self.loupe.refit(size);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The object showing resize handles, if it still exists.
    pub fn selected_object(&self) -> Option<&DrawingObject> {
        self.selected.and_then(|i| self.store.get(i))
    }

    /// Show resize handles on the object at `index`.
    pub fn select_object(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.store.len());
    }

    pub fn deselect_object(&mut self) {
        self.selected = None;
    }

    /// Remove every object and reset all editing state.
    pub fn clear(&mut self) {
        self.store.clear();
        self.selection.clear();
        self.loupe.deactivate();
        self.provisional = None;
        self.selected = None;
    }

    /// Drop the selection if there is one, otherwise close the loupe.
    /// Returns false when there was nothing to dismiss.
    pub fn escape(&mut self) -> bool {
        if self.selection.is_active() {
            self.selection.clear();
            true
        } else if self.loupe.is_active() {
            self.loupe.deactivate();
            true
        } else {
            false
        }
    }
}
