//! Modal collaborators provided by the host platform.

use pixelink_core::Rgb;
use std::path::PathBuf;

/// Modal color chooser. `None` when the user cancels.
pub trait ColorPicker {
    fn pick_color(&mut self, current: Rgb) -> Option<Rgb>;
}

/// Modal save-file dialog. `None` when the user cancels.
pub trait SaveDialog {
    fn choose_path(&mut self) -> Option<PathBuf>;
}

/// Picker that answers with a preset color once.
#[derive(Debug, Clone, Default)]
pub struct FixedColor(pub Option<Rgb>);

impl ColorPicker for FixedColor {
    fn pick_color(&mut self, _current: Rgb) -> Option<Rgb> {
        self.0.take()
    }
}

/// Dialog that answers with a preset path once.
#[derive(Debug, Clone, Default)]
pub struct FixedPath(pub Option<PathBuf>);

impl SaveDialog for FixedPath {
    fn choose_path(&mut self) -> Option<PathBuf> {
        self.0.take()
    }
}
