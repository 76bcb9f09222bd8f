//! Editor configuration.
//!
//! Every field has a default, so a config file only needs to list the values
//! it overrides.

use crate::handles::{OBJECT_HANDLE_HALF, SELECTION_HANDLE_HALF};
use crate::loupe::DEFAULT_FACTOR;
use crate::shapes::{BrushShape, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Width and height of the host chrome around the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeInsets {
    /// Sidebar on the left.
    pub sidebar_width: u32,
    /// Toolbar along the top.
    pub toolbar_height: u32,
}

impl Default for ChromeInsets {
    fn default() -> Self {
        Self {
            sidebar_width: 100,
            toolbar_height: 80,
        }
    }
}

impl ChromeInsets {
    /// No chrome at all: window and canvas coordinates coincide.
    pub const NONE: Self = Self {
        sidebar_width: 0,
        toolbar_height: 0,
    };
}

/// Tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub chrome: ChromeInsets,
    pub background: Rgb,
    pub default_color: Rgb,
    pub default_thickness: u32,
    pub min_thickness: u32,
    pub max_thickness: u32,
    pub default_brush_shape: BrushShape,
    pub loupe_factor: f64,
    /// Half-width of the handles on a selected object.
    pub object_handle_half: i32,
    /// Half-width of the handles on the selection rectangle.
    pub selection_handle_half: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            chrome: ChromeInsets::default(),
            background: Rgb::WHITE,
            default_color: Rgb::BLACK,
            default_thickness: 2,
            min_thickness: 1,
            max_thickness: 50,
            default_brush_shape: BrushShape::Circle,
            loupe_factor: DEFAULT_FACTOR,
            object_handle_half: OBJECT_HANDLE_HALF,
            selection_handle_half: SELECTION_HANDLE_HALF,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config.sanitized())
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fix up values that would break the editor.
    fn sanitized(mut self) -> Self {
        self.min_thickness = self.min_thickness.max(1);
        self.max_thickness = self.max_thickness.max(self.min_thickness);
        self.default_thickness = self
            .default_thickness
            .clamp(self.min_thickness, self.max_thickness);
        self.object_handle_half = self.object_handle_half.max(0);
        self.selection_handle_half = self.selection_handle_half.max(0);
        self
    }
}
