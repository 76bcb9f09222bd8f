//! Tools and the per-session drawing settings.

use crate::config::EditorConfig;
use crate::shapes::{BrushShape, ObjectKind, Rgb};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    FreeLine,
    Brush,
    Eraser,
    Fill,
    Rectangle,
    Circle,
    Selection,
    Loupe,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::FreeLine,
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Selection,
        ToolKind::Loupe,
    ];

    /// Kind of object this tool places, if any.
    pub fn object_kind(self) -> Option<ObjectKind> {
        match self {
            ToolKind::FreeLine => Some(ObjectKind::FreeLine),
            ToolKind::Brush => Some(ObjectKind::Brush),
            ToolKind::Eraser => Some(ObjectKind::Eraser),
            ToolKind::Fill => Some(ObjectKind::Fill),
            ToolKind::Rectangle => Some(ObjectKind::Rectangle),
            ToolKind::Circle => Some(ObjectKind::Circle),
            ToolKind::Selection | ToolKind::Loupe => None,
        }
    }

    /// Display name for toolbars and logs.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::FreeLine => "Pen",
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Selection => "Select",
            ToolKind::Loupe => "Loupe",
        }
    }
}

/// Current tool and drawing style.
///
/// Passed by reference into every input controller operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSession {
    pub tool: ToolKind,
    pub color: Rgb,
    /// Color erasers paint with.
    pub background: Rgb,
    thickness: u32,
    pub brush_shape: BrushShape,
    min_thickness: u32,
    max_thickness: u32,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the startup session from configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            tool: ToolKind::default(),
            color: config.default_color,
            background: config.background,
            thickness: config.default_thickness,
            brush_shape: config.default_brush_shape,
            min_thickness: config.min_thickness,
            max_thickness: config.max_thickness,
        }
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Set the stroke thickness, clamped to the configured range.
    pub fn set_thickness(&mut self, thickness: u32) -> u32 {
        self.thickness = thickness.clamp(self.min_thickness, self.max_thickness);
        self.thickness
    }

    /// Color new objects of `kind` are drawn with.
    pub fn color_for(&self, kind: ObjectKind) -> Rgb {
        match kind {
            ObjectKind::Eraser => self.background,
            _ => self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let session = EditorSession::new();
        assert_eq!(session.tool, ToolKind::FreeLine);
        assert_eq!(session.color, Rgb::BLACK);
        assert_eq!(session.thickness(), 2);
        assert_eq!(session.brush_shape, BrushShape::Circle);
    }

    #[test]
    fn test_thickness_is_clamped() {
        let mut session = EditorSession::new();
        assert_eq!(session.set_thickness(0), 1);
        assert_eq!(session.set_thickness(99), 50);
        assert_eq!(session.set_thickness(12), 12);
    }

    #[test]
    fn test_eraser_uses_background() {
        let mut session = EditorSession::new();
        session.color = Rgb::RED;
        assert_eq!(session.color_for(ObjectKind::Eraser), Rgb::WHITE);
        assert_eq!(session.color_for(ObjectKind::FreeLine), Rgb::RED);
    }

    #[test]
    fn test_tool_object_kinds() {
        assert_eq!(ToolKind::Fill.object_kind(), Some(ObjectKind::Fill));
        assert_eq!(ToolKind::Selection.object_kind(), None);
        assert_eq!(ToolKind::Loupe.object_kind(), None);
        assert_eq!(ToolKind::ALL.len(), 8);
    }
}
