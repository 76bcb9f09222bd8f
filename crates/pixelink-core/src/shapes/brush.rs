//! Brush tip shapes.

use serde::{Deserialize, Serialize};

/// Footprint stamped by the brush tool along each stroke segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushShape {
    /// Round tip (ellipse forced to a square box).
    #[default]
    Circle,
    Square,
    /// Ellipse stretched over the segment's box.
    Ellipse,
    /// Rectangle stretched over the segment's box.
    Rectangle,
    /// Triangle with its apex at the top center.
    Triangle,
}

impl BrushShape {
    pub const ALL: [BrushShape; 5] = [
        BrushShape::Circle,
        BrushShape::Square,
        BrushShape::Ellipse,
        BrushShape::Rectangle,
        BrushShape::Triangle,
    ];

    /// Whether the footprint keeps a square aspect ratio.
    pub fn is_square_forced(self) -> bool {
        matches!(self, BrushShape::Circle | BrushShape::Square)
    }

    /// Display name for menus and logs.
    pub fn name(self) -> &'static str {
        match self {
            BrushShape::Circle => "circle",
            BrushShape::Square => "square",
            BrushShape::Ellipse => "ellipse",
            BrushShape::Rectangle => "rectangle",
            BrushShape::Triangle => "triangle",
        }
    }
}
