//! Drawing primitives placed on the canvas.

mod brush;
mod object;

pub use brush::BrushShape;
pub use object::{DrawingObject, ObjectKind};

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Opaque RGB color as stored on drawing objects and canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
        }
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        let rgb = Rgb::new(12, 200, 99);
        let color: Color = rgb.into();
        assert_eq!(Rgb::from(color), rgb);
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Rgb::default(), Rgb::BLACK);
    }
}
