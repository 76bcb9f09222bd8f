//! Pointer and keyboard event types delivered by the host.

use crate::geometry::PixelPoint;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Buttons held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl ButtonState {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        middle: false,
    };

    /// Only the primary button held.
    pub const PRIMARY: Self = Self {
        left: true,
        right: false,
        middle: false,
    };

    pub fn pressed(button: MouseButton) -> Self {
        let mut state = Self::NONE;
        state.set(button, true);
        state
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            MouseButton::Middle => self.middle = down,
        }
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    /// Whether the primary button, which drives every gesture, is held.
    pub fn primary(&self) -> bool {
        self.left
    }
}

/// Pointer event in host window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: PixelPoint,
        buttons: ButtonState,
    },
    Move {
        position: PixelPoint,
        buttons: ButtonState,
    },
    Up {
        position: PixelPoint,
    },
}

impl PointerEvent {
    pub fn position(&self) -> PixelPoint {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
}
