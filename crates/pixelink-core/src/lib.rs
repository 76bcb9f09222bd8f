//! PixelInk Core Library
//!
//! Platform-agnostic editing core for the PixelInk raster editor: the drawing
//! object model, pixel geometry and hit-testing, flood fill, the rectangle
//! selection, the loupe transform and the input controller.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod document;
pub mod fill;
pub mod geometry;
pub mod handles;
pub mod input;
pub mod loupe;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use canvas::Canvas;
pub use config::{ChromeInsets, ConfigError, ConfigResult, EditorConfig};
pub use controller::InputController;
pub use document::DrawingStore;
pub use fill::{PixelSurface, flood_fill};
pub use geometry::{PixelPoint, PixelRect, PixelSize};
pub use handles::{Corner, ResizeHandle, SelectionHit};
pub use input::{ButtonState, Key, MouseButton, PointerEvent};
pub use loupe::Loupe;
pub use selection::{Selection, SelectionMode};
pub use shapes::{BrushShape, DrawingObject, ObjectKind, Rgb};
pub use tools::{EditorSession, ToolKind};
