//! PixelInk Application
//!
//! The host-facing editor facade, the modal collaborator traits a host
//! implements, and the scripted session format driven by the headless
//! `pixelink` binary.

mod editor;
mod error;
mod host;
mod script;

pub use editor::Editor;
pub use error::{AppError, AppResult};
pub use host::{ColorPicker, FixedColor, FixedPath, SaveDialog};
pub use script::{ReplayReport, Script, Step, WindowSize};
