//! Scripted editing sessions for the headless host.
//!
//! A script is a JSON document with the window size, a list of steps and an
//! optional output path:
//!
//! ```json
//! {
//!   "window": { "width": 500, "height": 380 },
//!   "steps": [
//!     { "op": "tool", "tool": "Rectangle" },
//!     { "op": "pointer_down", "x": 120, "y": 100 },
//!     { "op": "pointer_move", "x": 200, "y": 180 },
//!     { "op": "pointer_up", "x": 200, "y": 180 }
//!   ],
//!   "output": "drawing.png"
//! }
//! ```
//!
//! Pointer coordinates are window coordinates, chrome included.

use crate::editor::Editor;
use crate::error::{AppError, AppResult};
use crate::host::{FixedColor, FixedPath};
use pixelink_core::{BrushShape, ButtonState, MouseButton, PixelPoint, Rgb, ToolKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host window client size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 900,
            height: 680,
        }
    }
}

/// One host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    PointerDown {
        x: i32,
        y: i32,
        #[serde(default = "primary_button")]
        button: MouseButton,
    },
    /// Moves carry whichever buttons are held at that point of the script.
    PointerMove { x: i32, y: i32 },
    PointerUp {
        x: i32,
        y: i32,
        #[serde(default = "primary_button")]
        button: MouseButton,
    },
    Tool { tool: ToolKind },
    /// Answer to the color picker; `null` cancels it.
    Color { color: Option<Rgb> },
    Thickness { value: u32 },
    BrushShape { shape: BrushShape },
    Clear,
    Escape,
    Resize { width: u32, height: u32 },
    /// Answer to the save dialog; `null` cancels it.
    Save { path: Option<PathBuf> },
}

fn primary_button() -> MouseButton {
    MouseButton::Left
}

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub window: WindowSize,
    pub steps: Vec<Step>,
    /// Where to save the canvas once all steps ran.
    pub output: Option<PathBuf>,
}

/// What a replay did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    /// Steps that asked the host for a redraw.
    pub redraws: usize,
    /// Files written by save steps and the final output.
    pub saved: Vec<PathBuf>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Script(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Feed every step to `editor`, then save to [`Script::output`].
    ///
    /// Stops at the first failed save.
    pub fn replay(&self, editor: &mut Editor) -> AppResult<ReplayReport> {
        let mut report = ReplayReport::default();
        let mut buttons = ButtonState::NONE;

        for step in &self.steps {
            let redraw = match step {
                Step::PointerDown { x, y, button } => {
                    buttons.set(*button, true);
                    editor.on_pointer_down(PixelPoint::new(*x, *y), buttons)
                }
                Step::PointerMove { x, y } => editor.on_pointer_move(PixelPoint::new(*x, *y), buttons),
                Step::PointerUp { x, y, button } => {
                    buttons.set(*button, false);
                    editor.on_pointer_up(PixelPoint::new(*x, *y))
                }
                Step::Tool { tool } => editor.on_tool_selected(*tool),
                Step::Color { color } => {
                    editor.on_color_requested(&mut FixedColor(*color));
                    false
                }
                Step::Thickness { value } => {
                    editor.on_thickness_changed(*value);
                    false
                }
                Step::BrushShape { shape } => {
                    editor.on_brush_shape_changed(*shape);
                    false
                }
                Step::Clear => editor.on_clear(),
                Step::Escape => editor.on_escape(),
                Step::Resize { width, height } => editor.on_resize(*width, *height),
                Step::Save { path } => {
                    if let Some(saved) = editor.on_save_requested(&mut FixedPath(path.clone()))? {
                        report.saved.push(saved);
                    }
                    false
                }
            };
            report.steps += 1;
            if redraw {
                report.redraws += 1;
                // A skipped frame is retried on the next redraw.
                if let Err(e) = editor.rendered_frame() {
                    log::warn!("Redraw after step {} failed: {}", report.steps, e);
                }
            }
        }

        if let Some(output) = &self.output {
            editor.save_to(output)?;
            report.saved.push(output.clone());
        }
        log::info!(
            "Replayed {} steps ({} redraws, {} files saved)",
            report.steps,
            report.redraws,
            report.saved.len()
        );
        Ok(report)
    }
}
