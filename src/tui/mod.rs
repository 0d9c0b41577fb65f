//! Line-oriented live display.
//!
//! Unlike a full-screen TUI this draws into the normal screen buffer and
//! repaints in place with cursor movements, so the last frame stays in the
//! scrollback after exit.

mod app;
mod input;
mod render;

pub use app::{App, AppError, Settings};
pub use input::{InputDrainer, drain, erase_sequence};
pub use render::{FrameLayout, Renderer, write_frame};
