//! Platform abstraction layer
//!
//! Handles the pieces the frame driver feeds into the simulation:
//! - Input events (held keys, one-shot presses)
//! - Time (frame delta, FPS)

pub mod input;
pub mod time;

pub use input::{Action, InputState, KeyBindings};
pub use time::FrameClock;
