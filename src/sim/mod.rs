//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One `tick` per rendered frame, driven by the caller's `dt`
//! - Configuration is passed in, never read from globals
//! - Stable iteration order (column-major block grid)

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, predict_landing_x};
pub use collision::{Bounce, Rect, block_bounce, circle_rect_overlap};
pub use state::{Ball, Block, BlockTier, GameEvent, GameState, Paddle, Wall, World};
pub use tick::{TickInput, next_stage, restart, tick, update_paddle};
