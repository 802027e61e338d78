//! Breakout - A classic paddle-and-blocks arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (paddle, ball, blocks, score)
//! - `config`: Immutable game configuration passed into the simulation
//! - `platform`: Input edge tracking and frame timing
//! - `renderer`: WebGPU rendering pipeline
//! - `headless`: Fixed-step runner for demos and soak runs

pub mod config;
pub mod error;
pub mod headless;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{BlockBounce, Config, StageAdvance, StageSpeedup};
pub use error::ConfigError;

/// Default game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 450.0;

    /// Block grid shape
    pub const GRID_COLS: usize = 24;
    pub const GRID_ROWS: usize = 8;

    /// Block geometry
    pub const BLOCK_WIDTH: i32 = 30;
    pub const BLOCK_HEIGHT: i32 = 10;
    /// Top-left of block [0][0]
    pub const BLOCK_ORIGIN_X: i32 = 17;
    pub const BLOCK_ORIGIN_Y: i32 = 10;
    /// Distance between neighbouring block origins
    pub const BLOCK_SPACING_X: i32 = 32;
    pub const BLOCK_SPACING_Y: i32 = 12;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the bottom edge to the paddle's top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;
    /// Horizontal speed (pixels/s)
    pub const PADDLE_SPEED: f32 = 150.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_START_VEL_X: f32 = 75.0;
    pub const BALL_START_VEL_Y: f32 = 150.0;

    /// Score bonus for clearing a stage
    pub const STAGE_BONUS: u64 = 5000;
    /// Added to each velocity component's magnitude per stage
    pub const STAGE_SPEEDUP: f32 = 40.0;

    /// Nominal frame time used before the first measured frame
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Longest frame the simulation will integrate in one step
    pub const MAX_FRAME_DT: f32 = 0.1;
}
