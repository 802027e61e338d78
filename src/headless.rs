//! Fixed-step runner without a window
//!
//! Plays the game with the [`Autopilot`] for a bounded number of frames.
//! Used by the native binary and by soak tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{BlockBounce, Config, StageAdvance, StageSpeedup};
use crate::consts::NOMINAL_DT;
use crate::error::ConfigError;
use crate::sim::{Autopilot, GameEvent, World, tick};

/// How long and how finely to run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Upper bound on frames; the run stops earlier on game over
    pub frames: u32,
    /// Seconds per frame
    pub dt: f32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 3600,
            dt: NOMINAL_DT,
        }
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u32,
    pub score: u64,
    pub stage: u32,
    pub blocks_destroyed: u32,
    pub paddle_hits: u32,
    pub game_over: bool,
    pub ball_pos: Vec2,
    pub stage_advance: StageAdvance,
    pub block_bounce: BlockBounce,
    pub stage_speedup_mode: StageSpeedup,
}

/// Run the autopilot against a fresh world
pub fn run(config: &Config, options: &RunOptions) -> Result<RunSummary, ConfigError> {
    config.validate()?;
    if !(options.dt > 0.0 && options.dt.is_finite()) {
        return Err(ConfigError::invalid("dt", format!("must be positive, got {}", options.dt)));
    }

    let mut world = World::new(config);
    let mut pilot = Autopilot::default();
    let mut frames = 0;
    let mut blocks_destroyed = 0;
    let mut paddle_hits = 0;

    log::info!(
        "Headless run: up to {} frames at dt={:.4} (stage_advance={}, block_bounce={}, stage_speedup={})",
        options.frames,
        options.dt,
        config.stage_advance.as_str(),
        config.block_bounce.as_str(),
        config.stage_speedup_mode.as_str()
    );

    while frames < options.frames && !world.state.game_over {
        let input = pilot.next_input(&world, config);
        tick(&mut world, &input, config, options.dt);
        frames += 1;

        for event in world.drain_events() {
            match event {
                GameEvent::BlockDestroyed { .. } => blocks_destroyed += 1,
                GameEvent::PaddleHit => paddle_hits += 1,
                _ => {}
            }
        }
    }

    let summary = RunSummary {
        frames,
        score: world.state.score,
        stage: world.state.stage,
        blocks_destroyed,
        paddle_hits,
        game_over: world.state.game_over,
        ball_pos: world.ball.pos,
        stage_advance: config.stage_advance,
        block_bounce: config.block_bounce,
        stage_speedup_mode: config.stage_speedup_mode,
    };

    log::info!(
        "Headless run finished after {} frames: score {} (stage {}, game over: {})",
        summary.frames,
        summary.score,
        summary.stage,
        summary.game_over
    );

    Ok(summary)
}
