//! Turns a read-only world snapshot into a vertex list
//!
//! Text (score, game-over banner) is drawn by the HUD layer; this module
//! only provides the strings.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::config::Config;
use crate::sim::{BlockTier, GameState, Rect, World};

/// Triangles per ball
const BALL_SEGMENTS: u32 = 20;

pub fn tier_color(tier: BlockTier) -> [f32; 4] {
    match tier {
        BlockTier::Red => colors::BLOCK_RED,
        BlockTier::Orange => colors::BLOCK_ORANGE,
        BlockTier::Green => colors::BLOCK_GREEN,
        BlockTier::Yellow => colors::BLOCK_YELLOW,
    }
}

/// Build the frame: live blocks, paddle, ball, then the game-over shade
pub fn build_scene(world: &World, config: &Config) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(world.blocks.len() * 6 + 6 + BALL_SEGMENTS as usize * 3 + 6);

    for block in world.alive_blocks() {
        shapes::rect(&mut out, &block.rect(), tier_color(block.tier));
    }

    shapes::rect(&mut out, &world.paddle.rect(), colors::PADDLE);
    shapes::circle(
        &mut out,
        world.ball.pos,
        world.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    );

    if world.state.game_over {
        let screen = Rect::new(0.0, 0.0, config.screen_width, config.screen_height);
        shapes::rect(&mut out, &screen, colors::GAME_OVER_SHADE);
    }

    out
}

/// HUD score text
pub fn score_label(state: &GameState) -> String {
    format!("score: {}", state.score)
}

/// HUD banner, shown only when the run has ended
pub fn status_label(state: &GameState) -> Option<&'static str> {
    state.game_over.then_some("GAME OVER - press R to restart")
}
