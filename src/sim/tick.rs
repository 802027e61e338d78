//! Per-frame simulation tick
//!
//! Advances the world by one rendered frame: restart, paddle, ball, walls,
//! blocks, stage progression.

use glam::Vec2;

use super::collision::{block_bounce, circle_rect_overlap};
use super::state::{Ball, GameEvent, Paddle, Wall, World};
use crate::config::{Config, StageAdvance, StageSpeedup};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left key is held (level)
    pub left: bool,
    /// Move-right key is held (level)
    pub right: bool,
    /// Reset key went down this frame (edge)
    pub reset: bool,
}

/// Advance the world by one frame of `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, config: &Config, dt: f32) {
    // Restart is honored even after game over
    if input.reset {
        restart(world, config);
    }

    if world.state.game_over {
        return;
    }

    update_paddle(&mut world.paddle, input, config, dt);
    update_ball(world, config, dt);
}

/// Move the paddle from held keys and clamp it to the screen
pub fn update_paddle(paddle: &mut Paddle, input: &TickInput, config: &Config, dt: f32) {
    if input.left {
        paddle.x -= paddle.speed * dt;
        paddle.moving_left = true;
        paddle.stationary = false;
    } else {
        paddle.moving_left = false;
        paddle.stationary = true;
    }

    // Evaluated after left, so right wins when both are held
    if input.right {
        paddle.x += paddle.speed * dt;
        paddle.moving_left = false;
        paddle.stationary = false;
    }

    if paddle.x <= 0.0 {
        paddle.x = 0.0;
    }
    let max_x = config.screen_width - paddle.width;
    if paddle.x >= max_x {
        paddle.x = max_x;
    }
}

fn update_ball(world: &mut World, config: &Config, dt: f32) {
    let ball = &mut world.ball;
    ball.pos += ball.vel * dt;
    ball.update_direction();

    if bounce_off_paddle(ball, &world.paddle) {
        world.events.push(GameEvent::PaddleHit);
        if world.paddle.stationary {
            // Straight bounce; nothing else moves the ball this frame
            return;
        }
    }

    bounce_off_walls(world, config);
    hit_blocks(world, config);
}

/// Returns true on contact. Snaps the ball above the paddle and reverses
/// vertical motion; a moving paddle sends the ball back the way the paddle
/// is going.
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if !circle_rect_overlap(ball.pos, ball.radius, &paddle.rect()) {
        return false;
    }

    ball.pos.y = paddle.y - ball.radius;
    ball.vel.y = -ball.vel.y;

    if !paddle.stationary && paddle.moving_left != ball.moving_left {
        ball.vel.x = -ball.vel.x;
    }
    true
}

fn bounce_off_walls(world: &mut World, config: &Config) {
    let ball = &mut world.ball;
    let r = ball.radius;

    if ball.pos.x < r {
        ball.pos.x = r;
        ball.vel.x = -ball.vel.x;
        world.events.push(GameEvent::WallBounce(Wall::Left));
    }
    if ball.pos.x > config.screen_width - r {
        ball.pos.x = config.screen_width - r;
        ball.vel.x = -ball.vel.x;
        world.events.push(GameEvent::WallBounce(Wall::Right));
    }
    // Bottom edge ends the run; the ball is left where it is
    if ball.pos.y > config.screen_height - r && !world.state.game_over {
        world.state.game_over = true;
        world.events.push(GameEvent::GameOver);
        log::info!(
            "Game over: score {} at stage {}",
            world.state.score,
            world.state.stage
        );
    }
    if ball.pos.y < r {
        ball.pos.y = r;
        ball.vel.y = -ball.vel.y;
        world.events.push(GameEvent::WallBounce(Wall::Top));
    }
}

fn hit_blocks(world: &mut World, config: &Config) {
    let ball = &mut world.ball;
    let mut destroyed = 0usize;

    // Column-major scan; every live block touching the ball is destroyed
    for block in world.blocks.iter_mut().filter(|b| b.alive) {
        let rect = block.rect();
        if !circle_rect_overlap(ball.pos, ball.radius, &rect) {
            continue;
        }

        let bounce = block_bounce(ball.pos, ball.radius, &rect, config.block_bounce);
        ball.vel = bounce.apply(ball.vel);
        world.state.score += u64::from(block.points);
        block.alive = false;
        destroyed += 1;

        log::debug!(
            "Block [{}][{}] destroyed (+{}, score {})",
            block.col,
            block.row,
            block.points,
            world.state.score
        );
        world.events.push(GameEvent::BlockDestroyed {
            col: block.col,
            row: block.row,
            points: block.points,
        });
    }

    if destroyed > 0
        && config.stage_advance == StageAdvance::WhenCleared
        && !world.state.game_over
        && world.alive_count() == 0
    {
        next_stage(world, config);
    }
}

/// Lay out a fresh grid, award the stage bonus and speed the ball up
pub fn next_stage(world: &mut World, config: &Config) {
    world.reset_blocks(config);
    world.state.score += config.stage_bonus;
    world.state.stage += 1;

    let vel = world.ball.vel;
    let step = Vec2::splat(config.stage_speedup);
    world.ball.vel = match config.stage_speedup_mode {
        StageSpeedup::Signed => vel + step,
        StageSpeedup::Magnitude => vel + step.copysign(vel),
    };

    world.events.push(GameEvent::StageCleared {
        stage: world.state.stage,
    });
    log::info!(
        "Stage {} cleared: score {}, ball velocity {:?}",
        world.state.stage,
        world.state.score,
        world.ball.vel
    );
}

/// Restore the initial layout and clear the run
pub fn restart(world: &mut World, config: &Config) {
    log::info!(
        "Restart (previous score {}, game over: {})",
        world.state.score,
        world.state.game_over
    );

    world.reset_blocks(config);
    world.state.game_over = false;
    world.state.score = 0;
    world.state.stage = 0;
    world.ball.reset(config);
    world.paddle.x = config.paddle_start_x();

    world.events.push(GameEvent::Restarted);
}
