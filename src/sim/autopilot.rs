//! Demo autopilot - steers the paddle so the game can play itself
//!
//! Used by the headless runner and the browser `?demo` mode. It only ever
//! produces a [`TickInput`], so it drives the simulation exactly like a
//! keyboard would.

use super::state::World;
use super::tick::TickInput;
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Don't move when the target is this close to the paddle center (px)
    pub dead_zone: f32,
    /// Fraction of the paddle half-width used to vary the contact point
    pub aim_wobble: f32,
    ticks: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            dead_zone: 4.0,
            aim_wobble: 0.3,
            ticks: 0,
        }
    }
}

impl Autopilot {
    /// Decide the keys to hold for the next frame
    pub fn next_input(&mut self, world: &World, config: &Config) -> TickInput {
        self.ticks += 1;

        if world.state.game_over {
            return TickInput::default();
        }

        // Oscillating offset so the ball doesn't settle into a fixed loop
        let time_factor = self.ticks as f32 * 0.01;
        let wobble = (time_factor.sin() * 0.7 + (time_factor * 0.7).sin() * 0.3)
            * self.aim_wobble
            * world.paddle.width
            / 2.0;

        let target = predict_landing_x(world, config) + wobble;
        let delta = target - world.paddle.center_x();

        TickInput {
            left: delta < -self.dead_zone,
            right: delta > self.dead_zone,
            reset: false,
        }
    }
}

/// Where the ball will cross the paddle's top edge, folding in side-wall
/// bounces. A rising ball is simply tracked where it is.
pub fn predict_landing_x(world: &World, config: &Config) -> f32 {
    let ball = &world.ball;
    if ball.vel.y <= 0.0 {
        return ball.pos.x;
    }

    let contact_y = world.paddle.y - ball.radius;
    let t = ((contact_y - ball.pos.y) / ball.vel.y).max(0.0);
    let raw_x = ball.pos.x + ball.vel.x * t;

    // Reflect into [radius, screen_width - radius]
    let span = config.screen_width - 2.0 * ball.radius;
    if span <= 0.0 {
        return config.screen_width / 2.0;
    }
    let mut m = (raw_x - ball.radius).rem_euclid(2.0 * span);
    if m > span {
        m = 2.0 * span - m;
    }
    ball.radius + m
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_predict_straight_drop() {
        let config = Config::default();
        let mut world = World::new(&config);
        world.ball.pos = Vec2::new(400.0, 225.0);
        world.ball.vel = Vec2::new(75.0, 150.0);

        // Contact at y = 405: t = 1.2s, x = 400 + 90
        let x = predict_landing_x(&world, &config);
        assert!((x - 490.0).abs() < 0.01);
    }

    #[test]
    fn test_predict_folds_wall_bounce() {
        let config = Config::default();
        let mut world = World::new(&config);
        world.ball.pos = Vec2::new(700.0, 105.0);
        world.ball.vel = Vec2::new(150.0, 150.0);

        // Unfolded x = 700 + 300 = 1000, reflected off the right wall at 795
        let x = predict_landing_x(&world, &config);
        assert!((x - 590.0).abs() < 0.01);
    }

    #[test]
    fn test_rising_ball_tracked_directly() {
        let config = Config::default();
        let mut world = World::new(&config);
        world.ball.pos = Vec2::new(123.0, 300.0);
        world.ball.vel = Vec2::new(75.0, -150.0);
        assert_eq!(predict_landing_x(&world, &config), 123.0);
    }

    #[test]
    fn test_steers_toward_ball() {
        let config = Config::default();
        let mut world = World::new(&config);
        let mut pilot = Autopilot {
            aim_wobble: 0.0,
            ..Default::default()
        };

        world.ball.vel = Vec2::new(0.0, -150.0);
        world.ball.pos = Vec2::new(100.0, 200.0);
        let input = pilot.next_input(&world, &config);
        assert!(input.left && !input.right);

        world.ball.pos = Vec2::new(700.0, 200.0);
        let input = pilot.next_input(&world, &config);
        assert!(input.right && !input.left);

        world.ball.pos = Vec2::new(world.paddle.center_x() + 1.0, 200.0);
        let input = pilot.next_input(&world, &config);
        assert_eq!(input, TickInput::default());
    }
}
