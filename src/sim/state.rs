//! Game state and core simulation types
//!
//! Everything the simulation step mutates lives in [`World`]. The renderer
//! only ever reads it.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::Config;

/// Which screen edge the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball bounced off a wall
    WallBounce(Wall),
    /// A block was destroyed and its points scored
    BlockDestroyed { col: usize, row: usize, points: u32 },
    /// Every block was destroyed and a fresh grid was laid out
    StageCleared { stage: u32 },
    /// Ball crossed the bottom edge
    GameOver,
    /// Reset input restored the initial layout
    Restarted,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge (pixels), clamped to [0, screen_width - width]
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per second
    pub speed: f32,
    /// Last movement this frame was to the left
    pub moving_left: bool,
    /// No directional input this frame
    pub stationary: bool,
}

impl Paddle {
    pub fn new(config: &Config) -> Self {
        Self {
            x: config.paddle_start_x(),
            y: config.paddle_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
            moving_left: false,
            stationary: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Horizontal center of the paddle
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Derived from the sign of `vel.x`; kept when `vel.x` is zero
    pub moving_left: bool,
}

impl Ball {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: config.screen_center(),
            vel: config.ball_start_vel(),
            radius: config.ball_radius,
            moving_left: false,
        }
    }

    /// Back to screen center with the starting velocity
    pub fn reset(&mut self, config: &Config) {
        self.pos = config.screen_center();
        self.vel = config.ball_start_vel();
    }

    /// Refresh `moving_left` from the current velocity
    pub fn update_direction(&mut self) {
        if self.vel.x > 0.0 {
            self.moving_left = false;
        } else if self.vel.x < 0.0 {
            self.moving_left = true;
        }
    }
}

/// Block color tier, decided by grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTier {
    Red,
    Orange,
    Green,
    Yellow,
}

impl BlockTier {
    /// Rows come in pairs from the top: red, orange, green, yellow.
    /// Rows past the last pair stay yellow.
    pub fn for_row(row: usize) -> Self {
        match row {
            0 | 1 => BlockTier::Red,
            2 | 3 => BlockTier::Orange,
            4 | 5 => BlockTier::Green,
            _ => BlockTier::Yellow,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            BlockTier::Red => 40,
            BlockTier::Orange => 30,
            BlockTier::Green => 20,
            BlockTier::Yellow => 10,
        }
    }
}

/// A block in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub col: usize,
    pub row: usize,
    /// Top-left corner (grid home)
    pub pos: IVec2,
    pub width: i32,
    pub height: i32,
    pub tier: BlockTier,
    pub points: u32,
    /// Destroyed blocks stay in the grid with `alive == false`
    pub alive: bool,
}

impl Block {
    pub fn new(config: &Config, col: usize, row: usize) -> Self {
        let tier = BlockTier::for_row(row);
        Self {
            col,
            row,
            pos: config.block_home(col, row),
            width: config.block_width,
            height: config.block_height,
            tier,
            points: tier.points(),
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as f32,
            self.pos.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }

    /// Move back to the grid home and revive
    pub fn reset(&mut self, config: &Config) {
        self.pos = config.block_home(self.col, self.row);
        self.alive = true;
    }
}

/// Score and run status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub game_over: bool,
    /// Stages cleared since the last restart
    pub stage: u32,
}

/// Complete simulation world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub paddle: Paddle,
    pub ball: Ball,
    /// Column-major grid: index = col * rows + row
    pub blocks: Vec<Block>,
    pub state: GameState,
    rows: usize,
    /// Events from the most recent ticks (not part of the saved state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl World {
    /// Lay out the initial world for a configuration
    pub fn new(config: &Config) -> Self {
        let mut blocks = Vec::with_capacity(config.block_count());
        for col in 0..config.grid_cols {
            for row in 0..config.grid_rows {
                blocks.push(Block::new(config, col, row));
            }
        }

        Self {
            paddle: Paddle::new(config),
            ball: Ball::new(config),
            blocks,
            state: GameState::default(),
            rows: config.grid_rows,
            events: Vec::new(),
        }
    }

    /// Block at [col][row]
    pub fn block(&self, col: usize, row: usize) -> Option<&Block> {
        if row >= self.rows {
            return None;
        }
        self.blocks.get(col * self.rows + row)
    }

    pub fn block_mut(&mut self, col: usize, row: usize) -> Option<&mut Block> {
        if row >= self.rows {
            return None;
        }
        self.blocks.get_mut(col * self.rows + row)
    }

    pub fn alive_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive_blocks().count()
    }

    /// Put every block back at its grid home, alive
    pub fn reset_blocks(&mut self, config: &Config) {
        for block in &mut self.blocks {
            block.reset(config);
        }
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
