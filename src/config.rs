//! Game configuration
//!
//! Screen geometry, grid layout and tuning live here instead of in globals,
//! so the simulation step can be driven with any layout. Loaded from JSON;
//! fields missing from the file keep their defaults.

use std::path::Path;
use std::str::FromStr;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// When the stage advances to a fresh grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StageAdvance {
    /// Never advance; a cleared grid stays empty until restart
    #[default]
    Disabled,
    /// Advance (bonus + speed-up + fresh grid) once every block is destroyed
    WhenCleared,
}

impl StageAdvance {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageAdvance::Disabled => "disabled",
            StageAdvance::WhenCleared => "when_cleared",
        }
    }
}

impl FromStr for StageAdvance {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" | "off" => Ok(StageAdvance::Disabled),
            "when_cleared" | "when-cleared" | "cleared" => Ok(StageAdvance::WhenCleared),
            _ => Err(ConfigError::UnknownOption {
                kind: "stage advance mode",
                value: s.to_string(),
            }),
        }
    }
}

/// How a ball-block hit decides which velocity components flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockBounce {
    /// Vertical always flips; horizontal flips once per edge test
    /// (`x > left`, `x < right`), which cancels for most hits
    #[default]
    Literal,
    /// Flip only the axis the ball entered through, judged from the
    /// ball's offset to the block center
    PenetrationAxis,
}

impl BlockBounce {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockBounce::Literal => "literal",
            BlockBounce::PenetrationAxis => "penetration_axis",
        }
    }
}

impl FromStr for BlockBounce {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(BlockBounce::Literal),
            "penetration_axis" | "penetration-axis" | "axis" => Ok(BlockBounce::PenetrationAxis),
            _ => Err(ConfigError::UnknownOption {
                kind: "block bounce mode",
                value: s.to_string(),
            }),
        }
    }
}

/// How the stage speed-up is applied to the ball's velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StageSpeedup {
    /// Add the increment to both signed components, so a ball moving
    /// left or up slows down
    #[default]
    Signed,
    /// Add the increment to each component's magnitude, keeping direction
    Magnitude,
}

impl StageSpeedup {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageSpeedup::Signed => "signed",
            StageSpeedup::Magnitude => "magnitude",
        }
    }
}

impl FromStr for StageSpeedup {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "signed" => Ok(StageSpeedup::Signed),
            "magnitude" => Ok(StageSpeedup::Magnitude),
            _ => Err(ConfigError::UnknownOption {
                kind: "stage speed-up mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Block grid ===
    pub grid_cols: usize,
    pub grid_rows: usize,
    pub block_width: i32,
    pub block_height: i32,
    pub block_origin_x: i32,
    pub block_origin_y: i32,
    pub block_spacing_x: i32,
    pub block_spacing_y: i32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_offset: f32,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_vel_x: f32,
    pub ball_start_vel_y: f32,

    // === Stages ===
    pub stage_bonus: u64,
    pub stage_speedup: f32,

    // === Behavior switches ===
    pub stage_advance: StageAdvance,
    pub block_bounce: BlockBounce,
    pub stage_speedup_mode: StageSpeedup,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            grid_cols: GRID_COLS,
            grid_rows: GRID_ROWS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_origin_x: BLOCK_ORIGIN_X,
            block_origin_y: BLOCK_ORIGIN_Y,
            block_spacing_x: BLOCK_SPACING_X,
            block_spacing_y: BLOCK_SPACING_Y,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_start_vel_x: BALL_START_VEL_X,
            ball_start_vel_y: BALL_START_VEL_Y,

            stage_bonus: STAGE_BONUS,
            stage_speedup: STAGE_SPEEDUP,

            stage_advance: StageAdvance::default(),
            block_bounce: BlockBounce::default(),
            stage_speedup_mode: StageSpeedup::default(),
        }
    }
}

impl Config {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;

        if self.grid_cols == 0 {
            return Err(ConfigError::invalid("grid_cols", "must be at least 1"));
        }
        if self.grid_rows == 0 {
            return Err(ConfigError::invalid("grid_rows", "must be at least 1"));
        }
        for (field, value) in [
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("block_spacing_x", self.block_spacing_x),
            ("block_spacing_y", self.block_spacing_y),
        ] {
            if value <= 0 {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        if self.paddle_width > self.screen_width {
            return Err(ConfigError::invalid(
                "paddle_width",
                format!("{} is wider than the screen", self.paddle_width),
            ));
        }
        if !(self.paddle_bottom_offset > 0.0 && self.paddle_bottom_offset < self.screen_height) {
            return Err(ConfigError::invalid(
                "paddle_bottom_offset",
                format!("must lie inside (0, {})", self.screen_height),
            ));
        }
        non_negative("paddle_speed", self.paddle_speed)?;

        positive("ball_radius", self.ball_radius)?;
        finite("ball_start_vel_x", self.ball_start_vel_x)?;
        finite("ball_start_vel_y", self.ball_start_vel_y)?;
        non_negative("stage_speedup", self.stage_speedup)?;

        // Grid must fit between the left/right walls and above the paddle.
        // Extents are computed in i64 so absurd sizes are rejected, not wrapped.
        let right = grid_extent(
            self.block_origin_x,
            self.grid_cols,
            self.block_spacing_x,
            self.block_width,
        );
        if self.block_origin_x < 0 || right.is_none_or(|x| x as f32 > self.screen_width) {
            return Err(ConfigError::invalid("grid_cols", "block grid does not fit horizontally"));
        }
        let bottom = grid_extent(
            self.block_origin_y,
            self.grid_rows,
            self.block_spacing_y,
            self.block_height,
        );
        if self.block_origin_y < 0 || bottom.is_none_or(|y| y as f32 > self.paddle_y()) {
            return Err(ConfigError::invalid("grid_rows", "block grid overlaps the paddle row"));
        }

        Ok(())
    }

    /// Grid home (top-left) of block [col][row]
    #[inline]
    pub fn block_home(&self, col: usize, row: usize) -> IVec2 {
        IVec2::new(
            self.block_origin_x + col as i32 * self.block_spacing_x,
            self.block_origin_y + row as i32 * self.block_spacing_y,
        )
    }

    /// Total number of grid cells
    pub fn block_count(&self) -> usize {
        self.grid_cols * self.grid_rows
    }

    /// Fixed y of the paddle's top edge
    #[inline]
    pub fn paddle_y(&self) -> f32 {
        self.screen_height - self.paddle_bottom_offset
    }

    /// Paddle x that centers it on screen
    pub fn paddle_start_x(&self) -> f32 {
        self.screen_width / 2.0 - self.paddle_width / 2.0
    }

    /// Rightmost legal paddle x
    #[inline]
    pub fn paddle_max_x(&self) -> f32 {
        self.screen_width - self.paddle_width
    }

    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    pub fn ball_start_vel(&self) -> Vec2 {
        Vec2::new(self.ball_start_vel_x, self.ball_start_vel_y)
    }
}

/// Far edge of the last cell along one axis, `None` on overflow
fn grid_extent(origin: i32, count: usize, spacing: i32, size: i32) -> Option<i64> {
    let steps = i64::try_from(count).ok()?.checked_sub(1)?;
    steps
        .checked_mul(i64::from(spacing))?
        .checked_add(i64::from(origin))?
        .checked_add(i64::from(size))
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_count(), 24 * 8);
        assert_eq!(config.paddle_y(), 410.0);
        assert_eq!(config.paddle_start_x(), 360.0);
    }

    #[test]
    fn test_block_home_layout() {
        let config = Config::default();
        assert_eq!(config.block_home(0, 0), IVec2::new(17, 10));
        assert_eq!(config.block_home(23, 7), IVec2::new(17 + 32 * 23, 10 + 12 * 7));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "stage_advance": "when_cleared", "paddle_speed": 300.0 }"#)
            .expect("partial config should parse");
        assert_eq!(config.stage_advance, StageAdvance::WhenCleared);
        assert_eq!(config.paddle_speed, 300.0);
        assert_eq!(config.block_bounce, BlockBounce::Literal);
        assert_eq!(config.stage_speedup_mode, StageSpeedup::Signed);
        assert_eq!(config.grid_cols, GRID_COLS);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Config::from_json(r#"{ "grid_rows": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_rows", .. }));

        let err = Config::from_json(r#"{ "paddle_width": 900.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "paddle_width", .. }));

        let err = Config::from_json(r#"{ "grid_cols": 40 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_cols", .. }));

        let err = Config::from_json(r#"{ "block_spacing_y": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "block_spacing_y", .. }));

        let err = Config::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_huge_grid_is_rejected_not_overflowed() {
        let err = Config::from_json(r#"{ "grid_cols": 100000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_cols", .. }));

        let err = Config::from_json(r#"{ "block_spacing_x": 2147483647 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_cols", .. }));

        let err = Config::from_json(r#"{ "grid_rows": 18446744073709551615 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_rows", .. }));
    }

    #[test]
    fn test_grid_extent() {
        assert_eq!(grid_extent(17, 24, 32, 30), Some(17 + 23 * 32 + 30));
        assert_eq!(grid_extent(0, usize::MAX, i32::MAX, i32::MAX), None);
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in [StageAdvance::Disabled, StageAdvance::WhenCleared] {
            assert_eq!(mode.as_str().parse::<StageAdvance>().ok(), Some(mode));
        }
        for mode in [BlockBounce::Literal, BlockBounce::PenetrationAxis] {
            assert_eq!(mode.as_str().parse::<BlockBounce>().ok(), Some(mode));
        }
        for mode in [StageSpeedup::Signed, StageSpeedup::Magnitude] {
            assert_eq!(mode.as_str().parse::<StageSpeedup>().ok(), Some(mode));
        }
        assert!("sideways".parse::<BlockBounce>().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
