//! Collision detection and response for axis-aligned boxes
//!
//! The ball is a circle; paddle and blocks are rectangles with a top-left
//! origin and y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::BlockBounce;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y) + self.half_extents()
    }
}

/// Check whether a circle overlaps a rectangle
///
/// Touching counts as a hit.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let half = rect.half_extents();
    let d = (center - rect.center()).abs();

    if d.x > half.x + radius || d.y > half.y + radius {
        return false;
    }
    if d.x <= half.x || d.y <= half.y {
        return true;
    }

    // Near a corner: compare against the corner point
    let corner = d - half;
    corner.length_squared() <= radius * radius
}

/// Which velocity components a block hit flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounce {
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Bounce {
    /// Apply to a velocity
    #[inline]
    pub fn apply(&self, vel: Vec2) -> Vec2 {
        Vec2::new(
            if self.flip_x { -vel.x } else { vel.x },
            if self.flip_y { -vel.y } else { vel.y },
        )
    }
}

/// Decide the bounce for a ball that overlaps a block
pub fn block_bounce(ball_pos: Vec2, ball_radius: f32, block: &Rect, mode: BlockBounce) -> Bounce {
    match mode {
        BlockBounce::Literal => {
            // Each edge test flips once; both pass for any x inside the span
            let mut flips = 0;
            if ball_pos.x > block.left() {
                flips += 1;
            }
            if ball_pos.x < block.right() {
                flips += 1;
            }
            Bounce {
                flip_x: flips % 2 == 1,
                flip_y: true,
            }
        }
        BlockBounce::PenetrationAxis => {
            // Offset from center, normalized by the radius-expanded box
            let reach = block.half_extents() + Vec2::splat(ball_radius);
            let offset = (ball_pos - block.center()) / reach;
            if offset.x.abs() > offset.y.abs() {
                Bounce {
                    flip_x: true,
                    flip_y: false,
                }
            } else {
                Bounce {
                    flip_x: false,
                    flip_y: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: Rect = Rect::new(17.0, 10.0, 30.0, 10.0);

    #[test]
    fn test_overlap_edges_and_corners() {
        let r = 5.0;
        // Directly below the block, touching
        assert!(circle_rect_overlap(Vec2::new(30.0, 25.0), r, &BLOCK));
        // Just out of reach below
        assert!(!circle_rect_overlap(Vec2::new(30.0, 25.5), r, &BLOCK));
        // Left side, touching
        assert!(circle_rect_overlap(Vec2::new(12.0, 15.0), r, &BLOCK));
        // Diagonal from the bottom-right corner: inside the box reach, outside the circle
        assert!(!circle_rect_overlap(Vec2::new(51.0, 24.0), r, &BLOCK));
        // Diagonal from the corner within radius
        assert!(circle_rect_overlap(Vec2::new(50.0, 23.0), r, &BLOCK));
        // Center inside the block
        assert!(circle_rect_overlap(BLOCK.center(), r, &BLOCK));
    }

    #[test]
    fn test_literal_bounce_cancels_inside_span() {
        let bounce = block_bounce(Vec2::new(30.0, 22.0), 5.0, &BLOCK, BlockBounce::Literal);
        assert_eq!(
            bounce,
            Bounce {
                flip_x: false,
                flip_y: true
            }
        );
    }

    #[test]
    fn test_literal_bounce_flips_outside_span() {
        // Left of the block: only `x < right` passes
        let left = block_bounce(Vec2::new(14.0, 15.0), 5.0, &BLOCK, BlockBounce::Literal);
        assert!(left.flip_x && left.flip_y);

        // Right of the block: only `x > left` passes
        let right = block_bounce(Vec2::new(50.0, 15.0), 5.0, &BLOCK, BlockBounce::Literal);
        assert!(right.flip_x && right.flip_y);
    }

    #[test]
    fn test_penetration_axis_bounce() {
        let below = block_bounce(
            Vec2::new(30.0, 24.0),
            5.0,
            &BLOCK,
            BlockBounce::PenetrationAxis,
        );
        assert_eq!(
            below,
            Bounce {
                flip_x: false,
                flip_y: true
            }
        );

        let side = block_bounce(
            Vec2::new(13.0, 16.0),
            5.0,
            &BLOCK,
            BlockBounce::PenetrationAxis,
        );
        assert_eq!(
            side,
            Bounce {
                flip_x: true,
                flip_y: false
            }
        );
    }

    #[test]
    fn test_bounce_apply() {
        let vel = Vec2::new(75.0, -150.0);
        let flipped = Bounce {
            flip_x: true,
            flip_y: true,
        }
        .apply(vel);
        assert_eq!(flipped, Vec2::new(-75.0, 150.0));
        assert_eq!(Bounce::default().apply(vel), vel);
    }
}
