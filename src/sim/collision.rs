//! Collision detection and paddle deflection
//!
//! Everything in Pong is a box: paddles are rectangles and the ball is tested
//! as its bounding square. Overlap is strict, so boxes that only share an
//! edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_BOUNCE_ANGLE_DEG;

/// Axis-aligned rectangle in field coordinates (origin top-left, y down)
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

    /// Square of side `2 * half_extent` centered on `center`
    pub fn square_around(center: Vec2, half_extent: f32) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
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
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test. Degenerate (zero-area) rectangles never overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Outgoing bounce angle (radians) for a ball hitting `paddle` at height `ball_y`
///
/// The offset from the paddle's center is normalized by half the paddle height
/// and clamped to [-1, 1], then scaled linearly to the maximum bounce angle.
/// Positive angles mean the ball hit above the center.
pub fn bounce_angle(paddle: &Rect, ball_y: f32) -> f32 {
    let half_height = paddle.height / 2.0;
    let offset = ((paddle.center().y - ball_y) / half_height).clamp(-1.0, 1.0);
    offset * MAX_BOUNCE_ANGLE_DEG.to_radians()
}
