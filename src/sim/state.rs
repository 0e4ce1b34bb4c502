//! Game entities and session state
//!
//! The session ([`GameState`]) owns both paddles, the ball, the match score and
//! the serve RNG. The frame driver holds it and passes it into
//! [`tick`](super::tick::tick) by `&mut`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, bounce_angle};
use super::score::MatchState;
use crate::consts::*;
use crate::{field_center, sign_or_negative};

/// Which half of the field a paddle (or player) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Player name shown in the HUD
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left Player",
            Side::Right => "Right Player",
        }
    }
}

/// Vertical paddle movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A player's paddle. `x` is fixed, `y` is the top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick
    pub speed: f32,
}

impl Paddle {
    /// Paddle for `side`, inset from its wall and vertically centered
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => FIELD_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            side,
            x,
            y: FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Lowest allowed top edge
    pub fn max_y(&self) -> f32 {
        FIELD_HEIGHT - self.height
    }

    /// Place the paddle, clamped to the field
    pub fn set_y(&mut self, y: f32) {
        self.y = y.clamp(0.0, self.max_y());
    }

    /// Move one tick's worth in `direction`, stopping at the walls
    pub fn advance(&mut self, direction: Direction) {
        let delta = match direction {
            Direction::Up => -self.speed,
            Direction::Down => self.speed,
        };
        self.set_y(self.y + delta);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The ball. `speed` is authoritative; `vel` is re-derived from it on every
/// serve, paddle hit and speed increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    /// Ball served from the center in a random diagonal direction
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: BALL_START_SPEED,
            radius: BALL_RADIUS,
        };
        ball.reset(rng);
        ball
    }

    /// Re-serve from the field center at the starting speed.
    ///
    /// Each axis gets an independent coin flip, so all four diagonals are
    /// equally likely.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.pos = field_center();
        self.speed = BALL_START_SPEED;
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(sx, sy) * self.speed;
    }

    /// Integrate one tick and bounce off the top and bottom walls.
    ///
    /// No de-penetration: the ball may overlap a wall for a frame.
    pub fn advance(&mut self) {
        self.pos += self.vel;

        if self.pos.y - self.radius <= 0.0 || self.pos.y + self.radius >= FIELD_HEIGHT {
            self.vel.y = -self.vel.y;
        }
    }

    /// Bounding square used for every collision test
    pub fn bounds(&self) -> Rect {
        Rect::square_around(self.pos, self.radius)
    }

    /// Deflect off `paddle` if overlapping. Returns whether it hit.
    ///
    /// The outgoing angle depends only on where the ball struck the paddle,
    /// not on the incoming direction. Horizontal travel always points away
    /// from the paddle's side.
    pub fn handle_paddle_collision(&mut self, paddle: &Paddle) -> bool {
        let rect = paddle.rect();
        if !self.bounds().overlaps(&rect) {
            return false;
        }

        let angle = bounce_angle(&rect, self.pos.y);
        let away = match paddle.side {
            Side::Left => 1.0,
            Side::Right => -1.0,
        };
        self.vel = Vec2::new(away * self.speed * angle.cos(), -self.speed * angle.sin());
        true
    }

    /// Bump the speed scalar and push both components out to it.
    ///
    /// Only the signs of `vel` survive, not its proportions; a zero component
    /// comes out negative.
    pub fn increase_speed(&mut self) {
        self.speed += BALL_SPEED_INCREMENT;
        self.vel = Vec2::new(
            self.speed * sign_or_negative(self.vel.x),
            self.speed * sign_or_negative(self.vel.y),
        );
    }

    /// Which side earns a point, if the ball has reached a side wall
    pub fn check_scoring(&self) -> Option<Side> {
        if self.pos.x - self.radius <= 0.0 {
            Some(Side::Right)
        } else if self.pos.x + self.radius >= FIELD_WIDTH {
            Some(Side::Left)
        } else {
            None
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball deflected off a paddle; `speed` is the new speed scalar
    PaddleHit { side: Side, speed: f32 },
    /// Point awarded, with the score after it
    PointScored { scorer: Side, left: u32, right: u32 },
    MatchWon { winner: Side },
    MatchRestarted,
}

/// Read-only view of everything the renderer and HUD draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub left_paddle: Rect,
    pub right_paddle: Rect,
    pub ball_center: Vec2,
    pub ball_radius: f32,
    pub left_score: u32,
    pub right_score: u32,
    pub game_over: bool,
    pub winner: Option<Side>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: MatchState,
}

impl GameState {
    /// Fresh match with the given serve seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(&mut rng);
        Self {
            seed,
            rng,
            time_ticks: 0,
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball,
            score: MatchState::new(),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Serve a new ball from the center
    pub fn reset_ball(&mut self) {
        self.ball.reset(&mut self.rng);
    }

    /// Clear the score and re-serve. Paddles stay where they are.
    pub fn reset_match(&mut self) {
        self.score.reset();
        self.reset_ball();
    }

    pub fn is_game_over(&self) -> bool {
        self.score.is_game_over()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            left_paddle: self.paddle(Side::Left).rect(),
            right_paddle: self.paddle(Side::Right).rect(),
            ball_center: self.ball.pos,
            ball_radius: self.ball.radius,
            left_score: self.score.left_score,
            right_score: self.score.right_score,
            game_over: self.score.is_game_over(),
            winner: self.score.winner,
        }
    }
}
