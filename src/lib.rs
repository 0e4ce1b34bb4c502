//! Pong - classic two-player table tennis
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (paddles, ball physics, match scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Frontend key bindings and palette

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{KeyAction, KeyBindings, Palette, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep (one tick)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Field dimensions (pixels, origin top-left, y down)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Pixels per tick along each axis right after a serve
    pub const BALL_START_SPEED: f32 = 3.0;
    /// Added to the speed scalar on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Deflection at the very edge of a paddle (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 75.0;

    /// First side to reach this many points wins the match
    pub const WINNING_SCORE: u32 = 3;
}

/// Center of the playing field
#[inline]
pub fn field_center() -> Vec2 {
    Vec2::new(consts::FIELD_WIDTH / 2.0, consts::FIELD_HEIGHT / 2.0)
}

/// Sign used when rescaling velocity components: anything not strictly
/// positive counts as negative.
#[inline]
pub fn sign_or_negative(v: f32) -> f32 {
    if v > 0.0 { 1.0 } else { -1.0 }
}
