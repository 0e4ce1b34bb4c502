//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - One fixed step per tick, no delta-time scaling
//! - Seeded RNG only
//! - Total operations: out-of-range movement is clamped or reflected

pub mod collision;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Rect, bounce_angle};
pub use score::{MatchPhase, MatchState};
pub use state::{Ball, Direction, GameEvent, GameState, Paddle, Side, Snapshot};
pub use tick::{TickInput, tick};
