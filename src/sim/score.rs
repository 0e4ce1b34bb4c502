//! Match scoring state machine
//!
//! A match is `InProgress` until either side reaches [`WINNING_SCORE`], at which
//! point it is `Finished` with the winner recorded. Only [`MatchState::reset`]
//! leaves `Finished`.

use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::consts::WINNING_SCORE;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    InProgress,
    /// Someone reached the winning score; waiting for a restart
    Finished,
}

/// Score counters and win detection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub left_score: u32,
    pub right_score: u32,
    pub phase: MatchPhase,
    pub winner: Option<Side>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award one point to `scorer`. Returns true if the match is over.
    ///
    /// Points arriving after the match has finished are ignored, so the
    /// recorded winner and final score never change until [`reset`](Self::reset).
    pub fn update_score(&mut self, scorer: Side) -> bool {
        if self.is_game_over() {
            log::debug!("Ignoring point for {:?}: match already finished", scorer);
            return true;
        }

        let score = match scorer {
            Side::Left => &mut self.left_score,
            Side::Right => &mut self.right_score,
        };
        *score += 1;

        if self.score(scorer) >= WINNING_SCORE {
            self.phase = MatchPhase::Finished;
            self.winner = Some(scorer);
        }

        self.is_game_over()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::Finished
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    /// Back to 0-0, in progress, no winner
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
