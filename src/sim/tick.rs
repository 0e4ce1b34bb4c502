//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one frame. The ball moves a whole
//! velocity step per tick, so callers must run this at [`TICK_RATE`].
//!
//! [`TICK_RATE`]: crate::consts::TICK_RATE

use super::state::{Direction, GameEvent, GameState, Side};

/// Held-key directives for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Start a new match (only honored once the current one is over)
    pub restart: bool,
}

impl TickInput {
    /// Drop every held key, as when the page loses focus and the
    /// matching key-up events never arrive
    pub fn release_held(&mut self) {
        *self = Self::default();
    }

    fn directions(up: bool, down: bool) -> impl Iterator<Item = Direction> {
        up.then_some(Direction::Up)
            .into_iter()
            .chain(down.then_some(Direction::Down))
    }
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.is_game_over() {
        if input.restart {
            state.reset_match();
            log::info!("Match restarted");
            events.push(GameEvent::MatchRestarted);
        }
        return events;
    }

    state.time_ticks += 1;

    // Both keys held: up is applied first, then down
    for dir in TickInput::directions(input.left_up, input.left_down) {
        state.left.advance(dir);
    }
    for dir in TickInput::directions(input.right_up, input.right_down) {
        state.right.advance(dir);
    }

    state.ball.advance();

    // Right paddle is only checked when the left one missed
    let hit = if state.ball.handle_paddle_collision(&state.left) {
        Some(Side::Left)
    } else if state.ball.handle_paddle_collision(&state.right) {
        Some(Side::Right)
    } else {
        None
    };
    if let Some(side) = hit {
        state.ball.increase_speed();
        log::debug!("{:?} paddle hit, speed now {:.1}", side, state.ball.speed);
        events.push(GameEvent::PaddleHit {
            side,
            speed: state.ball.speed,
        });
    }

    if let Some(scorer) = state.ball.check_scoring() {
        let finished = state.score.update_score(scorer);
        let (left, right) = (state.score.left_score, state.score.right_score);
        log::info!("{} scores ({} - {})", scorer.label(), left, right);
        events.push(GameEvent::PointScored {
            scorer,
            left,
            right,
        });

        if finished {
            log::info!("{} wins the match", scorer.label());
            events.push(GameEvent::MatchWon { winner: scorer });
        }

        state.reset_ball();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::field_center;
    use glam::Vec2;

    #[test]
    fn test_idle_tick_moves_ball_only() {
        let mut state = GameState::new(12345);
        let start = state.ball.pos;
        let vel = state.ball.vel;
        let left_y = state.left.y();

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.ball.pos, start + vel);
        assert_eq!(state.left.y(), left_y);
    }

    #[test]
    fn test_paddle_input() {
        let mut state = GameState::new(1);
        let input = TickInput {
            left_up: true,
            right_down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.left.y(), 250.0 - PADDLE_SPEED);
        assert_eq!(state.right.y(), 250.0 + PADDLE_SPEED);

        // Opposing keys cancel out
        let both = TickInput {
            left_up: true,
            left_down: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.left.y(), 250.0 - PADDLE_SPEED);
    }

    #[test]
    fn test_released_input_stops_paddles() {
        let mut state = GameState::new(5);
        let mut input = TickInput {
            left_up: true,
            right_down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let left_y = state.left.y();
        let right_y = state.right.y();
        assert!(left_y < 250.0);
        assert!(right_y > 250.0);

        input.release_held();
        assert_eq!(input, TickInput::default());

        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.left.y(), left_y);
        assert_eq!(state.right.y(), right_y);
    }

    #[test]
    fn test_paddle_hit_speeds_ball_up() {
        let mut state = GameState::new(3);
        let center_y = state.left.rect().center().y;
        state.ball.pos = Vec2::new(state.left.x + PADDLE_WIDTH + 2.0, center_y - 10.0);
        state.ball.vel = Vec2::new(-3.0, 3.0);

        let events = tick(&mut state, &TickInput::default());
        let expected = BALL_START_SPEED + BALL_SPEED_INCREMENT;
        assert_eq!(
            events,
            vec![GameEvent::PaddleHit {
                side: Side::Left,
                speed: expected
            }]
        );
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.ball.vel.x.abs(), expected);
        assert_eq!(state.ball.vel.y.abs(), expected);
    }

    #[test]
    fn test_scoring_resets_ball() {
        let mut state = GameState::new(8);
        state.ball.pos = Vec2::new(BALL_RADIUS + 1.0, 100.0);
        state.ball.vel = Vec2::new(-3.0, 3.0);
        state.ball.speed = 6.0;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::PointScored {
                scorer: Side::Right,
                left: 0,
                right: 1
            }]
        );
        assert_eq!(state.ball.pos, field_center());
        assert_eq!(state.ball.speed, BALL_START_SPEED);
    }

    #[test]
    fn test_match_won_freezes_until_restart() {
        let mut state = GameState::new(21);
        for _ in 0..WINNING_SCORE - 1 {
            state.score.update_score(Side::Left);
        }
        state.ball.pos = Vec2::new(FIELD_WIDTH - BALL_RADIUS - 1.0, 100.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::MatchWon { winner: Side::Left }));
        assert!(state.is_game_over());

        // Nothing moves while the match is over
        let ball = state.ball.clone();
        let ticks = state.time_ticks;
        let input = TickInput {
            left_up: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(state.ball, ball);
        assert_eq!(state.time_ticks, ticks);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &restart), vec![GameEvent::MatchRestarted]);
        assert!(!state.is_game_over());
        assert_eq!(state.snapshot().left_score, 0);
        assert_eq!(state.snapshot().winner, None);
    }

    #[test]
    fn test_restart_ignored_mid_match() {
        let mut state = GameState::new(4);
        state.score.update_score(Side::Right);
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert!(!events.contains(&GameEvent::MatchRestarted));
        assert_eq!(state.score.right_score, 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed stay in lockstep
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                left_up: true,
                ..Default::default()
            },
            TickInput {
                right_down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..3000 {
            let input = &inputs[i % inputs.len()];
            assert_eq!(tick(&mut state1, input), tick(&mut state2, input));
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    #[test]
    fn test_unattended_match_finishes() {
        let mut state = GameState::new(777);
        let mut won = None;
        for _ in 0..100_000 {
            for event in tick(&mut state, &TickInput::default()) {
                if let GameEvent::MatchWon { winner } = event {
                    won = Some(winner);
                }
            }
            if state.is_game_over() {
                break;
            }
        }
        assert!(state.is_game_over());
        assert_eq!(won, state.score.winner);
        assert_eq!(state.score.score(won.unwrap()), WINNING_SCORE);
    }
}
