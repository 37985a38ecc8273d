//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{obstacle_bounds, wheel_bounds, wheel_out_of_bounds};
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Wheel box overlapped the obstacle
    Collision,
    /// Wheel fell off the top or bottom
    OutOfBounds,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over: nothing advanced, nothing to draw
    Idle,
    /// State advanced, draw it
    Running,
    /// This tick ended the run
    GameOver { score: u32, cause: GameOverCause },
}

/// Advance the game state by one fixed timestep
pub fn step(state: &mut GameState, tuning: &Tuning) -> TickOutcome {
    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return TickOutcome::Idle,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Wheel falls; horizontal position follows the wall below
    state.wheel.integrate(tuning.gravity);

    if state.obstacle.advance(&mut state.rng, tuning) {
        state.score += 1;
        log::debug!("Obstacle cleared, score {}", state.score);
    }

    if state.walls.advance(tuning) {
        log::trace!("Walls reversed at tick {}", state.time_ticks);
    }

    let wheel = wheel_bounds(state.wheel_pos(tuning), tuning.wheel_radius);
    let obstacle = obstacle_bounds(state.obstacle_origin(tuning), tuning);

    let cause = if wheel.overlaps(&obstacle) {
        Some(GameOverCause::Collision)
    } else if wheel_out_of_bounds(state.wheel.y) {
        Some(GameOverCause::OutOfBounds)
    } else {
        None
    };

    match cause {
        Some(cause) => {
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over ({:?}) after {} ticks, score {}",
                cause,
                state.time_ticks,
                state.score
            );
            TickOutcome::GameOver {
                score: state.score,
                cause,
            }
        }
        None => TickOutcome::Running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAY_HEIGHT;
    use crate::sim::input::pointer_down;
    use crate::sim::state::WallSide;
    use proptest::prelude::*;

    /// Session with the obstacle parked far from the wheel
    fn quiet_state(seed: u64, tuning: &Tuning) -> GameState {
        let mut state = GameState::new(seed, tuning);
        state.obstacle.y = -tuning.obstacle_height;
        state.obstacle.side = WallSide::Right;
        state
    }

    #[test]
    fn test_tick_integrates_wheel() {
        let tuning = Tuning::default();
        let mut state = quiet_state(1, &tuning);

        assert_eq!(step(&mut state, &tuning), TickOutcome::Running);
        assert_eq!(state.wheel.vy, 0.5);
        assert_eq!(state.wheel.y, 300.5);
        assert_eq!(state.time_ticks, 1);

        step(&mut state, &tuning);
        assert_eq!(state.wheel.vy, 1.0);
        assert_eq!(state.wheel.y, 301.5);
    }

    #[test]
    fn test_tick_moves_obstacle_and_walls() {
        let tuning = Tuning::default();
        let mut state = quiet_state(1, &tuning);
        step(&mut state, &tuning);
        assert_eq!(state.obstacle.y, -tuning.obstacle_height + 4.0);
        assert_eq!(state.walls.left_x, 1.5);
        assert_eq!(state.walls.right_x, 378.5);
        // Wheel follows the left wall
        assert_eq!(state.wheel_x(&tuning), 21.5);
    }

    #[test]
    fn test_score_increments_when_obstacle_exits() {
        let tuning = Tuning::default();
        let mut state = quiet_state(9, &tuning);
        state.obstacle.y = PLAY_HEIGHT - 2.0;

        let mut expected = state.rng.clone();
        let expected_side = WallSide::random(&mut expected);

        assert_eq!(step(&mut state, &tuning), TickOutcome::Running);
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacle.y, -tuning.obstacle_height);
        assert_eq!(state.obstacle.side, expected_side);
    }

    #[test]
    fn test_collision_ends_game() {
        let tuning = Tuning::default();
        let mut state = GameState::new(4, &tuning);
        state.wheel.side = WallSide::Left;
        state.wheel.y = 300.0;
        state.wheel.vy = -tuning.gravity; // cancels this tick's gravity
        state.obstacle.side = WallSide::Left;
        state.obstacle.y = 295.0 - tuning.obstacle_speed;

        let outcome = step(&mut state, &tuning);
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                score: 0,
                cause: GameOverCause::Collision
            }
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_obstacle_on_other_wall_is_harmless() {
        let tuning = Tuning::default();
        let mut state = GameState::new(4, &tuning);
        state.wheel.y = 300.0;
        state.wheel.vy = -tuning.gravity;
        state.obstacle.side = WallSide::Right;
        state.obstacle.y = 295.0 - tuning.obstacle_speed;

        assert_eq!(step(&mut state, &tuning), TickOutcome::Running);
    }

    #[test]
    fn test_falling_off_bottom_ends_game() {
        let tuning = Tuning::default();
        let mut state = quiet_state(2, &tuning);
        state.wheel.y = PLAY_HEIGHT;
        state.wheel.vy = 4.5;

        let outcome = step(&mut state, &tuning);
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                score: 0,
                cause: GameOverCause::OutOfBounds
            }
        );
    }

    #[test]
    fn test_flying_off_top_ends_game() {
        let tuning = Tuning::default();
        let mut state = quiet_state(2, &tuning);
        state.wheel.y = 3.0;
        state.wheel.vy = -8.5;

        assert!(matches!(
            step(&mut state, &tuning),
            TickOutcome::GameOver {
                cause: GameOverCause::OutOfBounds,
                ..
            }
        ));
    }

    #[test]
    fn test_untouched_wheel_falls_out() {
        let tuning = Tuning::default();
        let mut state = quiet_state(11, &tuning);

        let mut ticks = 0;
        let outcome = loop {
            ticks += 1;
            match step(&mut state, &tuning) {
                TickOutcome::Running => continue,
                other => break other,
            }
        };
        assert!(matches!(
            outcome,
            TickOutcome::GameOver {
                cause: GameOverCause::OutOfBounds,
                ..
            }
        ));
        // 0.5 * n * (n + 1) / 2 > 300 first holds at n = 35
        assert_eq!(ticks, 35);
    }

    #[test]
    fn test_tick_pause() {
        let tuning = Tuning::default();
        let mut state = quiet_state(5, &tuning);
        step(&mut state, &tuning);

        state.pause();
        let snapshot = (state.wheel.clone(), state.walls.clone(), state.obstacle.clone());
        for _ in 0..100 {
            assert_eq!(step(&mut state, &tuning), TickOutcome::Idle);
        }
        assert_eq!(
            (state.wheel.clone(), state.walls.clone(), state.obstacle.clone()),
            snapshot
        );
        assert_eq!(state.time_ticks, 1);

        state.resume();
        assert_eq!(step(&mut state, &tuning), TickOutcome::Running);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_finished_session_stays_idle() {
        let tuning = Tuning::default();
        let mut state = quiet_state(5, &tuning);
        state.wheel.y = -10.0;
        assert!(matches!(step(&mut state, &tuning), TickOutcome::GameOver { .. }));
        assert_eq!(step(&mut state, &tuning), TickOutcome::Idle);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning::default();
        let mut state1 = GameState::new(99999, &tuning);
        let mut state2 = GameState::new(99999, &tuning);

        for i in 0..300u32 {
            if i % 20 == 0 {
                let t = i as f64 * 16.0;
                pointer_down(&mut state1, t, &tuning);
                pointer_down(&mut state2, t, &tuning);
            }
            let a = step(&mut state1, &tuning);
            let b = step(&mut state2, &tuning);
            assert_eq!(a, b);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.wheel, state2.wheel);
        assert_eq!(state1.obstacle, state2.obstacle);
    }

    proptest! {
        #[test]
        fn prop_tick_invariants(
            seed in any::<u64>(),
            taps in prop::collection::vec(0u32..40, 1..40),
        ) {
            let tuning = Tuning::default();
            let mut state = GameState::new(seed, &tuning);
            let mut tap_at = taps.into_iter().scan(0u64, |t, gap| {
                *t += gap as u64;
                Some(*t)
            }).peekable();

            for tick_index in 0..2000u64 {
                while tap_at.peek() == Some(&tick_index) {
                    tap_at.next();
                    pointer_down(&mut state, tick_index as f64 * 16.0, &tuning);
                }

                let score_before = state.score;
                let obstacle_before = state.obstacle.y;
                let outcome = step(&mut state, &tuning);

                // Score only moves when the obstacle wraps, by exactly one
                let wrapped = obstacle_before + tuning.obstacle_speed > PLAY_HEIGHT;
                prop_assert_eq!(state.score, score_before + u32::from(wrapped));

                let gap = state.walls.gap(tuning.wall_thickness);
                prop_assert!(gap >= tuning.min_gap() - 1e-3);
                prop_assert!(gap <= tuning.initial_gap() + 1e-3);

                let expected_x = match state.wheel.side {
                    WallSide::Left => state.walls.left_x + tuning.wall_thickness,
                    WallSide::Right => state.walls.right_x - tuning.wheel_radius,
                };
                prop_assert_eq!(state.wheel_x(&tuning), expected_x);

                if outcome != TickOutcome::Running {
                    let over = matches!(outcome, TickOutcome::GameOver { .. });
                    prop_assert!(over, "unexpected outcome {:?}", outcome);
                    break;
                }
            }
        }
    }
}
