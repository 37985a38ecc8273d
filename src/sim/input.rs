//! Pointer input classification
//!
//! A pointer-down is either a single tap (hop to the other wall and jump) or
//! the second half of a double-tap (jump in place). The only state is the
//! previous tap's timestamp.

use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// What a pointer-down asks the wheel to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapIntent {
    /// Double-tap: upward impulse, stay on the current wall
    JumpInPlace,
    /// Single tap: flip wall side and apply upward impulse
    SwitchAndJump,
}

/// Classify a tap at `now_ms` against the previous one, then remember it
pub fn classify_tap(last_tap_ms: &mut Option<f64>, now_ms: f64, double_tap_ms: f64) -> TapIntent {
    let intent = match *last_tap_ms {
        Some(last) if now_ms - last < double_tap_ms => TapIntent::JumpInPlace,
        _ => TapIntent::SwitchAndJump,
    };
    *last_tap_ms = Some(now_ms);
    intent
}

/// Handle a pointer-down at `now_ms`.
///
/// The tap is always classified and timestamped. The wheel is only touched
/// while the session is playing.
pub fn pointer_down(state: &mut GameState, now_ms: f64, tuning: &Tuning) -> TapIntent {
    let intent = classify_tap(&mut state.last_tap_ms, now_ms, tuning.double_tap_ms);

    if state.phase == GamePhase::Playing {
        let switch_side = intent == TapIntent::SwitchAndJump;
        state.wheel.jump(tuning.jump_velocity, switch_side);
    } else {
        log::debug!("Ignoring {:?} while {:?}", intent, state.phase);
    }

    intent
}
