//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, obstacle_bounds, wheel_bounds, wheel_out_of_bounds};
pub use input::{TapIntent, classify_tap, pointer_down};
pub use state::{GamePhase, GameState, Obstacle, WallPair, WallSide, Wheel};
pub use tick::{GameOverCause, TickOutcome, step};
