//! Wall Wheel - A wall-hopping wheel arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, input, game state)
//! - `game`: Session driver (fixed timestep, pause, frame outcomes)
//! - `renderer`: Scene building and WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (clock, navigation)
//! - `persistence`: Key-value storage for the last score
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{FrameOutcome, Game};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one classic display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play area in logical units (y grows downward)
    pub const PLAY_WIDTH: f32 = 400.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Wheel defaults
    pub const WHEEL_RADIUS: f32 = 20.0;
    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied by a tap (negative = up)
    pub const JUMP_VELOCITY: f32 = -10.0;

    /// Wall defaults
    pub const WALL_THICKNESS: f32 = 20.0;
    pub const WALL_SPEED: f32 = 1.5;
    /// How far each wall moves inward before reversing
    pub const WALL_TRAVEL: f32 = WALL_THICKNESS;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;
    /// Downward obstacle speed (units/tick)
    pub const OBSTACLE_SPEED: f32 = 4.0;

    /// Two pointer-downs closer than this are a double-tap (ms)
    pub const DOUBLE_TAP_MS: f64 = 300.0;
}
