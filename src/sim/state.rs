//! Game state and core simulation types
//!
//! Everything a session owns lives here. Nothing is global, so any number of
//! sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused (input is inert, no physics)
    Paused,
    /// Run ended
    GameOver,
}

/// Which wall something rests against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    pub fn flipped(self) -> Self {
        match self {
            WallSide::Left => WallSide::Right,
            WallSide::Right => WallSide::Left,
        }
    }

    /// Uniform 50/50 pick
    pub fn random(rng: &mut Pcg32) -> Self {
        if rng.random_bool(0.5) {
            WallSide::Left
        } else {
            WallSide::Right
        }
    }
}

/// The player's wheel.
///
/// Horizontal position is not stored: it is pinned to the current wall and
/// derived through [`GameState::wheel_x`].
#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    pub y: f32,
    /// Vertical velocity (units/tick, positive = down)
    pub vy: f32,
    pub side: WallSide,
}

impl Default for Wheel {
    fn default() -> Self {
        Self {
            y: PLAY_HEIGHT / 2.0,
            vy: 0.0,
            side: WallSide::Left,
        }
    }
}

impl Wheel {
    /// Apply gravity then move
    pub fn integrate(&mut self, gravity: f32) {
        self.vy += gravity;
        self.y += self.vy;
    }

    /// Upward impulse, optionally hopping to the other wall
    pub fn jump(&mut self, jump_velocity: f32, switch_side: bool) {
        if switch_side {
            self.side = self.side.flipped();
        }
        self.vy = jump_velocity;
    }
}

/// The two oscillating walls
#[derive(Debug, Clone, PartialEq)]
pub struct WallPair {
    pub left_x: f32,
    pub right_x: f32,
    /// Signed speed; positive moves the walls toward each other
    pub speed: f32,
}

impl WallPair {
    /// Walls at their outer extreme, about to converge
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            left_x: tuning.outer_left_x(),
            right_x: tuning.outer_right_x(),
            speed: tuning.wall_speed,
        }
    }

    /// Free space between the inner faces
    pub fn gap(&self, wall_thickness: f32) -> f32 {
        self.right_x - self.left_x - wall_thickness
    }

    /// Move both walls one tick.
    ///
    /// Reaching either extreme clamps both walls onto it and reverses the
    /// direction, so the gap never leaves `[min_gap, initial_gap]`.
    /// Returns true if the direction reversed.
    pub fn advance(&mut self, tuning: &Tuning) -> bool {
        self.left_x += self.speed;
        self.right_x -= self.speed;

        let (inner_left, inner_right) = (tuning.inner_left_x(), tuning.inner_right_x());
        let (outer_left, outer_right) = (tuning.outer_left_x(), tuning.outer_right_x());

        if self.speed > 0.0 && (self.left_x >= inner_left || self.right_x <= inner_right) {
            self.left_x = inner_left;
            self.right_x = inner_right;
            self.speed = -self.speed;
            true
        } else if self.speed < 0.0 && (self.left_x <= outer_left || self.right_x >= outer_right)
        {
            self.left_x = outer_left;
            self.right_x = outer_right;
            self.speed = -self.speed;
            true
        } else {
            false
        }
    }

    /// x of the inner face of the given wall
    pub fn inner_face(&self, side: WallSide, wall_thickness: f32) -> f32 {
        match side {
            WallSide::Left => self.left_x + wall_thickness,
            WallSide::Right => self.right_x,
        }
    }
}

/// The falling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub y: f32,
    pub side: WallSide,
}

impl Obstacle {
    /// First obstacle: random height inside the play area, random side
    pub fn spawn(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let y = rng.random::<f32>() * (PLAY_HEIGHT - tuning.obstacle_height).max(0.0);
        let side = WallSide::random(rng);
        Self { y, side }
    }

    /// Fall one tick. Returns true if it left the bottom and respawned on top.
    pub fn advance(&mut self, rng: &mut Pcg32, tuning: &Tuning) -> bool {
        self.y += tuning.obstacle_speed;
        if self.y > PLAY_HEIGHT {
            self.y = -tuning.obstacle_height;
            self.side = WallSide::random(rng);
            true
        } else {
            false
        }
    }

    /// Top-left corner given the current wall positions
    pub fn origin(&self, walls: &WallPair, tuning: &Tuning) -> Vec2 {
        let x = match self.side {
            WallSide::Left => walls.inner_face(WallSide::Left, tuning.wall_thickness),
            WallSide::Right => {
                walls.inner_face(WallSide::Right, tuning.wall_thickness) - tuning.obstacle_width
            }
        };
        Vec2::new(x, self.y)
    }
}

/// One game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Points (one per obstacle that left the bottom)
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub wheel: Wheel,
    pub walls: WallPair,
    pub obstacle: Obstacle,
    /// Timestamp of the previous pointer-down (ms)
    pub last_tap_ms: Option<f64>,
    /// Obstacle side source
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed. `tuning` must already
    /// have passed [`Tuning::validate`].
    pub(crate) fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacle = Obstacle::spawn(&mut rng, tuning);

        Self {
            seed,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            wheel: Wheel::default(),
            walls: WallPair::new(tuning),
            obstacle,
            last_tap_ms: None,
            rng,
        }
    }

    /// Wheel x, flush against the inner face of its wall
    pub fn wheel_x(&self, tuning: &Tuning) -> f32 {
        match self.wheel.side {
            WallSide::Left => self.walls.inner_face(WallSide::Left, tuning.wall_thickness),
            WallSide::Right => self.walls.right_x - tuning.wheel_radius,
        }
    }

    /// Wheel position (x derived, y simulated)
    pub fn wheel_pos(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(self.wheel_x(tuning), self.wheel.y)
    }

    /// Obstacle top-left corner
    pub fn obstacle_origin(&self, tuning: &Tuning) -> Vec2 {
        self.obstacle.origin(&self.walls, tuning)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Pause a running session. Returns true if the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            true
        } else {
            false
        }
    }

    /// Resume a paused session. Returns true if the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            true
        } else {
            false
        }
    }
}
