//! Session driver
//!
//! Owns one session and turns display-refresh callbacks into fixed
//! simulation ticks. The host calls [`Game::frame`] every refresh, whether or
//! not the game is paused; pausing only changes what a frame does.

use crate::consts::*;
use crate::renderer::DrawCommand;
use crate::renderer::scene;
use crate::sim::{GameOverCause, GameState, TapIntent, TickOutcome, pointer_down, step};
use crate::tuning::{Tuning, TuningError};

/// What the host should do after a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Paused or finished: draw nothing, keep scheduling
    Idle,
    /// Draw this scene
    Draw(Vec<DrawCommand>),
    /// The run just ended; persist the score and leave. Reported once.
    GameOver { score: u32, cause: GameOverCause },
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    tuning: Tuning,
    accumulator: f32,
    /// Timestamp of the previous frame (ms); `None` after start or resume
    last_time: Option<f64>,
}

impl Game {
    /// Start a session; rejects tuning the simulation cannot run with
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("New session with seed {}", seed);
        Ok(Self {
            state: GameState::new(seed, &tuning),
            tuning,
            accumulator: 0.0,
            last_time: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Pause; a no-op unless playing
    pub fn pause(&mut self) {
        if self.state.pause() {
            self.accumulator = 0.0;
            log::info!("Paused at tick {}", self.state.time_ticks);
        }
    }

    /// Resume; a no-op unless paused
    pub fn resume(&mut self) {
        if self.state.resume() {
            // Time spent paused must not turn into simulation time
            self.accumulator = 0.0;
            self.last_time = None;
            log::info!("Resumed at tick {}", self.state.time_ticks);
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.state.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Feed a pointer-down event
    pub fn pointer_down(&mut self, time_ms: f64) -> TapIntent {
        pointer_down(&mut self.state, time_ms, &self.tuning)
    }

    /// Run one display refresh at `time_ms`
    pub fn frame(&mut self, time_ms: f64) -> FrameOutcome {
        if self.state.is_paused() || self.state.is_over() {
            self.last_time = Some(time_ms);
            return FrameOutcome::Idle;
        }

        // Calculate delta time
        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            match step(&mut self.state, &self.tuning) {
                TickOutcome::GameOver { score, cause } => {
                    self.accumulator = 0.0;
                    return FrameOutcome::GameOver { score, cause };
                }
                TickOutcome::Running | TickOutcome::Idle => {}
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        FrameOutcome::Draw(scene::build(&self.state, &self.tuning))
    }
}
