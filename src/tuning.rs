//! Gameplay tuning
//!
//! Every physical constant the simulation reads. Defaults are the classic
//! values from [`crate::consts`]; an override can be stored as JSON in
//! LocalStorage under [`Tuning::STORAGE_KEY`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{KeyValueStore, StorageError};

/// Tuning errors
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Tuning value `{0}` must be finite")]
    NotFinite(&'static str),

    #[error("Tuning value `{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Jump velocity must point upward (negative), got {0}")]
    JumpNotUpward(f32),

    #[error("Walls would cross: minimum gap {0} is negative")]
    WallsCross(f32),

    #[error("Invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay constants (units are logical pixels and ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity set by a tap (negative = up)
    pub jump_velocity: f32,
    pub wheel_radius: f32,

    // === Walls ===
    pub wall_thickness: f32,
    /// Units per tick each wall moves
    pub wall_speed: f32,
    /// Inward distance each wall covers before reversing
    pub wall_travel: f32,

    // === Obstacle ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Units per tick the obstacle falls
    pub obstacle_speed: f32,

    // === Input ===
    /// Double-tap window (ms)
    pub double_tap_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            wheel_radius: WHEEL_RADIUS,

            wall_thickness: WALL_THICKNESS,
            wall_speed: WALL_SPEED,
            wall_travel: WALL_TRAVEL,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,

            double_tap_ms: DOUBLE_TAP_MS,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "wall_wheel_tuning";

    /// Left wall x at its outer extreme (game start)
    pub fn outer_left_x(&self) -> f32 {
        0.0
    }

    /// Right wall x at its outer extreme (game start)
    pub fn outer_right_x(&self) -> f32 {
        PLAY_WIDTH - self.wall_thickness
    }

    /// Left wall x at its inner extreme
    pub fn inner_left_x(&self) -> f32 {
        self.outer_left_x() + self.wall_travel
    }

    /// Right wall x at its inner extreme
    pub fn inner_right_x(&self) -> f32 {
        self.outer_right_x() - self.wall_travel
    }

    /// Gap between the walls at game start
    pub fn initial_gap(&self) -> f32 {
        self.outer_right_x() - self.outer_left_x() - self.wall_thickness
    }

    /// Gap between the walls at their closest
    pub fn min_gap(&self) -> f32 {
        self.initial_gap() - 2.0 * self.wall_travel
    }

    /// Check that the simulation can run with these values
    pub fn validate(&self) -> Result<(), TuningError> {
        let values: [(&'static str, f64); 10] = [
            ("gravity", self.gravity as f64),
            ("jump_velocity", self.jump_velocity as f64),
            ("wheel_radius", self.wheel_radius as f64),
            ("wall_thickness", self.wall_thickness as f64),
            ("wall_speed", self.wall_speed as f64),
            ("wall_travel", self.wall_travel as f64),
            ("obstacle_width", self.obstacle_width as f64),
            ("obstacle_height", self.obstacle_height as f64),
            ("obstacle_speed", self.obstacle_speed as f64),
            ("double_tap_ms", self.double_tap_ms),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(TuningError::NotFinite(name));
            }
        }

        let positive: [(&'static str, f64); 6] = [
            ("wheel_radius", self.wheel_radius as f64),
            ("wall_thickness", self.wall_thickness as f64),
            ("wall_speed", self.wall_speed as f64),
            ("obstacle_width", self.obstacle_width as f64),
            ("obstacle_height", self.obstacle_height as f64),
            ("obstacle_speed", self.obstacle_speed as f64),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { name, value });
            }
        }
        if self.gravity < 0.0 {
            return Err(TuningError::NotPositive {
                name: "gravity",
                value: self.gravity as f64,
            });
        }
        if self.wall_travel < 0.0 {
            return Err(TuningError::NotPositive {
                name: "wall_travel",
                value: self.wall_travel as f64,
            });
        }
        if self.double_tap_ms < 0.0 {
            return Err(TuningError::NotPositive {
                name: "double_tap_ms",
                value: self.double_tap_ms,
            });
        }

        if self.jump_velocity >= 0.0 {
            return Err(TuningError::JumpNotUpward(self.jump_velocity));
        }

        let min_gap = self.min_gap();
        if min_gap < 0.0 {
            return Err(TuningError::WallsCross(min_gap));
        }

        Ok(())
    }

    /// Parse and validate a JSON tuning document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from storage");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring stored tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Save tuning to a store
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Tuning saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.outer_right_x(), 380.0);
        assert_eq!(tuning.initial_gap(), 360.0);
        assert_eq!(tuning.min_gap(), 320.0);
        assert_eq!(tuning.inner_left_x(), 20.0);
        assert_eq!(tuning.inner_right_x(), 360.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "wall_speed": 2.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.wall_speed, 2.0);
        assert_eq!(tuning.jump_velocity, JUMP_VELOCITY);
        assert_eq!(tuning.double_tap_ms, DOUBLE_TAP_MS);
    }

    #[test]
    fn test_rejects_crossing_walls() {
        let tuning = Tuning {
            wall_travel: 200.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::WallsCross(_))));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Tuning::from_json(r#"{ "jump_velocity": 5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::JumpNotUpward(_)));
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let tuning = Tuning {
            obstacle_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                name: "obstacle_height",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotFinite("gravity"))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: "),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_load_save_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Tuning::load(&store), Tuning::default());

        let custom = Tuning {
            wall_speed: 2.5,
            ..Default::default()
        };
        custom.save(&mut store).unwrap();
        assert_eq!(Tuning::load(&store), custom);
    }

    #[test]
    fn test_save_writes_parseable_json() {
        let mut store = MemoryStore::new();
        Tuning::default().save(&mut store).unwrap();

        let json = store.get(Tuning::STORAGE_KEY).unwrap();
        assert!(json.contains("\"gravity\""));
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_load_ignores_invalid_stored_tuning() {
        let mut store = MemoryStore::new();
        store
            .set(Tuning::STORAGE_KEY, r#"{ "wall_thickness": -1.0 }"#)
            .unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }
}
