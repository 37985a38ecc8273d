//! Scene description for one frame
//!
//! The simulation is turned into an ordered list of draw commands. Backends
//! (the WebGPU pipeline, the DOM HUD) consume the list and never see game
//! state directly.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::PLAY_HEIGHT;
use crate::sim::GameState;
use crate::tuning::Tuning;

/// Where the score text sits (baseline-left, logical units)
pub const SCORE_POS: Vec2 = Vec2::new(10.0, 30.0);
/// Score font size (logical units)
pub const SCORE_FONT_SIZE: f32 = 24.0;

/// A single drawing primitive, in logical canvas units (y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear { color: [f32; 4] },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Filled axis-aligned rectangle from its top-left corner
    Rect {
        origin: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Text anchored at its baseline-left point
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: [f32; 4],
    },
}

/// Build the frame in z-order: background, wheel, walls, obstacle, score
pub fn build(state: &GameState, tuning: &Tuning) -> Vec<DrawCommand> {
    let wall_size = Vec2::new(tuning.wall_thickness, PLAY_HEIGHT);

    vec![
        DrawCommand::Clear {
            color: colors::BACKGROUND,
        },
        DrawCommand::Circle {
            center: state.wheel_pos(tuning),
            radius: tuning.wheel_radius,
            color: colors::WHEEL,
        },
        DrawCommand::Rect {
            origin: Vec2::new(state.walls.left_x, 0.0),
            size: wall_size,
            color: colors::WALL,
        },
        DrawCommand::Rect {
            origin: Vec2::new(state.walls.right_x, 0.0),
            size: wall_size,
            color: colors::WALL,
        },
        DrawCommand::Rect {
            origin: state.obstacle_origin(tuning),
            size: Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
            color: colors::OBSTACLE,
        },
        DrawCommand::Text {
            text: score_text(state.score),
            pos: SCORE_POS,
            size: SCORE_FONT_SIZE,
            color: colors::TEXT,
        },
    ]
}

/// HUD label for a score
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}
