//! Rendering module
//!
//! `scene` turns game state into draw commands; the WebGPU pipeline
//! tessellates and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, logical_to_ndc};
pub use scene::DrawCommand;
