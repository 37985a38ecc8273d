//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert a `0xRRGGBB` color to RGBA floats
pub const fn rgb_hex(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb_hex;

    pub const WALL: [f32; 4] = rgb_hex(0x2C3E50); // Dark gray
    pub const WHEEL: [f32; 4] = rgb_hex(0xE74C3C); // Red
    pub const OBSTACLE: [f32; 4] = rgb_hex(0x3498DB); // Blue
    pub const BACKGROUND: [f32; 4] = rgb_hex(0xECF0F1); // Light gray
    pub const TEXT: [f32; 4] = rgb_hex(0x000000);
}

/// CSS color string for DOM/HUD use
pub fn css_color(color: [f32; 4]) -> String {
    let [r, g, b, a] = color.map(|c| c.clamp(0.0, 1.0));
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb_hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_css_color_round_trips_hex() {
        assert_eq!(css_color(colors::WHEEL), "rgba(231, 76, 60, 1)");
    }
}
