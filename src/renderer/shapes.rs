//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::DrawCommand;
use super::vertex::Vertex;

/// Segments used for the wheel outline
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled rectangle from its top-left corner
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let min = origin;
    let max = origin + size;

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangles for every fillable command, in order.
///
/// `Clear` and `Text` produce no geometry.
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, CIRCLE_SEGMENTS)),
            DrawCommand::Rect {
                origin,
                size,
                color,
            } => vertices.extend(rect(*origin, *size, *color)),
            DrawCommand::Clear { .. } | DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count_and_radius() {
        let center = Vec2::new(50.0, 60.0);
        let vertices = circle(center, 10.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 48);
        for tri in vertices.chunks(3) {
            assert_eq!(tri[0].position, [50.0, 60.0]);
            let edge = Vec2::from(tri[1].position) - center;
            assert!((edge.length() - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rect_covers_corners() {
        let vertices = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 6.0);
    }

    #[test]
    fn test_tessellate_skips_clear_and_text() {
        let commands = vec![
            DrawCommand::Clear { color: [0.0; 4] },
            DrawCommand::Rect {
                origin: Vec2::ZERO,
                size: Vec2::ONE,
                color: [1.0; 4],
            },
            DrawCommand::Text {
                text: "Score: 0".to_string(),
                pos: Vec2::ZERO,
                size: 24.0,
                color: [0.0; 4],
            },
        ];
        assert_eq!(tessellate(&commands).len(), 6);
    }
}
