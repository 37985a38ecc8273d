//! Collision detection
//!
//! Everything is axis-aligned: the wheel is approximated by a `2r x 2r`
//! square whose top-left corner sits at the wheel position, and the obstacle
//! is a plain rectangle.

use glam::Vec2;

use crate::consts::PLAY_HEIGHT;
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Wheel box anchored at the wheel position
pub fn wheel_bounds(pos: Vec2, radius: f32) -> Aabb {
    Aabb {
        min: pos,
        size: Vec2::splat(radius * 2.0),
    }
}

/// Obstacle box from its top-left corner
pub fn obstacle_bounds(origin: Vec2, tuning: &Tuning) -> Aabb {
    Aabb {
        min: origin,
        size: Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
    }
}

/// Check if the wheel left the play area vertically
pub fn wheel_out_of_bounds(y: f32) -> bool {
    y < 0.0 || y > PLAY_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_hits_obstacle() {
        let wheel = wheel_bounds(Vec2::new(20.0, 300.0), 20.0);
        let obstacle = Aabb::new(20.0, 295.0, 30.0, 30.0);
        assert!(wheel.overlaps(&obstacle));
        assert!(obstacle.overlaps(&wheel));
    }

    #[test]
    fn test_wheel_misses_obstacle_on_other_wall() {
        let wheel = wheel_bounds(Vec2::new(20.0, 300.0), 20.0);
        let obstacle = Aabb::new(350.0, 295.0, 30.0, 30.0);
        assert!(!wheel.overlaps(&obstacle));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let wheel = wheel_bounds(Vec2::new(20.0, 300.0), 20.0);
        // Obstacle sits directly above the wheel box
        let above = Aabb::new(20.0, 270.0, 30.0, 30.0);
        assert!(!wheel.overlaps(&above));
        // Obstacle starts exactly at the wheel box's bottom edge
        let below = Aabb::new(20.0, 340.0, 30.0, 30.0);
        assert!(!wheel.overlaps(&below));
    }

    #[test]
    fn test_obstacle_bounds_uses_tuning_size() {
        let tuning = Tuning::default();
        let bounds = obstacle_bounds(Vec2::new(20.0, 295.0), &tuning);
        assert_eq!(bounds, Aabb::new(20.0, 295.0, 30.0, 30.0));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(wheel_out_of_bounds(-5.0));
        assert!(wheel_out_of_bounds(605.0));
        assert!(!wheel_out_of_bounds(0.0));
        assert!(!wheel_out_of_bounds(600.0));
        assert!(!wheel_out_of_bounds(300.0));
    }
}
