//! Collision shapes
//!
//! Avatars are axis-aligned rectangles anchored at their top-left corner;
//! the ball is a circle anchored at its center. Screen coordinates: +y is down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Closest point on (or in) the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max())
    }
}

/// Circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(60.0, 100.0));
        assert_eq!(rect.max(), Vec2::new(70.0, 120.0));
        assert_eq!(rect.center(), Vec2::new(40.0, 70.0));
    }

    #[test]
    fn test_closest_point_outside_and_inside() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        // Left of the rect, level with its middle
        assert_eq!(rect.closest_point(Vec2::new(-5.0, 5.0)), Vec2::new(0.0, 5.0));
        // Past the bottom-right corner
        assert_eq!(rect.closest_point(Vec2::new(15.0, 20.0)), Vec2::new(10.0, 10.0));
        // Inside: the point itself
        assert_eq!(rect.closest_point(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }
}
