//! Collision detection between the ball and avatar bodies
//!
//! Ball vs avatar is a circle vs axis-aligned rectangle test based on the
//! closest point of the rectangle to the circle center.

use glam::Vec2;

use super::shape::{Circle, Rect};

/// Normal used when the ball center sits inside the rectangle (push straight up)
pub const DEGENERATE_NORMAL: Vec2 = Vec2::new(0.0, -1.0);

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the rectangle to the circle center
    pub point: Vec2,
    /// Unit normal pointing from the rectangle toward the circle center
    pub normal: Vec2,
    /// Distance from the circle center to `point`
    pub distance: f32,
    /// Overlap depth along the normal (radius - distance)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            distance: 0.0,
            penetration: 0.0,
        }
    }
}

/// Strict AABB overlap test (touching edges do not overlap)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

/// Check collision between a circle and a rectangle
///
/// Colliding iff the distance from the circle center to the closest point on
/// the rectangle is at most the radius (touching counts).
pub fn circle_rect_collision(circle: &Circle, rect: &Rect) -> CollisionResult {
    let point = rect.closest_point(circle.center);
    let offset = circle.center - point;
    let distance = offset.length();

    if distance > circle.radius {
        return CollisionResult::miss();
    }

    let normal = if distance == 0.0 {
        DEGENERATE_NORMAL
    } else {
        offset / distance
    };

    CollisionResult {
        hit: true,
        point,
        normal,
        distance,
        penetration: circle.radius - distance,
    }
}
