//! Gravity/friction integration and ball-avatar collision response
//!
//! One explicit Euler step per frame. No sub-stepping: callers bound `dt`
//! (see `MatchRules::max_frame_dt`) so a single step cannot tunnel through
//! the field bounds.

use serde::{Deserialize, Serialize};

use super::collision::{circle_rect_collision, rects_overlap};
use super::shape::Rect;
use super::state::{Avatar, Ball};
use crate::clamp_components;
use crate::consts::*;

/// World constants, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Horizontal velocity multiplier applied once per tick
    pub friction: f32,
    /// Ground plane (larger y is further down)
    pub ground_y: f32,
    /// Right wall; the left wall is x = 0
    pub field_width: f32,
    /// Avatar side-wall bounce
    pub wall_restitution: f32,
    /// Ball bounce on every boundary
    pub ball_bounce: f32,
    /// Added to `friction` for the ball
    pub ball_friction_offset: f32,
    /// Outward push along the contact normal on every ball-avatar hit
    pub kick_force: f32,
    /// Share of the avatar's velocity passed on to the ball
    pub velocity_transfer: f32,
    /// Per-axis cap on ball velocity after a hit
    pub max_ball_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            ground_y: GROUND_Y,
            field_width: FIELD_WIDTH,
            wall_restitution: WALL_RESTITUTION,
            ball_bounce: BALL_BOUNCE,
            ball_friction_offset: BALL_FRICTION_OFFSET,
            kick_force: KICK_FORCE,
            velocity_transfer: VELOCITY_TRANSFER,
            max_ball_speed: MAX_BALL_SPEED,
        }
    }
}

/// Integrates bodies and resolves ball contacts
#[derive(Debug, Clone, Default)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
}

impl PhysicsEngine {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advance an avatar by `dt`: gravity, ground and wall clamps, friction
    pub fn integrate_avatar(&self, avatar: &mut Avatar, dt: f32) {
        let cfg = &self.config;

        avatar.vel.y += cfg.gravity * dt;
        avatar.pos += avatar.vel * dt;

        // `>=` so an avatar resting exactly on the ground stays grounded at dt = 0
        if avatar.pos.y + avatar.size.y >= cfg.ground_y {
            avatar.pos.y = cfg.ground_y - avatar.size.y;
            avatar.vel.y = 0.0;
            avatar.grounded = true;
        } else {
            avatar.grounded = false;
        }

        if avatar.pos.x < 0.0 {
            avatar.pos.x = 0.0;
            avatar.vel.x *= -cfg.wall_restitution;
        }
        if avatar.pos.x + avatar.size.x > cfg.field_width {
            avatar.pos.x = cfg.field_width - avatar.size.x;
            avatar.vel.x *= -cfg.wall_restitution;
        }

        avatar.vel.x *= cfg.friction;
    }

    /// Advance the ball by `dt`: gravity, bounces on all four bounds, rolling friction
    pub fn integrate_ball(&self, ball: &mut Ball, dt: f32) {
        let cfg = &self.config;
        let r = ball.radius;

        ball.vel.y += cfg.gravity * dt;
        ball.pos += ball.vel * dt;

        // Ground
        if ball.pos.y + r > cfg.ground_y {
            ball.pos.y = cfg.ground_y - r;
            ball.vel.y *= -cfg.ball_bounce;
        }
        // Ceiling
        if ball.pos.y - r < 0.0 {
            ball.pos.y = r;
            ball.vel.y *= -cfg.ball_bounce;
        }

        // Side walls (goal mouths are open only to the goal check, not to physics)
        if ball.pos.x - r < 0.0 {
            ball.pos.x = r;
            ball.vel.x *= -cfg.ball_bounce;
        }
        if ball.pos.x + r > cfg.field_width {
            ball.pos.x = cfg.field_width - r;
            ball.vel.x *= -cfg.ball_bounce;
        }

        ball.vel.x *= cfg.friction + cfg.ball_friction_offset;
    }

    /// Resolve a ball-avatar contact. Returns true if they touched.
    ///
    /// Not a physically exact elastic collision: the ball's incoming velocity
    /// is fully reversed, half the avatar's velocity is added, plus a constant
    /// push along the contact normal. Each axis is then capped.
    pub fn resolve_collision(&self, ball: &mut Ball, avatar: &Avatar) -> bool {
        let cfg = &self.config;
        let contact = circle_rect_collision(&ball.circle(), &avatar.rect());
        if !contact.hit {
            return false;
        }

        ball.pos += contact.normal * contact.penetration;

        let vel = -ball.vel + avatar.vel * cfg.velocity_transfer + contact.normal * cfg.kick_force;
        ball.vel = clamp_components(vel, cfg.max_ball_speed);

        true
    }

    /// Strict AABB overlap between two bodies
    pub fn check_collision(a: &Rect, b: &Rect) -> bool {
        rects_overlap(a, b)
    }
}
