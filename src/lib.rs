//! Head Soccer - A two-player local arcade football game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state)
//! - `settings`: Data-driven physics constants and match rules
//! - `roster`: Character roster (presentation-only data)
//! - `script`: Scripted input for headless matches
//! - `error`: Configuration loading errors

pub mod error;
pub mod roster;
pub mod script;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use roster::{Character, Roster};
pub use settings::{MatchRules, Phrases, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const GROUND_Y: f32 = 580.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1500.0;
    /// Per-tick horizontal velocity multiplier
    pub const FRICTION: f32 = 0.85;
    /// Ball rolls better than players: friction + this offset
    pub const BALL_FRICTION_OFFSET: f32 = 0.14;
    /// Avatar bounce off the side walls
    pub const WALL_RESTITUTION: f32 = 0.5;
    /// Ball bounce off ground, ceiling and walls
    pub const BALL_BOUNCE: f32 = 0.7;

    /// Outward push added to the ball on every avatar contact
    pub const KICK_FORCE: f32 = 10.0;
    /// Share of the avatar's velocity handed to the ball on contact
    pub const VELOCITY_TRANSFER: f32 = 0.5;
    /// Ball velocity cap, per axis
    pub const MAX_BALL_SPEED: f32 = 1000.0;

    /// Avatar defaults
    pub const AVATAR_WIDTH: f32 = 60.0;
    pub const AVATAR_HEIGHT: f32 = 100.0;
    /// Horizontal velocity change per tick while a direction is held
    pub const AVATAR_ACCEL: f32 = 50.0;
    pub const JUMP_IMPULSE: f32 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 25.0;

    /// Starting layout (avatar positions are top-left corners)
    pub const P1_START: (f32, f32) = (200.0, 500.0);
    pub const P2_START: (f32, f32) = (1000.0, 500.0);
    /// Ball spawn at kick-off
    pub const BALL_KICKOFF: (f32, f32) = (640.0, 300.0);
    /// Ball spawn after a goal (higher than kick-off)
    pub const BALL_RESET: (f32, f32) = (640.0, 200.0);

    /// Goal regions: ball center past the line and below the crossbar
    pub const LEFT_GOAL_LINE_X: f32 = 50.0;
    pub const RIGHT_GOAL_LINE_X: f32 = 1230.0;
    pub const CROSSBAR_Y: f32 = 380.0;

    /// Match rules
    pub const MATCH_DURATION_SECS: f32 = 60.0;
    pub const GOAL_PAUSE_MS: f64 = 2000.0;
    /// Largest physics step taken for a single frame (no sub-stepping)
    pub const MAX_FRAME_DT: f32 = 0.05;
}

/// Build a `Vec2` from a constant `(x, y)` pair
#[inline]
pub fn vec2(pair: (f32, f32)) -> Vec2 {
    Vec2::new(pair.0, pair.1)
}

/// Clamp each component of `v` to `[-max, max]`, keeping its sign
#[inline]
pub fn clamp_components(v: Vec2, max: f32) -> Vec2 {
    Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
}
