//! Game settings: physics constants, match rules, expression phrases
//!
//! Loaded from JSON. Every field has a default, so a settings file only has
//! to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{self, ConfigError};
use crate::sim::PhysicsConfig;

/// Rules of a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Countdown length (seconds)
    pub match_duration_secs: f32,
    /// Freeze after a goal before positions reset (milliseconds, real time)
    pub goal_pause_ms: f64,
    /// Cap on a single frame's physics step (seconds)
    pub max_frame_dt: f32,
    /// Horizontal velocity added per tick while moving
    pub avatar_accel: f32,
    pub jump_impulse: f32,
    /// Avatar body (width, height)
    pub avatar_size: (f32, f32),
    pub ball_radius: f32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            match_duration_secs: MATCH_DURATION_SECS,
            goal_pause_ms: GOAL_PAUSE_MS,
            max_frame_dt: MAX_FRAME_DT,
            avatar_accel: AVATAR_ACCEL,
            jump_impulse: JUMP_IMPULSE,
            avatar_size: (AVATAR_WIDTH, AVATAR_HEIGHT),
            ball_radius: BALL_RADIUS,
        }
    }
}

/// Speech bubbles shown after a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phrases {
    pub win: Vec<String>,
    pub lose: Vec<String>,
}

impl Default for Phrases {
    fn default() -> Self {
        Self {
            win: vec!["What a strike!".into(), "Too easy!".into()],
            lose: vec!["Not again...".into(), "I was robbed!".into()],
        }
    }
}

/// All tunable game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub rules: MatchRules,
    pub phrases: Phrases,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = error::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with or that make a side unable to score
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = self.rules.avatar_size;
        if w <= 0.0 || h <= 0.0 {
            return Err(ConfigError::invalid(format!("avatar_size must be positive, got ({w}, {h})")));
        }
        if self.rules.ball_radius <= 0.0 {
            return Err(ConfigError::invalid("ball_radius must be positive"));
        }
        if self.rules.max_frame_dt <= 0.0 {
            return Err(ConfigError::invalid("max_frame_dt must be positive"));
        }
        if self.rules.goal_pause_ms < 0.0 {
            return Err(ConfigError::invalid("goal_pause_ms must not be negative"));
        }
        let physics = &self.physics;
        if physics.field_width <= 0.0 || physics.ground_y <= 0.0 {
            return Err(ConfigError::invalid("field_width and ground_y must be positive"));
        }
        if physics.field_width < w || physics.ground_y < h {
            return Err(ConfigError::invalid("avatar does not fit on the field"));
        }
        let r = self.rules.ball_radius;
        if physics.field_width < 2.0 * r || physics.ground_y < 2.0 * r {
            return Err(ConfigError::invalid("ball does not fit on the field"));
        }
        // NaN fails too: the cap feeds f32::clamp
        if physics.max_ball_speed.is_nan() || physics.max_ball_speed <= 0.0 {
            return Err(ConfigError::invalid("max_ball_speed must be positive"));
        }
        if physics.friction < 0.0 || physics.ball_bounce < 0.0 || physics.wall_restitution < 0.0 {
            return Err(ConfigError::invalid(
                "friction, ball_bounce and wall_restitution must not be negative",
            ));
        }
        self.validate_layout()
    }

    /// Spawn points and goal mouths are fixed; the field must contain them
    fn validate_layout(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        let (w, _) = self.rules.avatar_size;
        let r = self.rules.ball_radius;

        for (name, (x, _)) in [("P1_START", P1_START), ("P2_START", P2_START)] {
            if x < 0.0 || x + w > physics.field_width {
                return Err(ConfigError::invalid(format!(
                    "{name} x={x} puts the avatar off a {} wide field",
                    physics.field_width
                )));
            }
        }
        for (name, (x, y)) in [("BALL_KICKOFF", BALL_KICKOFF), ("BALL_RESET", BALL_RESET)] {
            if x < r || x > physics.field_width - r || y < r || y > physics.ground_y - r {
                return Err(ConfigError::invalid(format!(
                    "{name} ({x}, {y}) is outside the field"
                )));
            }
        }

        // The ball center must be able to get past each goal line and under the crossbar
        if LEFT_GOAL_LINE_X <= r || RIGHT_GOAL_LINE_X >= physics.field_width - r {
            return Err(ConfigError::invalid(format!(
                "goal lines at {LEFT_GOAL_LINE_X} and {RIGHT_GOAL_LINE_X} are unreachable on a {} wide field",
                physics.field_width
            )));
        }
        if CROSSBAR_Y >= physics.ground_y - r {
            return Err(ConfigError::invalid(format!(
                "crossbar at {CROSSBAR_Y} leaves no goal mouth above ground {}",
                physics.ground_y
            )));
        }
        Ok(())
    }
}
