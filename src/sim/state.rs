//! Match state and core simulation types
//!
//! Everything the renderer reads after an update lives here.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::physics::PhysicsEngine;
use super::shape::{Circle, Rect};
use super::tick::PlayerInput;
use crate::consts::*;
use crate::settings::{MatchRules, Phrases};
use crate::vec2;

/// Which player (and which half of the pitch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Starts on the left, attacks the right goal
    One,
    /// Starts on the right, attacks the left goal
    Two,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Player number as shown to humans (1 or 2)
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active play: timer runs, physics and goal checks on
    Playing,
    /// A goal was just scored; everything frozen until the scheduled reset
    GoalPause,
    /// Time ran out (terminal)
    Ended,
}

/// Final outcome once the match has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Winner(Side),
    Draw,
}

impl MatchResult {
    /// Higher score wins, equal scores draw
    pub fn from_scores(scores: [u32; 2]) -> Self {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => MatchResult::Winner(Side::One),
            std::cmp::Ordering::Less => MatchResult::Winner(Side::Two),
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }
}

/// Avatar facial expression (cosmetic, never read by physics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expression {
    #[default]
    Idle,
    Kick,
    Win,
    Lose,
}

/// A player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Roster character id (opaque to the simulation)
    pub character_id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height of the body rectangle
    pub size: Vec2,
    /// Feet resting on the ground plane
    pub grounded: bool,
    /// Horizontal velocity added per tick while left/right is held
    pub accel: f32,
    pub jump_impulse: f32,
    pub expression: Expression,
    /// Speech bubble shown with Win/Lose
    #[serde(default)]
    pub phrase: Option<String>,
}

impl Avatar {
    pub fn new(character_id: u32, pos: Vec2, rules: &MatchRules) -> Self {
        Self {
            character_id,
            pos,
            vel: Vec2::ZERO,
            size: vec2(rules.avatar_size),
            grounded: false,
            accel: rules.avatar_accel,
            jump_impulse: rules.jump_impulse,
            expression: Expression::Idle,
            phrase: None,
        }
    }

    /// Body rectangle for collision checks
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Apply one tick of input, then integrate
    pub fn update(&mut self, input: &PlayerInput, dt: f32, physics: &PhysicsEngine) {
        // Both directions may be held at once; they cancel out
        if input.left {
            self.vel.x -= self.accel;
        }
        if input.right {
            self.vel.x += self.accel;
        }

        if input.jump && self.grounded {
            self.vel.y = -self.jump_impulse;
            self.grounded = false;
        }

        if input.kick {
            self.expression = Expression::Kick;
        } else if self.expression == Expression::Kick {
            self.expression = Expression::Idle;
        }

        physics.integrate_avatar(self, dt);
    }

    /// Change expression, picking a phrase for Win/Lose
    pub fn set_expression<R: Rng + ?Sized>(
        &mut self,
        expression: Expression,
        phrases: &Phrases,
        rng: &mut R,
    ) {
        self.expression = expression;
        self.phrase = match expression {
            Expression::Win => phrases.win.choose(rng).cloned(),
            Expression::Lose => phrases.lose.choose(rng).cloned(),
            _ => None,
        };
    }

    /// Move back to a spawn point, motionless and neutral
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.expression = Expression::Idle;
        self.phrase = None;
    }
}

/// The match ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// Goals per side, indexed by `Side::index`
    pub scores: [u32; 2],
    /// Seconds remaining, never below zero
    pub timer: f32,
    /// Indexed by `Side::index`
    pub avatars: [Avatar; 2],
    pub ball: Ball,
    /// Timestamp (ms) of the latest frame
    pub clock_ms: f64,
    /// When the goal pause ends (set only during GoalPause)
    pub pause_until_ms: Option<f64>,
}

impl MatchState {
    /// Kick-off layout for a fresh match
    pub fn new(rules: &MatchRules, p1_character: u32, p2_character: u32) -> Self {
        Self {
            phase: MatchPhase::Playing,
            scores: [0, 0],
            timer: rules.match_duration_secs,
            avatars: [
                Avatar::new(p1_character, vec2(P1_START), rules),
                Avatar::new(p2_character, vec2(P2_START), rules),
            ],
            ball: Ball::new(vec2(BALL_KICKOFF), rules.ball_radius),
            clock_ms: 0.0,
            pause_until_ms: None,
        }
    }

    #[inline]
    pub fn avatar(&self, side: Side) -> &Avatar {
        &self.avatars[side.index()]
    }

    #[inline]
    pub fn avatar_mut(&mut self, side: Side) -> &mut Avatar {
        &mut self.avatars[side.index()]
    }

    #[inline]
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Outcome, available only once the match has ended
    pub fn result(&self) -> Option<MatchResult> {
        (self.phase == MatchPhase::Ended).then(|| MatchResult::from_scores(self.scores))
    }
}
