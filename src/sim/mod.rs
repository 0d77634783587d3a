//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the timestamps handed to `MatchController::update`
//! - Seeded RNG only (and only for cosmetic phrase picks)
//! - Fixed resolution order (player 1 before player 2)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_rect_collision, rects_overlap};
pub use physics::{PhysicsConfig, PhysicsEngine};
pub use shape::{Circle, Rect};
pub use state::{Avatar, Ball, Expression, MatchPhase, MatchResult, MatchState, Side};
pub use tick::{
    AvatarView, MatchController, MatchSnapshot, PlayerInput, TickInput, goal_scorer,
};
