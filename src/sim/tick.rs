//! Per-frame match update
//!
//! The frame callback hands `MatchController::update` a timestamp and the
//! current input snapshot. Physics runs on a clamped `dt` derived from
//! consecutive timestamps; the post-goal pause is a scheduled timestamp on
//! the same clock, checked every frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::PhysicsEngine;
use super::state::{Expression, MatchPhase, MatchResult, MatchState, Side};
use crate::consts::*;
use crate::settings::{MatchRules, Phrases, Settings};
use crate::vec2;

/// Buttons held by one player this tick (polled, not edge-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Cosmetic only: changes the expression, never the physics
    pub kick: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub p1: PlayerInput,
    pub p2: PlayerInput,
}

impl TickInput {
    #[inline]
    pub fn player(&self, side: Side) -> &PlayerInput {
        match side {
            Side::One => &self.p1,
            Side::Two => &self.p2,
        }
    }
}

/// Which side scores if the ball center is at `pos`, if anyone
///
/// Left goal mouth scores for player 2, right goal mouth for player 1.
pub fn goal_scorer(pos: Vec2) -> Option<Side> {
    if pos.y <= CROSSBAR_Y {
        return None;
    }
    if pos.x < LEFT_GOAL_LINE_X {
        Some(Side::Two)
    } else if pos.x > RIGHT_GOAL_LINE_X {
        Some(Side::One)
    } else {
        None
    }
}

/// What the renderer needs from one avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarView {
    pub character_id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub expression: Expression,
    pub phrase: Option<String>,
}

/// Read-only view of a match after an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub scores: [u32; 2],
    pub timer: f32,
    pub avatars: [AvatarView; 2],
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub result: Option<MatchResult>,
}

impl MatchSnapshot {
    /// Whole seconds for the HUD clock (rounded up)
    pub fn seconds_left(&self) -> u32 {
        self.timer.ceil() as u32
    }
}

/// Owns the match state and drives it frame by frame
#[derive(Debug, Clone)]
pub struct MatchController {
    state: MatchState,
    physics: PhysicsEngine,
    rules: MatchRules,
    phrases: Phrases,
    /// Phrase picks only; physics never touches it
    rng: Pcg32,
    last_timestamp_ms: Option<f64>,
}

impl MatchController {
    pub fn new(settings: &Settings, p1_character: u32, p2_character: u32, seed: u64) -> Self {
        log::info!(
            "Match start: P1 character {} vs P2 character {}, {}s on the clock",
            p1_character,
            p2_character,
            settings.rules.match_duration_secs
        );
        Self {
            state: MatchState::new(&settings.rules, p1_character, p2_character),
            physics: PhysicsEngine::new(settings.physics.clone()),
            rules: settings.rules.clone(),
            phrases: settings.phrases.clone(),
            rng: Pcg32::seed_from_u64(seed),
            last_timestamp_ms: None,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Outcome once time has run out
    pub fn result(&self) -> Option<MatchResult> {
        self.state.result()
    }

    /// Frame entry point: advance the match to `timestamp_ms`
    pub fn update(&mut self, timestamp_ms: f64, input: &TickInput) {
        let dt = self.frame_dt(timestamp_ms);
        self.state.clock_ms = timestamp_ms;

        match self.state.phase {
            MatchPhase::Playing => self.tick(input, dt),
            MatchPhase::GoalPause => {
                let due = self
                    .state
                    .pause_until_ms
                    .is_none_or(|until| timestamp_ms >= until);
                if due {
                    self.reset_positions();
                }
            }
            MatchPhase::Ended => {}
        }
    }

    /// Seconds since the previous frame, clamped to `[0, max_frame_dt]`; 0 on the first frame
    fn frame_dt(&mut self, timestamp_ms: f64) -> f32 {
        let last = self.last_timestamp_ms.replace(timestamp_ms).unwrap_or(timestamp_ms);
        let dt = ((timestamp_ms - last) / 1000.0) as f32;
        dt.max(0.0).min(self.rules.max_frame_dt)
    }

    /// Advance one simulation step of `dt` seconds (no-op unless Playing)
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if self.state.phase != MatchPhase::Playing {
            return;
        }

        self.state.timer = (self.state.timer - dt).max(0.0);
        if self.state.timer <= 0.0 {
            self.end_match();
            return;
        }

        let physics = &self.physics;
        let state = &mut self.state;

        for side in [Side::One, Side::Two] {
            state.avatars[side.index()].update(input.player(side), dt, physics);
        }

        physics.integrate_ball(&mut state.ball, dt);

        // Player 1 then player 2; when both touch the ball in one tick the
        // second resolution starts from the first one's push and reflection
        for avatar in &state.avatars {
            physics.resolve_collision(&mut state.ball, avatar);
        }

        if let Some(scorer) = goal_scorer(self.state.ball.pos) {
            self.score_goal(scorer);
        }
    }

    fn score_goal(&mut self, scorer: Side) {
        let state = &mut self.state;
        state.scores[scorer.index()] += 1;

        state.avatars[scorer.index()].set_expression(Expression::Win, &self.phrases, &mut self.rng);
        state.avatars[scorer.opponent().index()].set_expression(
            Expression::Lose,
            &self.phrases,
            &mut self.rng,
        );

        state.phase = MatchPhase::GoalPause;
        state.pause_until_ms = Some(state.clock_ms + self.rules.goal_pause_ms);

        log::info!(
            "GOAL! P{} scores ({}-{})",
            scorer.number(),
            state.scores[0],
            state.scores[1]
        );
    }

    /// Put everyone back for the restart after a goal
    fn reset_positions(&mut self) {
        let state = &mut self.state;
        state.avatars[Side::One.index()].reset_to(vec2(P1_START));
        state.avatars[Side::Two.index()].reset_to(vec2(P2_START));
        // Restart spawn is higher than the kick-off spawn
        state.ball.reset_to(vec2(BALL_RESET));
        state.pause_until_ms = None;
        state.phase = MatchPhase::Playing;

        log::debug!("Positions reset at {:.0}ms", state.clock_ms);
    }

    fn end_match(&mut self) {
        self.state.phase = MatchPhase::Ended;
        self.state.pause_until_ms = None;

        match MatchResult::from_scores(self.state.scores) {
            MatchResult::Winner(side) => log::info!(
                "Full time: PLAYER {} WINS! ({}-{})",
                side.number(),
                self.state.scores[0],
                self.state.scores[1]
            ),
            MatchResult::Draw => log::info!(
                "Full time: DRAW! ({}-{})",
                self.state.scores[0],
                self.state.scores[1]
            ),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let view = |side: Side| {
            let avatar = self.state.avatar(side);
            AvatarView {
                character_id: avatar.character_id,
                pos: avatar.pos,
                vel: avatar.vel,
                expression: avatar.expression,
                phrase: avatar.phrase.clone(),
            }
        };

        MatchSnapshot {
            phase: self.state.phase,
            scores: self.state.scores,
            timer: self.state.timer,
            avatars: [view(Side::One), view(Side::Two)],
            ball_pos: self.state.ball.pos,
            ball_radius: self.state.ball.radius,
            result: self.state.result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn controller() -> MatchController {
        MatchController::new(&Settings::default(), 0, 1, 12345)
    }

    /// Put the ball somewhere at rest, then run one frame after kick-off
    fn frame_with_ball_at(ctl: &mut MatchController, x: f32, y: f32) {
        ctl.update(0.0, &TickInput::default());
        ctl.state.ball.pos = Vec2::new(x, y);
        ctl.state.ball.vel = Vec2::ZERO;
        ctl.update(FRAME_MS, &TickInput::default());
    }

    #[test]
    fn test_goal_scorer_regions() {
        assert_eq!(goal_scorer(Vec2::new(49.0, 400.0)), Some(Side::Two));
        assert_eq!(goal_scorer(Vec2::new(1231.0, 400.0)), Some(Side::One));
        assert_eq!(goal_scorer(Vec2::new(49.0, 300.0)), None);
        assert_eq!(goal_scorer(Vec2::new(640.0, 500.0)), None);
        assert_eq!(goal_scorer(Vec2::new(50.0, 400.0)), None);
    }

    #[test]
    fn test_left_goal_scores_for_player_two() {
        let mut ctl = controller();
        frame_with_ball_at(&mut ctl, 49.0, 400.0);

        assert_eq!(ctl.phase(), MatchPhase::GoalPause);
        assert_eq!(ctl.state().scores, [0, 1]);
        assert_eq!(ctl.state().avatar(Side::Two).expression, Expression::Win);
        assert_eq!(ctl.state().avatar(Side::One).expression, Expression::Lose);
        assert!(ctl.state().avatar(Side::Two).phrase.is_some());
        assert_eq!(ctl.state().pause_until_ms, Some(FRAME_MS + GOAL_PAUSE_MS));
    }

    #[test]
    fn test_right_goal_scores_for_player_one() {
        let mut ctl = controller();
        frame_with_ball_at(&mut ctl, 1231.0, 400.0);

        assert_eq!(ctl.phase(), MatchPhase::GoalPause);
        assert_eq!(ctl.state().scores, [1, 0]);
    }

    #[test]
    fn test_above_crossbar_is_no_goal() {
        let mut ctl = controller();
        frame_with_ball_at(&mut ctl, 49.0, 300.0);

        assert_eq!(ctl.phase(), MatchPhase::Playing);
        assert_eq!(ctl.state().scores, [0, 0]);
    }

    #[test]
    fn test_goal_pause_round_trip() {
        let mut ctl = controller();
        frame_with_ball_at(&mut ctl, 49.0, 400.0);
        let resume_at = FRAME_MS + GOAL_PAUSE_MS;

        // Frozen until the scheduled time, whatever the input
        let mash = TickInput {
            p1: PlayerInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            ..Default::default()
        };
        ctl.update(1000.0, &mash);
        ctl.update(resume_at - 1.0, &mash);
        assert_eq!(ctl.phase(), MatchPhase::GoalPause);
        assert_eq!(ctl.state().ball.pos.x, 49.0);

        ctl.update(resume_at, &TickInput::default());
        let state = ctl.state();
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.avatar(Side::One).pos, Vec2::new(200.0, 500.0));
        assert_eq!(state.avatar(Side::One).vel, Vec2::ZERO);
        assert_eq!(state.avatar(Side::Two).pos, Vec2::new(1000.0, 500.0));
        assert_eq!(state.avatar(Side::Two).vel, Vec2::ZERO);
        assert_eq!(state.avatar(Side::One).expression, Expression::Idle);
        assert_eq!(state.avatar(Side::Two).phrase, None);
        assert_eq!(state.ball.pos, Vec2::new(640.0, 200.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.scores, [0, 1]);
        assert_eq!(state.pause_until_ms, None);
    }

    #[test]
    fn test_no_goal_processing_during_pause() {
        let mut ctl = controller();
        frame_with_ball_at(&mut ctl, 49.0, 400.0);
        let timer = ctl.state().timer;

        ctl.state.ball.pos = Vec2::new(1231.0, 400.0);
        ctl.tick(&TickInput::default(), 0.016);
        assert_eq!(ctl.state().scores, [0, 1]);
        assert_eq!(ctl.state().timer, timer);
    }

    #[test]
    fn test_timer_reaching_zero_ends_once() {
        let mut ctl = controller();
        ctl.state.timer = 0.02;
        ctl.state.scores = [3, 2];

        ctl.tick(&TickInput::default(), 0.02);
        assert_eq!(ctl.phase(), MatchPhase::Ended);
        assert_eq!(ctl.state().timer, 0.0);
        assert_eq!(ctl.result(), Some(MatchResult::Winner(Side::One)));

        // Nothing moves or scores afterwards
        ctl.state.ball.pos = Vec2::new(49.0, 400.0);
        ctl.tick(&TickInput::default(), 0.02);
        ctl.update(10_000.0, &TickInput::default());
        assert_eq!(ctl.phase(), MatchPhase::Ended);
        assert_eq!(ctl.state().scores, [3, 2]);
        assert_eq!(ctl.state().ball.pos, Vec2::new(49.0, 400.0));
    }

    #[test]
    fn test_draw_at_full_time() {
        let mut ctl = controller();
        ctl.state.scores = [2, 2];
        ctl.state.timer = 0.01;
        ctl.tick(&TickInput::default(), 0.05);
        assert_eq!(ctl.result(), Some(MatchResult::Draw));
        assert_eq!(ctl.snapshot().result, Some(MatchResult::Draw));
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut ctl = controller();
        ctl.update(5000.0, &TickInput::default());
        assert_eq!(ctl.state().timer, MATCH_DURATION_SECS);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut ctl = controller();
        ctl.update(0.0, &TickInput::default());
        ctl.update(1000.0, &TickInput::default());
        assert!((ctl.state().timer - (MATCH_DURATION_SECS - MAX_FRAME_DT)).abs() < 1e-5);
    }

    #[test]
    fn test_timestamp_going_backwards_is_zero_dt() {
        let mut ctl = controller();
        ctl.update(500.0, &TickInput::default());
        ctl.update(400.0, &TickInput::default());
        assert_eq!(ctl.state().timer, MATCH_DURATION_SECS);
    }

    #[test]
    fn test_both_avatars_resolve_in_order() {
        let mut ctl = controller();
        // Two avatars side by side on the ground, ball wedged over the gap
        ctl.state.avatars[0].pos = Vec2::new(600.0, 480.0);
        ctl.state.avatars[1].pos = Vec2::new(670.0, 480.0);
        ctl.state.ball.pos = Vec2::new(665.0, 470.0);
        ctl.state.ball.vel = Vec2::ZERO;

        let physics = ctl.physics().clone();
        let mut forward = ctl.state().ball.clone();
        physics.resolve_collision(&mut forward, ctl.state().avatar(Side::One));
        physics.resolve_collision(&mut forward, ctl.state().avatar(Side::Two));
        let mut reverse = ctl.state().ball.clone();
        physics.resolve_collision(&mut reverse, ctl.state().avatar(Side::Two));
        physics.resolve_collision(&mut reverse, ctl.state().avatar(Side::One));

        // dt = 0 keeps bodies in place so only the collisions act
        ctl.tick(&TickInput::default(), 0.0);
        let ball = &ctl.state().ball;
        assert!((ball.pos - forward.pos).length() < 1e-4);
        assert!((ball.vel - forward.vel).length() < 1e-4);
        assert!((forward.vel.x - reverse.vel.x).abs() > 1.0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut ctl = controller();
        ctl.update(0.0, &TickInput::default());
        let snap = ctl.snapshot();
        assert_eq!(snap.phase, MatchPhase::Playing);
        assert_eq!(snap.avatars[1].character_id, 1);
        assert_eq!(snap.ball_pos, Vec2::new(640.0, 300.0));
        assert_eq!(snap.seconds_left(), 60);
        assert_eq!(snap.result, None);
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs must produce identical matches
        let mut a = MatchController::new(&Settings::default(), 0, 1, 99999);
        let mut b = MatchController::new(&Settings::default(), 0, 1, 99999);

        let inputs = [
            TickInput {
                p1: PlayerInput {
                    right: true,
                    ..Default::default()
                },
                p2: PlayerInput {
                    left: true,
                    jump: true,
                    ..Default::default()
                },
            },
            TickInput::default(),
            TickInput {
                p1: PlayerInput {
                    jump: true,
                    kick: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            let ts = frame as f64 * FRAME_MS;
            a.update(ts, input);
            b.update(ts, input);
        }

        assert_eq!(a.snapshot(), b.snapshot());
    }
}
