//! The Title / Playing / GameOver state machine
//!
//! Exactly one variant is active at a time. Playing is the only variant
//! that owns live session state; GameOver takes the ended session by move
//! and freezes it for display, and Title holds nothing at all (entering it
//! is what clears the board). Nothing is shared between variants.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dot::{Bounds, Dot, DotEvent};
use crate::tuning::Tuning;

/// Where a tick left the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep going
    Running,
    /// The countdown hit zero this tick; the game should enter GameOver
    Expired,
}

/// Live state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Never negative; penalties saturate at zero
    pub score: u32,
    /// Remaining time in ms. Transiently negative after a penalty until the
    /// next tick clamps it and reports [`TickOutcome::Expired`].
    pub timer_ms: f64,
    /// Newest first; the order doubles as draw stacking
    pub dots: Vec<Dot>,
    /// Timestamp of the previous tick; `None` until the first tick in this
    /// mode
    last_tick: Option<f64>,
}

impl Session {
    /// Fresh session: zero score, full countdown, one live dot
    pub fn new(tuning: &Tuning, rng: &mut Pcg32, bounds: Bounds, next_id: &mut u32) -> Self {
        let mut session = Self {
            score: 0,
            timer_ms: tuning.initial_timer_ms,
            dots: Vec::new(),
            last_tick: None,
        };
        session.spawn_dot(tuning, rng, bounds, next_id);
        session
    }

    /// Spawn one dot at the front of the stacking order
    pub fn spawn_dot(&mut self, tuning: &Tuning, rng: &mut Pcg32, bounds: Bounds, next_id: &mut u32) {
        let id = *next_id;
        *next_id += 1;
        self.dots
            .insert(0, Dot::spawn(id, rng, bounds, tuning.dot_radius, tuning.max_dot_speed));
    }

    /// Advance the countdown and every live dot by one tick.
    ///
    /// The first tick in this mode sees a zero delta: mode entry and the
    /// frame clock come from different instants, and charging the gap to
    /// the countdown would eat most of it on entry.
    pub fn tick(&mut self, timestamp: f64, bounds: Bounds) -> TickOutcome {
        let delta = match self.last_tick {
            Some(prev) => timestamp - prev,
            None => 0.0,
        };
        self.last_tick = Some(timestamp);

        self.timer_ms -= delta;
        if self.timer_ms <= 0.0 {
            self.timer_ms = 0.0;
            return TickOutcome::Expired;
        }

        for dot in &mut self.dots {
            dot.advance(bounds);
        }
        TickOutcome::Running
    }

    /// Apply a pop: mark the dot, reward score and time, spawn exactly one
    /// replacement. Returns false if the dot is unknown.
    pub fn apply_pop(&mut self, dot_id: u32, tuning: &Tuning, rng: &mut Pcg32, bounds: Bounds, next_id: &mut u32) -> bool {
        let Some(dot) = self.dots.iter_mut().find(|d| d.id == dot_id) else {
            return false;
        };
        dot.pop();
        self.score += tuning.pop_points;
        self.timer_ms += tuning.pop_bonus_ms;
        self.spawn_dot(tuning, rng, bounds, next_id);
        true
    }

    /// Apply a penalty: score floors at zero, the timer does not — the next
    /// tick's clamp converts a deep deficit into game over
    pub fn apply_penalty(&mut self, tuning: &Tuning) {
        self.score = self.score.saturating_sub(tuning.penalty_points);
        self.timer_ms -= tuning.penalty_time_ms;
    }
}

/// Top-level phase of the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Mode {
    /// Attract screen; all input is inert and no entities are live
    Title,
    /// Active session
    Playing(Session),
    /// Frozen display of the final session
    GameOver(Session),
}

impl Mode {
    /// The session behind this mode, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            Mode::Playing(session) | Mode::GameOver(session) => Some(session),
            Mode::Title => None,
        }
    }

    /// Frame tick. Only Playing advances anything; Title and GameOver hold
    /// still and simply get redrawn.
    pub fn tick(&mut self, timestamp: f64, bounds: Bounds) -> TickOutcome {
        match self {
            Mode::Playing(session) => session.tick(timestamp, bounds),
            Mode::Title | Mode::GameOver(_) => TickOutcome::Running,
        }
    }

    /// What a click on dot `dot_id` would mean right now, or `None` when no
    /// such dot is live
    pub fn classify_click(&self, dot_id: u32) -> Option<DotEvent> {
        self.session()?
            .dots
            .iter()
            .find(|d| d.id == dot_id)
            .map(|d| d.classify_click())
    }

    /// A fresh pop. No-op outside Playing: a dot clicked on the game-over
    /// screen stays green. Returns whether the pop was applied.
    pub fn on_popped(&mut self, dot_id: u32, tuning: &Tuning, rng: &mut Pcg32, bounds: Bounds, next_id: &mut u32) -> bool {
        match self {
            Mode::Playing(session) => session.apply_pop(dot_id, tuning, rng, bounds, next_id),
            Mode::Title | Mode::GameOver(_) => false,
        }
    }

    /// A repeat click on a popped dot. No-op outside Playing.
    pub fn on_penalty(&mut self, tuning: &Tuning) {
        if let Mode::Playing(session) = self {
            session.apply_penalty(tuning);
        }
    }
}
