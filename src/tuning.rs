//! Data-driven game balance
//!
//! Every gameplay number lives in one struct so a host can rebalance the
//! game from a JSON blob without a rebuild. Defaults are the shipped
//! balance; a JSON override may be partial.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Dot radius (canvas px)
    pub dot_radius: f32,
    /// Border ring thickness (px)
    pub dot_border: f32,
    /// Maximum per-axis dot speed (px per tick)
    pub max_dot_speed: i32,
    /// Session countdown at round start (ms)
    pub initial_timer_ms: f64,
    /// Time awarded per pop (ms)
    pub pop_bonus_ms: f64,
    /// Points awarded per pop
    pub pop_points: u32,
    /// Time lost per penalty click (ms)
    pub penalty_time_ms: f64,
    /// Points lost per penalty click
    pub penalty_points: u32,
    /// Title -> Playing handover delay (ms)
    pub title_delay_ms: f64,
    /// GameOver -> Title handover delay (ms)
    pub game_over_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dot_radius: consts::DOT_RADIUS,
            dot_border: consts::DOT_BORDER,
            max_dot_speed: consts::MAX_DOT_SPEED,
            initial_timer_ms: consts::INITIAL_TIMER_MS,
            pop_bonus_ms: consts::POP_BONUS_MS,
            pop_points: consts::POP_POINTS,
            penalty_time_ms: consts::PENALTY_TIME_MS,
            penalty_points: consts::PENALTY_POINTS,
            title_delay_ms: consts::TITLE_DELAY_MS,
            game_over_delay_ms: consts::GAME_OVER_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; absent fields keep their
    /// defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
