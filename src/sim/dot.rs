//! The bouncing, poppable dot entity

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::palette::{Color, Shade};
use super::rng;

/// Canvas extents, captured once at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// What a click on a dot means, decided solely by its popped state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotEvent {
    /// First click on a live dot
    Popped,
    /// Any further click on the same dot
    Penalty,
}

/// A bouncing circular entity the player can click.
///
/// Unpopped dots are green; popping flips them red and they stay red (and
/// clickable, now yielding penalties) until the session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dot {
    pub id: u32,
    pub pos: Vec2,
    /// Per-axis speed in px per tick; components are integer-valued
    pub vel: Vec2,
    pub radius: f32,
    popped: bool,
}

impl Dot {
    /// Spawn at a uniform position inside the playable area with a
    /// randomized velocity on each axis
    pub fn spawn(id: u32, rng: &mut Pcg32, bounds: Bounds, radius: f32, max_speed: i32) -> Self {
        Self {
            id,
            pos: rng::spawn_position(rng, bounds, radius),
            vel: Vec2::new(
                rng::velocity_component(rng, max_speed),
                rng::velocity_component(rng, max_speed),
            ),
            radius,
            popped: false,
        }
    }

    pub fn popped(&self) -> bool {
        self.popped
    }

    /// One-way: once popped, a dot never un-pops
    pub fn pop(&mut self) {
        self.popped = true;
    }

    /// Fill color is purely a function of popped state
    pub fn color(&self) -> Color {
        if self.popped { Color::Red } else { Color::Green }
    }

    /// Border shade paired with the current fill
    pub fn shade(&self) -> Shade {
        self.color().shade()
    }

    /// Classify a click: a pop the first time, a penalty ever after.
    ///
    /// Classification only. The dot has no authority over scoring and does
    /// not even mark itself popped; the active mode applies the effect, so
    /// clicks outside a live session leave the dot untouched.
    pub fn classify_click(&self) -> DotEvent {
        if self.popped {
            DotEvent::Penalty
        } else {
            DotEvent::Popped
        }
    }

    /// Advance one tick, reflecting off the canvas edges.
    ///
    /// If the candidate position would put any part of the dot outside
    /// `[radius, dim - radius]` on an axis, that axis's velocity flips sign
    /// before the move commits. The position itself is never corrected, so
    /// a fast dot can sit past the edge for a tick before bouncing back.
    pub fn advance(&mut self, bounds: Bounds) {
        let next = self.pos + self.vel;
        if next.x < self.radius || next.x > bounds.width - self.radius {
            self.vel.x = -self.vel.x;
        }
        if next.y < self.radius || next.y > bounds.height - self.radius {
            self.vel.y = -self.vel.y;
        }
        self.pos += self.vel;
    }

    /// Whether a canvas point lands on this dot
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }
}
