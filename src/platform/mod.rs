//! Platform abstraction layer
//!
//! The seam between the deterministic core and whatever presents it. The
//! core pushes draw requests through [`Host`] and reads the clock and
//! viewport from it; it never touches the canvas, DOM, or OS directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Color, Dot, ModeTag, Shade};

/// Everything the core needs from the presentation side
pub trait Host {
    /// Monotonic timestamp in milliseconds
    fn now(&self) -> f64;
    /// Canvas extent, queried once at startup to size the play field
    fn viewport_size(&self) -> (f32, f32);
    /// Immediate draw of one dot, issued on spawn and again when it pops
    fn draw_dot(&mut self, sprite: &DotSprite);
    /// Full redraw, issued every tick
    fn draw_frame(&mut self, frame: &FrameView);
}

/// Render-ready view of one dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotSprite {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub fill: Color,
    pub border: Shade,
}

impl From<&Dot> for DotSprite {
    fn from(dot: &Dot) -> Self {
        Self {
            id: dot.id,
            pos: dot.pos,
            radius: dot.radius,
            fill: dot.color(),
            border: dot.shade(),
        }
    }
}

/// Render-ready view of one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameView {
    pub mode: ModeTag,
    pub score: u32,
    /// Remaining session time; format with [`crate::time_string`]
    pub timer_ms: f64,
    /// Newest first. Dots paint in this order, so the oldest dot ends up on
    /// top of the stack and wins the hit test.
    pub dots: Vec<DotSprite>,
}

impl FrameView {
    /// Topmost dot under a canvas point, for hosts without retained
    /// per-entity hit areas
    pub fn dot_at(&self, point: Vec2) -> Option<u32> {
        self.dots
            .iter()
            .rev()
            .find(|d| d.pos.distance_squared(point) <= d.radius * d.radius)
            .map(|d| d.id)
    }
}
