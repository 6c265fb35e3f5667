//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - The frame timestamps handed to `Game::run_frame` are the only clock
//! - Seeded RNG only
//! - Stable dot ordering (newest first, doubles as draw stacking)
//! - No rendering or platform dependencies beyond the `Host` seam

pub mod dot;
pub mod game;
pub mod mode;
pub mod palette;
pub mod rng;

pub use dot::{Bounds, Dot, DotEvent};
pub use game::{Game, ModeTag};
pub use mode::{Mode, Session, TickOutcome};
pub use palette::{Color, Shade};
