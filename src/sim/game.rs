//! Frame orchestration and mode-transition scheduling
//!
//! `Game` owns the host seam, the canvas bounds, the active [`Mode`], and a
//! queue of delayed mode swaps. Swaps carry the generation of the mode that
//! scheduled them; a swap whose mode has since been replaced is stale and
//! gets dropped instead of firing.

use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::dot::{Bounds, DotEvent};
use super::mode::{Mode, Session, TickOutcome};
use crate::platform::{DotSprite, FrameView, Host};
use crate::tuning::Tuning;

/// Discriminant-only view of the active mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ModeTag {
    Title,
    Playing,
    GameOver,
}

/// A mode swap waiting on the frame clock
#[derive(Debug, Clone, Copy)]
struct PendingSwap {
    target: ModeTag,
    fire_at_ms: f64,
    generation: u64,
}

/// The whole game: bounds, active mode, swap queue, RNG, and the host
pub struct Game<H: Host> {
    host: H,
    tuning: Tuning,
    bounds: Bounds,
    mode: Mode,
    pending: Vec<PendingSwap>,
    generation: u64,
    rng: Pcg32,
    next_dot_id: u32,
}

impl<H: Host> Game<H> {
    /// Capture the viewport, seed the RNG, and enter Title
    pub fn new(host: H, tuning: Tuning, seed: u64) -> Self {
        let (width, height) = host.viewport_size();
        let mut game = Self {
            bounds: Bounds::new(width, height),
            mode: Mode::Title,
            pending: Vec::new(),
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_dot_id: 1,
            host,
            tuning,
        };
        info!("play field {width}x{height}, seed {seed}");
        let now = game.host.now();
        game.enter(ModeTag::Title, now);
        game
    }

    /// One frame: apply due swaps, tick the active mode, push a full
    /// redraw. `now_ms` is the host's monotonic frame timestamp; the host
    /// keeps scheduling frames until the process exits.
    pub fn run_frame(&mut self, now_ms: f64) {
        self.apply_due_swaps(now_ms);
        if self.mode.tick(now_ms, self.bounds) == TickOutcome::Expired {
            self.enter(ModeTag::GameOver, now_ms);
        }
        let frame = self.frame_view();
        self.host.draw_frame(&frame);
    }

    /// Entry point for the host's input plumbing: a pointer landed on dot
    /// `id`. The dot classifies the click; the active mode decides whether
    /// anything happens.
    pub fn dot_clicked(&mut self, id: u32) {
        let Some(event) = self.mode.classify_click(id) else {
            return;
        };
        match event {
            DotEvent::Popped => {
                let applied = self.mode.on_popped(
                    id,
                    &self.tuning,
                    &mut self.rng,
                    self.bounds,
                    &mut self.next_dot_id,
                );
                if applied {
                    // Color flip on the popped dot, then its replacement
                    if let Some(sprite) = self.sprite(id) {
                        self.host.draw_dot(&sprite);
                    }
                    if let Some(sprite) = self.newest_sprite() {
                        self.host.draw_dot(&sprite);
                    }
                }
            }
            DotEvent::Penalty => self.mode.on_penalty(&self.tuning),
        }
    }

    /// Render-ready snapshot of the current frame
    pub fn frame_view(&self) -> FrameView {
        let (score, timer_ms, dots): (u32, f64, &[_]) = match self.mode.session() {
            Some(session) => (session.score, session.timer_ms, session.dots.as_slice()),
            None => (0, 0.0, &[]),
        };
        FrameView {
            mode: self.mode_tag(),
            score,
            timer_ms,
            dots: dots.iter().map(DotSprite::from).collect(),
        }
    }

    pub fn mode_tag(&self) -> ModeTag {
        match self.mode {
            Mode::Title => ModeTag::Title,
            Mode::Playing(_) => ModeTag::Playing,
            Mode::GameOver(_) => ModeTag::GameOver,
        }
    }

    /// Swap the active mode and schedule any delayed follow-up. Every swap
    /// bumps the generation, which is what invalidates older scheduled
    /// swaps.
    fn enter(&mut self, target: ModeTag, now_ms: f64) {
        self.generation += 1;
        self.mode = match target {
            ModeTag::Title => Mode::Title,
            ModeTag::Playing => Mode::Playing(Session::new(
                &self.tuning,
                &mut self.rng,
                self.bounds,
                &mut self.next_dot_id,
            )),
            ModeTag::GameOver => {
                let prev = std::mem::replace(&mut self.mode, Mode::Title);
                debug_assert!(
                    matches!(prev, Mode::Playing(_)),
                    "game over entered without a live session"
                );
                match prev {
                    Mode::Playing(session) => Mode::GameOver(session),
                    other => other,
                }
            }
        };
        info!("mode -> {target:?}");

        match target {
            ModeTag::Title => self.schedule(ModeTag::Playing, now_ms + self.tuning.title_delay_ms),
            ModeTag::GameOver => {
                self.schedule(ModeTag::Title, now_ms + self.tuning.game_over_delay_ms)
            }
            ModeTag::Playing => {
                // The session opens with one dot already on the board
                if let Some(sprite) = self.newest_sprite() {
                    self.host.draw_dot(&sprite);
                }
            }
        }
    }

    fn schedule(&mut self, target: ModeTag, fire_at_ms: f64) {
        self.pending.push(PendingSwap {
            target,
            fire_at_ms,
            generation: self.generation,
        });
    }

    /// Fire every due swap whose generation still matches; drop the rest.
    /// Entering a mode bumps the generation, so at most one swap from any
    /// given mode ever lands.
    fn apply_due_swaps(&mut self, now_ms: f64) {
        loop {
            let Some(idx) = self.pending.iter().position(|s| s.fire_at_ms <= now_ms) else {
                break;
            };
            let swap = self.pending.swap_remove(idx);
            if swap.generation == self.generation {
                self.enter(swap.target, now_ms);
            } else {
                debug!(
                    "dropping stale swap to {:?} (generation {} != {})",
                    swap.target, swap.generation, self.generation
                );
            }
        }
    }

    fn sprite(&self, id: u32) -> Option<DotSprite> {
        self.mode
            .session()
            .and_then(|s| s.dots.iter().find(|d| d.id == id))
            .map(DotSprite::from)
    }

    fn newest_sprite(&self) -> Option<DotSprite> {
        self.mode
            .session()
            .and_then(|s| s.dots.first())
            .map(DotSprite::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::palette::Color;

    /// Records every draw the core pushes through the seam
    #[derive(Default)]
    struct RecordingHost {
        dot_draws: Vec<DotSprite>,
        frames: Vec<FrameView>,
    }

    impl Host for RecordingHost {
        fn now(&self) -> f64 {
            0.0
        }
        fn viewport_size(&self) -> (f32, f32) {
            (1280.0, 720.0)
        }
        fn draw_dot(&mut self, sprite: &DotSprite) {
            self.dot_draws.push(*sprite);
        }
        fn draw_frame(&mut self, frame: &FrameView) {
            self.frames.push(frame.clone());
        }
    }

    fn new_game() -> Game<RecordingHost> {
        Game::new(RecordingHost::default(), Tuning::default(), 0xD07)
    }

    /// Drive the game to Playing (Title hands over at t = 1000)
    fn into_playing(game: &mut Game<RecordingHost>) {
        game.run_frame(0.0);
        game.run_frame(1_000.0);
        assert_eq!(game.mode_tag(), ModeTag::Playing);
    }

    #[test]
    fn test_title_hands_over_after_delay() {
        let mut game = new_game();
        assert_eq!(game.mode_tag(), ModeTag::Title);

        game.run_frame(0.0);
        game.run_frame(999.0);
        assert_eq!(game.mode_tag(), ModeTag::Title);
        assert!(game.frame_view().dots.is_empty());

        game.run_frame(1_000.0);
        assert_eq!(game.mode_tag(), ModeTag::Playing);
        let frame = game.frame_view();
        assert_eq!(frame.score, 0);
        assert_eq!(frame.timer_ms, 10_000.0);
        assert_eq!(frame.dots.len(), 1);
        // The opening dot was pushed through draw_dot as well
        assert_eq!(game.host.dot_draws.len(), 1);
        assert_eq!(game.host.dot_draws[0].fill, Color::Green);
    }

    #[test]
    fn test_every_frame_issues_a_redraw() {
        let mut game = new_game();
        for t in [0.0, 100.0, 200.0, 300.0] {
            game.run_frame(t);
        }
        assert_eq!(game.host.frames.len(), 4);
    }

    #[test]
    fn test_pop_scores_and_replaces() {
        let mut game = new_game();
        into_playing(&mut game);
        let target = game.frame_view().dots[0].id;

        game.dot_clicked(target);

        let frame = game.frame_view();
        assert_eq!(frame.score, 1);
        assert_eq!(frame.timer_ms, 11_000.0);
        assert_eq!(frame.dots.len(), 2);
        let popped = frame.dots.iter().find(|d| d.id == target).unwrap();
        assert_eq!(popped.fill, Color::Red);

        // draw_dot fired for: opening spawn, color flip, replacement
        assert_eq!(game.host.dot_draws.len(), 3);
        assert_eq!(game.host.dot_draws[1].id, target);
        assert_eq!(game.host.dot_draws[1].fill, Color::Red);
        assert_eq!(game.host.dot_draws[2].fill, Color::Green);
    }

    #[test]
    fn test_second_click_is_a_penalty() {
        let mut game = new_game();
        into_playing(&mut game);
        let target = game.frame_view().dots[0].id;

        game.dot_clicked(target);
        game.dot_clicked(target);

        let frame = game.frame_view();
        // score 1 - 2 floors at 0; timer 10000 + 1000 - 2000
        assert_eq!(frame.score, 0);
        assert_eq!(frame.timer_ms, 9_000.0);
        assert_eq!(frame.dots.len(), 2, "penalties never spawn dots");

        // And again: still a penalty, never a second pop
        game.dot_clicked(target);
        assert_eq!(game.frame_view().timer_ms, 7_000.0);
        assert_eq!(game.frame_view().dots.len(), 2);
    }

    #[test]
    fn test_penalty_deficit_becomes_game_over() {
        let mut game = new_game();
        into_playing(&mut game);
        let target = game.frame_view().dots[0].id;

        game.dot_clicked(target); // timer 11_000
        game.run_frame(11_500.0); // delta 10_500 -> timer 500
        assert_eq!(game.frame_view().timer_ms, 500.0);

        game.dot_clicked(target); // penalty -> timer -1_500
        game.run_frame(11_516.0);
        assert_eq!(game.mode_tag(), ModeTag::GameOver);
        assert_eq!(game.frame_view().timer_ms, 0.0);
    }

    #[test]
    fn test_full_cycle_returns_to_title() {
        let mut game = new_game();
        game.run_frame(0.0);
        game.run_frame(1_000.0); // Title -> Playing
        assert_eq!(game.mode_tag(), ModeTag::Playing);

        // Let the countdown run dry with no pops
        game.run_frame(1_001.0); // first tick in Playing: zero delta
        game.run_frame(12_000.0); // ~11 s later
        assert_eq!(game.mode_tag(), ModeTag::GameOver);

        // The frozen board is still there while game over shows
        assert_eq!(game.frame_view().dots.len(), 1);
        game.run_frame(14_000.0);
        assert_eq!(game.mode_tag(), ModeTag::GameOver);

        // 3 s after entering game over: back to an empty title screen
        game.run_frame(15_000.0);
        assert_eq!(game.mode_tag(), ModeTag::Title);
        assert!(game.frame_view().dots.is_empty());

        // And the next session begins on schedule
        game.run_frame(16_000.0);
        assert_eq!(game.mode_tag(), ModeTag::Playing);
        assert_eq!(game.frame_view().score, 0);
    }

    #[test]
    fn test_stale_swap_is_dropped() {
        let mut game = new_game();
        // Forge a swap from a mode that no longer exists
        game.pending.push(PendingSwap {
            target: ModeTag::GameOver,
            fire_at_ms: 10.0,
            generation: 0,
        });
        game.run_frame(20.0);
        assert_eq!(game.mode_tag(), ModeTag::Title, "stale swap must not fire");

        // The legitimate handover still happens
        game.run_frame(1_000.0);
        assert_eq!(game.mode_tag(), ModeTag::Playing);
    }

    #[test]
    fn test_two_due_swaps_land_only_once() {
        let mut game = new_game();
        // A duplicate of the scheduled handover, same generation: the first
        // to fire bumps the generation and invalidates the second
        let dup = game.pending[0];
        game.pending.push(dup);
        game.run_frame(1_500.0);
        assert_eq!(game.mode_tag(), ModeTag::Playing);
        assert_eq!(game.frame_view().dots.len(), 1);
        assert!(game.pending.is_empty());
        // One session entry, one opening draw - not two
        assert_eq!(game.host.dot_draws.len(), 1);
    }

    #[test]
    fn test_clicks_on_frozen_board_do_nothing() {
        let mut game = new_game();
        into_playing(&mut game);
        game.run_frame(1_001.0);
        game.run_frame(20_000.0);
        assert_eq!(game.mode_tag(), ModeTag::GameOver);

        let frame = game.frame_view();
        let id = frame.dots[0].id;
        game.dot_clicked(id);
        let after = game.frame_view();
        assert_eq!(after.score, frame.score);
        assert_eq!(after.dots.len(), frame.dots.len());
        assert_eq!(after.dots[0].fill, Color::Green, "frozen dot stays green");
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = Game::new(RecordingHost::default(), Tuning::default(), 42);
        let mut b = Game::new(RecordingHost::default(), Tuning::default(), 42);
        for game in [&mut a, &mut b] {
            game.run_frame(0.0);
            game.run_frame(1_000.0);
        }
        let (fa, fb) = (a.frame_view(), b.frame_view());
        assert_eq!(fa.dots[0].pos, fb.dots[0].pos);
    }
}
