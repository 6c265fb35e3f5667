//! Dot Pop entry point
//!
//! Platform glue only: canvas rendering and pointer input in the browser,
//! a headless scripted demo natively. All gameplay lives in `dot_pop::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use dot_pop::platform::{DotSprite, FrameView, Host};
    use dot_pop::sim::{Color, Game, ModeTag, Shade};
    use dot_pop::{Tuning, time_string};

    /// Canvas-2D implementation of the core's host interface
    struct CanvasHost {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
        border: f32,
    }

    impl CanvasHost {
        fn fill_circle(&self, pos: Vec2, radius: f32, css: &str) {
            self.ctx.set_fill_style_str(css);
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, std::f64::consts::TAU);
            self.ctx.fill();
        }

        /// Border ring first, then the fill on top of it
        fn paint_dot(&self, sprite: &DotSprite) {
            self.fill_circle(sprite.pos, sprite.radius, &sprite.border.css_string());
            self.fill_circle(
                sprite.pos,
                (sprite.radius - self.border).max(0.0),
                &sprite.fill.css_string(),
            );
        }

        fn banner(&self, text: &str) {
            self.ctx.set_text_align("center");
            self.ctx.set_font("bold 48px Helvetica");
            self.ctx.set_fill_style_str(&Shade::Black.css_string());
            let _ = self
                .ctx
                .fill_text(text, (self.width / 2.0) as f64, (self.height / 2.0) as f64);
        }
    }

    impl Host for CanvasHost {
        fn now(&self) -> f64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0)
        }

        fn viewport_size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn draw_dot(&mut self, sprite: &DotSprite) {
            self.paint_dot(sprite);
        }

        fn draw_frame(&mut self, frame: &FrameView) {
            self.ctx.set_fill_style_str(&Color::White.css_string());
            self.ctx
                .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

            // Newest first: painting in order leaves the oldest dot on top
            for sprite in &frame.dots {
                self.paint_dot(sprite);
            }

            self.ctx.set_text_align("left");
            self.ctx.set_font("20px Helvetica");
            self.ctx.set_fill_style_str(&Color::Black.css_string());
            let _ = self.ctx.fill_text("Timer: ", 8.0, 28.0);
            let _ = self.ctx.fill_text("Score: ", 8.0, 56.0);
            self.ctx.set_font("bold 20px Helvetica");
            self.ctx.set_fill_style_str(&Shade::Black.css_string());
            let _ = self.ctx.fill_text(&time_string(frame.timer_ms), 78.0, 28.0);
            let _ = self.ctx.fill_text(&frame.score.to_string(), 78.0, 56.0);

            match frame.mode {
                ModeTag::Title => self.banner("DOT POP"),
                ModeTag::GameOver => self.banner("GAME OVER"),
                ModeTag::Playing => {}
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Dot Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the play field to the viewport, captured once at startup
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Optional balance override from the page
        let tuning = canvas
            .get_attribute("data-tuning")
            .and_then(|json| match Tuning::from_json(&json) {
                Ok(tuning) => Some(tuning),
                Err(err) => {
                    log::warn!("ignoring bad tuning override: {err}");
                    None
                }
            })
            .unwrap_or_default();

        let host = CanvasHost {
            ctx,
            width: width as f32,
            height: height as f32,
            border: tuning.dot_border,
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(host, tuning, seed)));
        log::info!("game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Dot Pop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game<CanvasHost>>>) {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                click_at(&game, point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let point = Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    click_at(&game, point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn click_at(game: &Rc<RefCell<Game<CanvasHost>>>, point: Vec2) {
        let mut game = game.borrow_mut();
        if let Some(id) = game.frame_view().dot_at(point) {
            game.dot_clicked(id);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game<CanvasHost>>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game<CanvasHost>>>, time: f64) {
        game.borrow_mut().run_frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dot_pop::platform::{DotSprite, FrameView, Host};
    use dot_pop::time_string;

    /// Draws nothing; narrates what it was asked to draw
    pub struct LogHost {
        width: f32,
        height: f32,
        frames: u64,
    }

    impl LogHost {
        pub fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                frames: 0,
            }
        }
    }

    impl Host for LogHost {
        fn now(&self) -> f64 {
            0.0
        }

        fn viewport_size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn draw_dot(&mut self, sprite: &DotSprite) {
            log::info!(
                "dot #{} {:?} at ({:.0}, {:.0})",
                sprite.id,
                sprite.fill,
                sprite.pos.x,
                sprite.pos.y
            );
        }

        fn draw_frame(&mut self, frame: &FrameView) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::info!(
                    "[{:?}] score {} timer {}s dots {}",
                    frame.mode,
                    frame.score,
                    time_string(frame.timer_ms),
                    frame.dots.len()
                );
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dot_pop::Tuning;
    use dot_pop::sim::{Game, ModeTag};

    env_logger::init();
    log::info!("Dot Pop (native) starting...");
    log::info!("Headless demo - build for wasm32 and serve a canvas page for the playable game");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0xD07);
    let mut game = Game::new(headless::LogHost::new(1280.0, 720.0), Tuning::default(), seed);

    // One full Title -> Playing -> GameOver -> Title cycle at 60 fps,
    // popping the newest dot once a second for the first few seconds
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut next_pop = 2_000.0;
    for _ in 0..(20 * 60) {
        now += frame_ms;
        game.run_frame(now);
        if game.mode_tag() == ModeTag::Playing && now >= next_pop && now < 6_000.0 {
            next_pop = now + 1_000.0;
            if let Some(dot) = game.frame_view().dots.first() {
                game.dot_clicked(dot.id);
            }
        }
    }
    log::info!("demo finished");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this only satisfies the compiler
}
