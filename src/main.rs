//! Vibes FC entry point
//!
//! On the web this wires DOM events and the page's 3D engine into `Game` and
//! runs the animation loop. Natively it plays a short headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

    use vibes_fc::minimap::{BALL_COLOR, MINIMAP_HEIGHT, MINIMAP_WIDTH, MinimapFrame};
    use vibes_fc::platform::{HostHandles, MinimapSink, RenderFrame, RenderSink, ScoreSink};
    use vibes_fc::sim::{Action, Score, Team};
    use vibes_fc::{Game, Settings};

    /// Event the page's asset loader dispatches on `window` once the ball model is in
    const BALL_LOADED_EVENT: &str = "vibes-fc:ball-loaded";

    // Bridge to the page's 3D engine (scene, camera, renderer live in JS)
    #[wasm_bindgen(inline_js = "
        export function engine_ready() {
            const host = window.vibesFc;
            return !!(host && typeof host.render === 'function');
        }

        export function render_frame(data) {
            window.vibesFc.render(data);
        }
    ")]
    extern "C" {
        fn engine_ready() -> bool;
        fn render_frame(data: &[f32]);
    }

    /// Forwards frames to `window.vibesFc.render(Float32Array)`.
    ///
    /// Layout: camera position (3), camera target (3), player position (3),
    /// player yaw, ball present flag, ball position (3), ball spin (3).
    struct EngineRenderSink {
        buffer: Vec<f32>,
    }

    impl RenderSink for EngineRenderSink {
        fn render(&mut self, frame: &RenderFrame) {
            let buf = &mut self.buffer;
            buf.clear();
            buf.extend_from_slice(&frame.camera.position.to_array());
            buf.extend_from_slice(&frame.camera.target.to_array());
            buf.extend_from_slice(&frame.player_position.to_array());
            buf.push(frame.player_yaw);
            match &frame.ball {
                Some(ball) => {
                    buf.push(1.0);
                    buf.extend_from_slice(&ball.position.to_array());
                    buf.extend_from_slice(&ball.spin.to_array());
                }
                None => {
                    buf.push(0.0);
                    buf.extend_from_slice(&[0.0; 6]);
                }
            }
            render_frame(buf);
        }
    }

    /// Score overlay in the DOM
    struct DomScoreboard {
        document: web_sys::Document,
    }

    impl DomScoreboard {
        fn show(&self, score: Score) {
            if let Some(el) = self.document.get_element_by_id("score-red") {
                el.set_text_content(Some(&score.red.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("score-blue") {
                el.set_text_content(Some(&score.blue.to_string()));
            }
        }
    }

    impl ScoreSink for DomScoreboard {
        fn team_scored(&mut self, team: Team, score: Score) {
            self.show(score);
            if let Some(el) = self.document.get_element_by_id("goal-banner") {
                el.set_text_content(Some(&format!("GOAL {}!", team.as_str().to_uppercase())));
                let _ = el.set_attribute("class", "pop");
            }
        }
    }

    /// Minimap drawn on a 2D canvas
    struct CanvasMinimap {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasMinimap {
        fn attach(document: &web_sys::Document) -> Option<Self> {
            let canvas: HtmlCanvasElement = document
                .get_element_by_id("mini-map")?
                .dyn_into()
                .ok()?;
            canvas.set_width(MINIMAP_WIDTH as u32);
            canvas.set_height(MINIMAP_HEIGHT as u32);
            let ctx = canvas
                .get_context("2d")
                .ok()??
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            Some(Self { ctx })
        }
    }

    impl MinimapSink for CanvasMinimap {
        fn draw(&mut self, frame: &MinimapFrame) {
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, MINIMAP_WIDTH as f64, MINIMAP_HEIGHT as f64);

            // Player: triangle pointing along facing
            ctx.save();
            let _ = ctx.translate(frame.player.x as f64, frame.player.y as f64);
            let _ = ctx.rotate(-frame.player_yaw as f64);
            ctx.begin_path();
            ctx.move_to(0.0, -4.0);
            ctx.line_to(3.0, 4.0);
            ctx.line_to(-3.0, 4.0);
            ctx.close_path();
            ctx.set_fill_style_str(frame.player_color);
            ctx.fill();
            ctx.restore();

            // Ball: dot
            if let Some(ball) = frame.ball {
                ctx.begin_path();
                let _ = ctx.arc(ball.x as f64, ball.y as f64, 2.0, 0.0, std::f64::consts::TAU);
                ctx.set_fill_style_str(BALL_COLOR);
                ctx.fill();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Vibes FC starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();

        let mut host = HostHandles::default().with_score(DomScoreboard {
            document: document.clone(),
        });
        if engine_ready() {
            host = host.with_render(EngineRenderSink {
                buffer: Vec::with_capacity(17),
            });
        }
        match CanvasMinimap::attach(&document) {
            Some(minimap) => host = host.with_minimap(minimap),
            None => log::warn!("No #mini-map canvas, minimap disabled"),
        }

        let game = match Game::new(settings, host) {
            Ok(game) => Rc::new(RefCell::new(game)),
            Err(e) => {
                log::error!("Cannot start: {e}");
                return;
            }
        };

        DomScoreboard { document }.show(Score::default());

        setup_input_handlers(game.clone());
        setup_ball_loaded(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Vibes FC running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    // Arrows and space would scroll the page
                    event.prevent_default();
                    game.borrow_mut().input_mut().key_down(action, event.repeat());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    game.borrow_mut().input_mut().key_up(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse drag rotates the player
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input_mut()
                    .pointer_down(event.client_x() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let sensitivity = g.settings().controls.drag_sensitivity;
                g.input_mut()
                    .pointer_move(event.client_x() as f32, sensitivity);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input_mut().pointer_up();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Wheel zoom
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                let mut g = game.borrow_mut();
                let sensitivity = g.settings().controls.zoom_sensitivity;
                g.input_mut().wheel(event.delta_y() as f32, sensitivity);
            });
            let _ = window
                .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input_mut().release_all();
                log::info!("Input released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_ball_loaded(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().ball_loaded();
        });
        let _ = window
            .add_event_listener_with_callback(BALL_LOADED_EVENT, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Vibes FC (native) starting...");
    log::info!("Native mode has no 3D view - serve the wasm build for the real game");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted kick-about without a renderer window
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use vibes_fc::consts::FRAME_DT;
    use vibes_fc::minimap::MinimapFrame;
    use vibes_fc::platform::{HostHandles, MinimapSink, RenderFrame, RenderSink, ScoreSink};
    use vibes_fc::sim::{Action, Score, Team};
    use vibes_fc::{Game, GameError, Settings};

    /// Logs the camera once a second instead of drawing
    struct LogRenderer {
        frames: u64,
    }

    impl RenderSink for LogRenderer {
        fn render(&mut self, frame: &RenderFrame) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::info!(
                    "t={}s player={:.2} ball={:?} camera={:.2}",
                    self.frames / 60,
                    frame.player_position,
                    frame.ball.as_ref().map(|b| b.position),
                    frame.camera.position
                );
            }
        }
    }

    struct StdoutScoreboard;

    impl ScoreSink for StdoutScoreboard {
        fn team_scored(&mut self, team: Team, score: Score) {
            println!("GOAL {}! RED {} - {} BLUE", team.as_str(), score.red, score.blue);
        }
    }

    struct TraceMinimap;

    impl MinimapSink for TraceMinimap {
        fn draw(&mut self, frame: &MinimapFrame) {
            log::trace!("minimap player={} ball={:?}", frame.player, frame.ball);
        }
    }

    pub fn run() -> Result<(), GameError> {
        let host = HostHandles::default()
            .with_render(LogRenderer { frames: 0 })
            .with_score(StdoutScoreboard)
            .with_minimap(TraceMinimap);
        let mut game = Game::new(Settings::load(), host)?;

        let frame_ms = (FRAME_DT * 1000.0) as f64;
        let mut now = 0.0;
        let mut step = |game: &mut Game, frames: u32| {
            for _ in 0..frames {
                game.frame(now);
                now += frame_ms;
            }
        };

        // Half a second before the ball model "arrives"
        step(&mut game, 30);
        game.ball_loaded();

        // Run at the ball, then sprint after it
        game.input_mut().key_down(Action::MoveForward, false);
        step(&mut game, 60);
        game.input_mut().key_down(Action::Sprint, false);
        game.input_mut().key_down(Action::Jump, false);
        step(&mut game, 120);
        game.input_mut().key_up(Action::Sprint);
        game.input_mut().key_up(Action::MoveForward);
        step(&mut game, 60);

        let score = game.state().score;
        println!("Final score: RED {} - {} BLUE", score.red, score.blue);
        Ok(())
    }
}
