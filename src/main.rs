//! Endless Runner entry point
//!
//! Web: wires canvas, keyboard/touch and resize events to a [`Session`] and
//! drives it from `requestAnimationFrame`.
//! Native: runs a headless autopilot session and logs the results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use endless_runner::input::{InputEvent, event_for_key};
    use endless_runner::persistence::KeyValueStore;
    use endless_runner::platform::web::{CanvasRenderer, LocalStorageStore};
    use endless_runner::sim::{PlayField, RunnerSimulation};
    use endless_runner::{RunnerConfig, Session};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        renderer: CanvasRenderer,
        last_time: Option<f64>,
    }

    impl Game {
        /// Queue a resize and match the canvas backing store right away
        fn resize(&mut self, width: f32, height: f32) {
            let field = PlayField::from_viewport(width, height);
            self.renderer.resize(field.width, field.height);
            self.session.push_input(InputEvent::Resize { width, height });
        }

        fn update(&mut self, time: f64) -> bool {
            let elapsed = match self.last_time {
                Some(last) => ((time - last) / 1000.0) as f32,
                None => 0.0,
            };
            self.last_time = Some(time);

            let running = self.session.frame(elapsed, &mut self.renderer);
            for event in self.session.take_events() {
                log::debug!("{:?}", event);
            }
            self.update_hud();
            running
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.session.hud();
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            set_text("score", &hud.score.to_string());
            set_text("high-score", &hud.high_score.to_string());
            set_text("prompt", hud.prompt);
            if let Some(el) = document.get_element_by_id("new-high-score") {
                let class = if hud.new_high_score { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn viewport() -> (f32, f32) {
        let window = web_sys::window().unwrap();
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width as f32, height as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Endless Runner starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .unwrap()
            .dyn_into()
            .unwrap();

        let config = RunnerConfig::load();
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let store = LocalStorageStore::new();
        if store.get(endless_runner::persistence::HIGH_SCORE_KEY).is_none() {
            log::info!("First run on this browser");
        }

        let (vw, vh) = viewport();
        let field = PlayField::from_viewport(vw, vh);
        let sim = RunnerSimulation::new(config.tuning, field, store, seed);
        let session = Session::new(sim, config.visuals);
        let renderer = CanvasRenderer::new(canvas.clone()).expect("canvas 2d context");
        renderer.resize(field.width, field.height);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            last_time: None,
        }));

        setup_keyboard(game.clone());
        setup_pointer(game.clone(), &canvas);
        setup_resize(game.clone());
        start_loop(game);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(input) = event_for_key(&event.code()) {
                event.prevent_default();
                game.borrow_mut().session.push_input(input);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(game: Rc<RefCell<Game>>, canvas: &HtmlCanvasElement) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.push_input(InputEvent::Jump);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
            event.prevent_default();
            game.borrow_mut().session.push_input(InputEvent::Jump);
        });
        let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport();
            game.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
        let _ = web_sys::window()
            .unwrap()
            .request_animation_frame(f.as_ref().unchecked_ref());
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            let running = game.borrow_mut().update(time);
            if running {
                if let Some(callback) = f.borrow().as_ref() {
                    request_animation_frame(callback);
                }
            } else {
                // Session stopped: drop the callback so nothing reschedules
                let _ = f.borrow_mut().take();
            }
        }));

        if let Some(callback) = g.borrow().as_ref() {
            request_animation_frame(callback);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use endless_runner::consts::SIM_DT;
    use endless_runner::input::InputEvent;
    use endless_runner::persistence::JsonFileStore;
    use endless_runner::render::CommandLog;
    use endless_runner::sim::{GameEvent, Lifecycle, PlayField, RunnerSimulation, RunnerState};
    use endless_runner::{RunnerConfig, Session};

    /// Frames to simulate before giving up (ten minutes at 60 Hz)
    const FRAME_LIMIT: u32 = 60 * 60 * 10;
    /// Number of runs to play
    const RUNS: u32 = 3;

    /// Jump when the nearest obstacle ahead is about to reach the player
    fn should_jump(state: &RunnerState) -> bool {
        if state.player.is_jumping {
            return false;
        }
        let front = state.player.pos.x + state.player.size.x;
        state.obstacles.iter().any(|o| {
            let gap = o.pos.x - front;
            gap > 0.0 && gap < state.game_speed * 6.0
        })
    }

    env_logger::init();
    log::info!("Endless Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => RunnerConfig::load_file(Path::new(&path)),
        None => RunnerConfig::default(),
    };
    let store_path = args
        .next()
        .unwrap_or_else(|| "endless-runner-save.json".to_string());
    let store = JsonFileStore::open(&store_path);

    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {}", seed);

    let sim = RunnerSimulation::new(config.tuning, PlayField::default(), store, seed);
    let mut session = Session::new(sim, config.visuals);
    let mut renderer = CommandLog::default();

    let mut runs = 0;
    let mut best = 0;
    for _ in 0..FRAME_LIMIT {
        let state = session.simulation().state();
        let jump = match state.lifecycle {
            Lifecycle::Start => true,
            Lifecycle::Playing => should_jump(state),
            Lifecycle::GameOver => {
                runs += 1;
                best = best.max(state.score);
                println!("Run {}: score {}", runs, state.score);
                true
            }
        };
        if runs >= RUNS {
            break;
        }
        if jump {
            session.push_input(InputEvent::Jump);
        }

        session.frame(SIM_DT, &mut renderer);
        for event in session.take_events() {
            if let GameEvent::NewHighScore { score, previous } = event {
                println!("New high score {} (was {})", score, previous);
            }
        }
    }
    session.stop();

    let hud = session.hud();
    println!(
        "Played {} run(s) over {} frames, best {}, all-time high {} (saved to {})",
        runs, renderer.frames, best, hud.high_score, store_path
    );
}
