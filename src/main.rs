//! Circle Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use circle_dodge::Settings;
    use circle_dodge::renderer::{CanvasSurface, draw_frame, score_text};
    use circle_dodge::sim::{Direction, GameEvent, GameState, TickOutcome, set_intent, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        last_outcome: TickOutcome,
        /// Ask "play again?" after this frame is painted
        prompt_pending: bool,
    }

    impl Game {
        fn new(state: GameState, surface: CanvasSurface) -> Self {
            Self {
                state,
                surface,
                last_outcome: TickOutcome::Advanced,
                prompt_pending: false,
            }
        }

        /// Run one simulation tick and react to its events
        fn update(&mut self) {
            self.last_outcome = tick(&mut self.state);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Collision { score } => {
                        log::info!("Game over with {} points", score);
                        self.prompt_pending = true;
                    }
                    GameEvent::PointScored { score } => log::debug!("Score: {}", score),
                    GameEvent::Restarted { high_score } => {
                        log::info!("New round (high score {})", high_score)
                    }
                    GameEvent::Resized { width, height } => {
                        log::info!("Field regenerated for {}x{}", width, height)
                    }
                }
            }
        }

        fn render(&mut self) {
            draw_frame(&mut self.surface, &self.state);
        }

        /// Update score elements in DOM (skipped on collision frames)
        fn update_hud(&self) {
            if self.last_outcome != TickOutcome::Advanced {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let (current, high) = score_text(&self.state);
            if let Some(el) = document.get_element_by_id("currentScore") {
                el.set_text_content(Some(&current));
            }
            if let Some(el) = document.get_element_by_id("highScore") {
                el.set_text_content(Some(&high));
            }
        }

        /// Ask once; a declined prompt stays latched until Enter is pressed
        fn ask_restart(&mut self) {
            self.prompt_pending = false;
            let Some(window) = web_sys::window() else {
                return;
            };
            let message = format!(
                "You scored {} points! Wanna try again?",
                self.state.score
            );
            let accepted = window.confirm_with_message(&message).unwrap_or(false);
            if !accepted {
                log::info!("Restart declined; press Enter to be asked again");
                return;
            }
            if let Err(e) = self.state.resolve_prompt(true) {
                log::error!("Restart failed: {}", e);
            }
        }

        fn toggle_distances(&mut self) {
            let show = &mut self.state.settings.show_collision_distances;
            *show = !*show;
            log::info!("Collision distances: {}", *show);
        }
    }

    fn window_size(window: &web_sys::Window) -> Result<(f64, f64), JsValue> {
        let w = window.inner_width()?.as_f64().unwrap_or(800.0);
        let h = window.inner_height()?.as_f64().unwrap_or(600.0);
        Ok((w, h))
    }

    fn load_settings(window: &web_sys::Window) -> Settings {
        let mut settings = Settings::default();
        let query = window.location().search().unwrap_or_default();
        if let Err(e) = settings.apply_query(&query) {
            log::warn!("Bad settings in URL ({}), using defaults", e);
            settings = Settings::default();
        }
        settings
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Circle Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = window_size(&window)?;
        let mut surface = CanvasSurface::new(canvas)?;
        surface.resize(width as u32, height as u32);

        let settings = load_settings(&window);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = GameState::new(settings, seed, width as f32, height as f32).map_err(|e| {
            log::error!("Could not start game: {}", e);
            JsValue::from_str(&e.to_string())
        })?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(state, surface)));

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());
        setup_debug_button(game.clone());

        request_animation_frame(game);

        log::info!("Circle Dodge running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(direction) = Direction::from_key(&key) {
                    set_intent(&mut g.state, direction, true);
                    return;
                }
                match key.as_str() {
                    "Enter" if g.state.is_game_over() => g.prompt_pending = true,
                    "d" | "D" => g.toggle_distances(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    set_intent(&mut game.borrow_mut().state, direction, false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = match window_size(&window) {
                Ok(size) => size,
                Err(e) => {
                    log::warn!("Could not read window size: {:?}", e);
                    return;
                }
            };
            let mut g = game.borrow_mut();
            g.surface.resize(width as u32, height as u32);
            if let Err(e) = g.state.resize(width as f32, height as f32) {
                log::error!("Resize failed, keeping previous field: {}", e);
            }
            g.prompt_pending = false;
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_debug_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("btnShowDistances") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().toggle_distances();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
            if g.prompt_pending {
                g.ask_restart();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use circle_dodge::Settings;
    use circle_dodge::renderer::{RecordingSurface, draw_frame, score_text};
    use circle_dodge::sim::{GameState, TickOutcome, tick};

    // Headless rounds stop here if the player survives
    const MAX_TICKS: u64 = 100_000;

    env_logger::init();

    log::info!("Circle Dodge (native) starting...");
    log::info!("Native mode runs a headless round - use `trunk serve` for the web version");

    // Optional overrides in URL query form, e.g. `enemies=20&seed=7`
    let mut settings = Settings::default();
    if let Some(query) = std::env::args().nth(1) {
        if let Err(e) = settings.apply_query(&query) {
            log::error!("Invalid settings: {}", e);
            std::process::exit(2);
        }
    }

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut state = match GameState::new(settings, seed, 1920.0, 1080.0) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Could not start game: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut surface = RecordingSurface::default();
    while state.time_ticks < MAX_TICKS {
        let outcome = tick(&mut state);
        draw_frame(&mut surface, &state);
        if outcome == TickOutcome::Collided {
            break;
        }
    }

    let (current, _) = score_text(&state);
    println!(
        "{} after {} ticks ({} draw calls in last frame)",
        current,
        state.time_ticks,
        surface.commands.len()
    );
}
