//! Pong entry point
//!
//! The web build drives the simulation from requestAnimationFrame and draws it
//! with WebGPU. The native build runs an unattended match headlessly and
//! prints the final snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use pong::consts::*;
    use pong::renderer::{RenderState, scene};
    use pong::settings::{KeyAction, Settings};
    use pong::sim::{GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// Held keys; `restart` is one-shot and cleared after each tick
        input: TickInput,
        hud_dirty: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                hud_dirty: true,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Apply a key transition. Returns true if the key is bound.
        fn set_key(&mut self, code: &str, pressed: bool) -> bool {
            let Some(action) = self.settings.keys.action_for(code) else {
                return false;
            };
            match action {
                KeyAction::LeftUp => self.input.left_up = pressed,
                KeyAction::LeftDown => self.input.left_down = pressed,
                KeyAction::RightUp => self.input.right_up = pressed,
                KeyAction::RightDown => self.input.right_down = pressed,
                KeyAction::Restart => {
                    if pressed {
                        self.input.restart = true;
                    }
                }
            }
            true
        }

        /// Forget held keys when the page stops receiving key events
        fn release_keys(&mut self, reason: &str) {
            if self.input != TickInput::default() {
                log::info!("Released held keys ({})", reason);
            }
            self.input.release_held();
            self.hud_dirty = true;
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = tick(&mut self.state, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                self.input.restart = false;

                if events.iter().any(|e| !matches!(e, GameEvent::PaddleHit { .. })) {
                    self.hud_dirty = true;
                }
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog instead of fast-forwarding
                self.accumulator = 0.0;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene(&self.state.snapshot(), &self.settings.palette);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }

            if !self.hud_dirty {
                return;
            }
            self.hud_dirty = false;

            let snapshot = self.state.snapshot();

            if let Some(el) = document.get_element_by_id("score-left") {
                el.set_text_content(Some(&snapshot.left_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("score-right") {
                el.set_text_content(Some(&snapshot.right_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match snapshot.winner.filter(|_| snapshot.game_over) {
                    Some(winner) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(text) = document.get_element_by_id("winner-text") {
                            text.set_text_content(Some(&format!("{} Wins!", winner.label())));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        if settings.show_fps {
            if let Some(el) = document.get_element_by_id("fps") {
                let _ = el.set_attribute("class", "");
            }
        }

        let seed = js_sys::Date::now() as u64;
        let background = settings.palette.background;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, background).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_focus_handlers(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Pong running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().set_key(&event.code(), true) {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.code(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().release_keys("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().release_keys("window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Seed used when none is given on the command line
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 0x5eed;

/// Ten minutes of play at the fixed tick rate
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_TICKS: u64 = 10 * 60 * pong::consts::TICK_RATE as u64;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pong::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {:?}, using default", arg);
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };
    log::info!("Pong (native, headless) starting with seed {}", seed);

    let mut state = GameState::new(seed);
    let input = TickInput::default();
    let mut paddle_hits = 0u32;

    while !state.is_game_over() && state.time_ticks < MAX_HEADLESS_TICKS {
        for event in tick(&mut state, &input) {
            if let GameEvent::PaddleHit { .. } = event {
                paddle_hits += 1;
            }
        }
    }

    if state.is_game_over() {
        log::info!(
            "Match finished after {} ticks ({} paddle hits)",
            state.time_ticks,
            paddle_hits
        );
    } else {
        log::warn!("Stopped after {} ticks without a winner", state.time_ticks);
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
