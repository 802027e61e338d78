//! Breakout entry point
//!
//! The web build drives the simulation from `requestAnimationFrame`; the
//! native build is a headless command-line runner.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use breakout::Config;
    use breakout::platform::{FrameClock, InputState, KeyBindings};
    use breakout::renderer::{RenderState, build_scene, score_label, status_label};
    use breakout::sim::{Autopilot, GameEvent, TickInput, World, tick};

    /// Game instance holding all state
    struct Game {
        config: Config,
        world: World,
        input: InputState,
        clock: FrameClock,
        render_state: Option<RenderState>,
        /// Set by `?demo` in the page URL
        autopilot: Option<Autopilot>,
        last_score: Option<u64>,
        last_game_over: Option<bool>,
    }

    impl Game {
        fn new(config: Config, demo: bool) -> Self {
            Self {
                world: World::new(&config),
                config,
                input: InputState::new(KeyBindings::default()),
                clock: FrameClock::default(),
                render_state: None,
                autopilot: demo.then(Autopilot::default),
                last_score: None,
                last_game_over: None,
            }
        }

        /// Step the simulation once for this animation frame
        fn update(&mut self, time: f64) {
            let dt = self.clock.tick(time);

            let mut input = self.input.snapshot();
            if let Some(pilot) = self.autopilot.as_mut() {
                let steer = pilot.next_input(&self.world, &self.config);
                input = TickInput {
                    left: steer.left,
                    right: steer.right,
                    reset: input.reset,
                };
            }

            tick(&mut self.world, &input, &self.config, dt);
            self.input.end_frame();

            for event in self.world.drain_events() {
                match event {
                    GameEvent::StageCleared { stage } => {
                        log::info!("Stage {} reached", stage)
                    }
                    GameEvent::GameOver => log::info!("Game over"),
                    GameEvent::Restarted => log::info!("Restarted"),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.world, &self.config);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM, touching them only on change
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.world.state;

            if self.last_score != Some(state.score) {
                if let Some(el) = document.get_element_by_id("hud-score") {
                    el.set_text_content(Some(&score_label(state)));
                }
                self.last_score = Some(state.score);
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if let Some(fps) = self.clock.fps() {
                    el.set_text_content(Some(&format!("{} fps", fps)));
                }
            }

            if self.last_game_over != Some(state.game_over) {
                if let Some(el) = document.get_element_by_id("game-over") {
                    match status_label(state) {
                        Some(text) => {
                            el.set_text_content(Some(text));
                            let _ = el.set_attribute("class", "");
                        }
                        None => {
                            let _ = el.set_attribute("class", "hidden");
                        }
                    }
                }
                self.last_game_over = Some(state.game_over);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = Config::default();

        // Backing store follows the device pixel ratio; the game keeps its
        // own coordinate space
        let dpr = window.device_pixel_ratio();
        let width = (config.screen_width as f64 * dpr) as u32;
        let height = (config.screen_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let demo = window
            .location()
            .search()
            .map(|s| s.contains("demo"))
            .unwrap_or(false);
        let screen_size = (config.screen_width, config.screen_height);
        let game = Rc::new(RefCell::new(Game::new(config, demo)));
        if demo {
            log::info!("Demo mode: autopilot drives the paddle");
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, screen_size)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Breakout running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down: held set plus one-shot reset edge
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if game.borrow_mut().input.key_down(&event.key()).is_some() {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Hidden tab: rAF stops, so drop held keys and the stale timestamp
        if let Some(document) = window.document() {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.input.release_all();
                    g.clock.reset();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur: key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.release_all();
                g.clock.reset();
                log::info!("Input released (window blur)");
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use breakout::consts::NOMINAL_DT;
    use breakout::headless::{self, RunOptions};
    use breakout::{BlockBounce, Config, StageAdvance, StageSpeedup};

    #[derive(Parser, Debug)]
    #[command(name = "breakout")]
    #[command(about = "Headless breakout runner: the autopilot plays until game over or the frame limit")]
    pub struct Cli {
        /// JSON config file; missing fields keep their defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Maximum frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value_t = NOMINAL_DT)]
        dt: f32,
        /// disabled | when_cleared
        #[arg(long)]
        stage_advance: Option<StageAdvance>,
        /// literal | penetration_axis
        #[arg(long)]
        block_bounce: Option<BlockBounce>,
        /// signed | magnitude
        #[arg(long)]
        stage_speedup: Option<StageSpeedup>,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let mut config = match &cli.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(mode) = cli.stage_advance {
            config.stage_advance = mode;
        }
        if let Some(mode) = cli.block_bounce {
            config.block_bounce = mode;
        }
        if let Some(mode) = cli.stage_speedup {
            config.stage_speedup_mode = mode;
        }

        let options = RunOptions {
            frames: cli.frames,
            dt: cli.dt,
        };
        let summary = headless::run(&config, &options).context("headless run failed")?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!(
                "frames: {}  score: {}  stage: {}  blocks: {}  paddle hits: {}  game over: {}",
                summary.frames,
                summary.score,
                summary.stage,
                summary.blocks_destroyed,
                summary.paddle_hits,
                summary.game_over
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
