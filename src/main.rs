//! Wall Wheel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use wall_wheel::consts::*;
    use wall_wheel::persistence::{LocalStore, MemoryStore};
    use wall_wheel::platform::{self, BrowserNavigator};
    use wall_wheel::renderer::vertex::css_color;
    use wall_wheel::renderer::{DrawCommand, RenderError, RenderState};
    use wall_wheel::{FrameOutcome, Game, Tuning};

    /// Game session plus its GPU output
    struct App {
        game: Game,
        render_state: Option<RenderState>,
    }

    impl App {
        /// Draw a scene, falling back to HUD-only when WebGPU is missing
        fn render(&mut self, commands: &[DrawCommand]) {
            let Some(render_state) = self.render_state.as_mut() else {
                let texts: Vec<&DrawCommand> = commands
                    .iter()
                    .filter(|c| matches!(c, DrawCommand::Text { .. }))
                    .collect();
                update_hud(&texts);
                return;
            };

            match render_state.render(commands) {
                Ok(texts) => update_hud(&texts),
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    /// Write text commands into the DOM HUD
    fn update_hud(texts: &[&DrawCommand]) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(el) = document.get_element_by_id("hud-score") else {
            return;
        };
        for command in texts {
            if let DrawCommand::Text {
                text, size, color, ..
            } = command
            {
                if el.text_content().as_deref() != Some(text.as_str()) {
                    el.set_text_content(Some(text));
                }
                let style = format!("color: {}; font-size: {}px", css_color(*color), size);
                let _ = el.set_attribute("style", &style);
            }
        }
    }

    /// Show/hide the pause menu
    fn update_pause_menu(paused: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("pause-menu") {
            let class = if paused { "" } else { "hidden" };
            if el.get_attribute("class").as_deref() != Some(class) {
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Register an event listener, logging failures
    fn listen(target: &EventTarget, event: &str, callback: &js_sys::Function) {
        if let Err(e) = target.add_event_listener_with_callback(event, callback) {
            log::error!("Failed to register {} listener: {:?}", event, e);
        }
    }

    /// Persist the score and leave for the results page
    fn end_game(score: u32) {
        let mut navigator = BrowserNavigator;
        match LocalStore::open() {
            Ok(mut store) => platform::end_session(&mut store, &mut navigator, score),
            Err(e) => {
                log::warn!("{}; score will not be shown", e);
                platform::end_session(&mut MemoryStore::new(), &mut navigator, score);
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Wall Wheel starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = match canvas.client_width() {
            0 => PLAY_WIDTH as i32,
            w => w,
        };
        let client_h = match canvas.client_height() {
            0 => PLAY_HEIGHT as i32,
            h => h,
        };
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = match LocalStore::open() {
            Ok(store) => Tuning::load(&store),
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(seed, tuning) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        let app = Rc::new(RefCell::new(App {
            game,
            render_state: None,
        }));

        match init_renderer(&canvas, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable, HUD only: {}", e),
        }

        setup_input_handlers(&window, app.clone());
        setup_pause_menu(app.clone());
        setup_auto_pause(app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Wall Wheel running!");
    }

    /// True when the event hit one of the HUD buttons rather than the play area
    fn targets_button(event: &PointerEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("button").ok().flatten())
            .is_some()
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        // Pointer down on the whole window (mouse, touch and pen alike), so taps
        // landing on the pause overlay still reach the game
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if targets_button(&event) {
                    return;
                }
                event.prevent_default();
                let intent = app.borrow_mut().game.pointer_down(platform::now_ms());
                log::debug!("Tap: {:?}", intent);
            });
            listen(window, "pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "Escape" | "p" | "P" => app.borrow_mut().game.toggle_pause(),
                    _ => {}
                }
            });
            listen(window, "keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let outcome = a.game.frame(time);
            update_pause_menu(a.game.is_paused());

            match outcome {
                FrameOutcome::Draw(commands) => a.render(&commands),
                FrameOutcome::GameOver { score, cause } => {
                    log::info!("Run over ({:?}), final score {}", cause, score);
                    end_game(score);
                }
                FrameOutcome::Idle => {}
            }
        }

        // The loop keeps ticking while paused; frames are simply idle
        request_animation_frame(app);
    }

    fn setup_pause_menu(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Pause button
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.pause();
            });
            listen(&btn, "click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resume button
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.resume();
            });
            listen(&btn, "click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            listen(&document, "visibilitychange", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.pause();
                log::info!("Auto-paused (window blur)");
            });
            listen(&window, "blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wall Wheel (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let score = headless::run(seed);
    println!("Headless session (seed {}) ended with score {}", seed, score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session for smoke-testing the simulation without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use wall_wheel::consts::PLAY_HEIGHT;
    use wall_wheel::persistence::{MemoryStore, load_last_score};
    use wall_wheel::platform::{LogNavigator, end_session};
    use wall_wheel::sim::GameState;
    use wall_wheel::{FrameOutcome, Game, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of 60 Hz frames
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    /// Hop whenever the wheel sinks into the lower third
    fn wants_tap(state: &GameState, tuning: &Tuning, time: f64) -> bool {
        let sinking = state.wheel.vy > 0.0 && state.wheel.y > PLAY_HEIGHT * 0.65;
        let spaced = state
            .last_tap_ms
            .is_none_or(|last| time - last >= tuning.double_tap_ms);
        sinking && spaced
    }

    pub fn run(seed: u64) -> u32 {
        let mut store = MemoryStore::new();
        let tuning = Tuning::load(&store);
        let mut game = match Game::new(seed, tuning) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return 0;
            }
        };
        let mut navigator = LogNavigator::default();

        for frame in 0..MAX_FRAMES {
            let time = frame as f64 * FRAME_MS;
            if wants_tap(game.state(), game.tuning(), time) {
                game.pointer_down(time);
            }
            if let FrameOutcome::GameOver { score, cause } = game.frame(time) {
                log::info!("Run over ({:?}) after {} frames", cause, frame + 1);
                end_session(&mut store, &mut navigator, score);
                return load_last_score(&store).unwrap_or(score);
            }
        }

        log::info!("Session still alive after {} frames", MAX_FRAMES);
        game.state().score
    }
}
