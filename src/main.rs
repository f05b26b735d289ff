//! Gap Glider entry point
//!
//! Web: WebGPU canvas, DOM prompts and `requestAnimationFrame` ticks.
//! Native: a headless autopilot run that logs its result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use gap_glider::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
    use gap_glider::platform::web::{FrameCallback, RafClock};
    use gap_glider::renderer::{RenderState, VertexBatch};
    use gap_glider::sim::Surface;
    use gap_glider::{Error, Game, Result, Settings, Tuning, View};

    const HIDDEN: &str = "hidden";

    /// Score text and prompt screens in the page
    struct DomView {
        document: Document,
    }

    impl DomView {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            let Some(el) = self.document.get_element_by_id(id) else {
                return;
            };
            let classes = el.class_list();
            let result = if visible {
                classes.remove_1(HIDDEN)
            } else {
                classes.add_1(HIDDEN)
            };
            if let Err(e) = result {
                log::warn!("Could not toggle #{}: {:?}", id, e);
            }
        }
    }

    impl View for DomView {
        fn show_score(&mut self, score: u32) {
            self.set_text("scoreDisplay", &format!("Score: {}", score));
        }

        fn show_final_score(&mut self, score: u32) {
            self.set_text("finalScore", &score.to_string());
        }

        fn set_start_visible(&mut self, visible: bool) {
            self.set_visible("startScreen", visible);
        }

        fn set_game_over_visible(&mut self, visible: bool) {
            self.set_visible("gameOver", visible);
        }
    }

    /// Game plus its GPU output
    struct App {
        game: Game<DomView, RafClock>,
        render_state: RenderState,
        batch: VertexBatch,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.game.frame(time, &mut self.batch);
            match self.render_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub async fn run() -> Result<()> {
        log::info!("Gap Glider starting...");

        let window = web_sys::window().ok_or(Error::Host("no window"))?;
        let document = window.document().ok_or(Error::Host("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or(Error::Host("no #gameCanvas element"))?
            .dyn_into()
            .map_err(|_| Error::Host("#gameCanvas is not a canvas"))?;

        // Logical surface is read once; the backing store is scaled by DPR
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let client = Surface::new(client_w as f32, client_h as f32);
        let logical = if Tuning::default().validate_for(client).is_ok() {
            client
        } else {
            log::warn!("Canvas {}x{} is too small, using default surface", client_w, client_h);
            Surface::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
        };
        let dpr = window.device_pixel_ratio();
        let width = (logical.width as f64 * dpr) as u32;
        let height = (logical.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load().fit_to(logical);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, logical).await?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let game = Game::new(
            logical,
            settings.tuning,
            seed,
            DomView {
                document: document.clone(),
            },
            RafClock::new(callback.clone()),
        );
        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            batch: VertexBatch::new(),
        }));

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                app.borrow_mut().frame(time);
            }));
        }

        setup_input_handlers(&document, &canvas, app);

        log::info!("Gap Glider ready (seed {})", seed);
        Ok(())
    }

    fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::error!("Could not listen for {}: {:?}", event, e);
        }
        closure.forget();
    }

    fn setup_input_handlers(document: &Document, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer press on the canvas
        {
            let app = app.clone();
            listen(canvas, "pointerdown", move |_event: PointerEvent| {
                app.borrow_mut().game.jump();
            });
        }

        // Space bar
        {
            let app = app.clone();
            listen(document, "keydown", move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    app.borrow_mut().game.jump();
                }
            });
        }

        // Start and restart buttons both begin a fresh run
        for id in ["startBtn", "restartBtn"] {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Missing #{}", id);
                continue;
            };
            let app = app.clone();
            listen(&button, "click", move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.start(now_ms());
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }
    if let Err(e) = wasm_game::run().await {
        log::error!("Gap Glider failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use gap_glider::consts::FRAME_MS;
    use gap_glider::platform::headless::ManualClock;
    use gap_glider::renderer::VertexBatch;
    use gap_glider::sim::{Surface, autopilot};
    use gap_glider::{Game, Settings, View};

    /// Two minutes at 60 Hz
    const MAX_FRAMES: u64 = 60 * 120;

    /// View that reports through the log
    #[derive(Default)]
    struct LogView;

    impl View for LogView {
        fn show_score(&mut self, score: u32) {
            log::debug!("Score: {}", score);
        }

        fn show_final_score(&mut self, score: u32) {
            log::info!("Final score: {}", score);
        }

        fn set_start_visible(&mut self, visible: bool) {
            log::debug!("Start screen visible: {}", visible);
        }

        fn set_game_over_visible(&mut self, visible: bool) {
            log::debug!("Game over screen visible: {}", visible);
        }
    }

    pub fn run() {
        let surface = Surface::default();
        let settings = Settings::load().fit_to(surface);
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        let mut game = Game::new(
            surface,
            settings.tuning,
            seed,
            LogView,
            ManualClock::default(),
        );
        let mut batch = VertexBatch::new();
        let mut now = 0.0;
        let mut frames = 0;

        game.start(now);
        while frames < MAX_FRAMES && game.clock_mut().take_tick() {
            if autopilot::should_jump(game.state()) {
                game.jump();
            }
            now += FRAME_MS;
            game.frame(now, &mut batch);
            frames += 1;
        }

        let state = game.state();
        match state.end_reason {
            Some(reason) => log::info!(
                "Autopilot crashed ({:?}) after {} steps with score {} (seed {})",
                reason,
                state.time_ticks,
                state.score,
                seed
            ),
            None => log::info!(
                "Autopilot survived {} steps with score {} (seed {})",
                state.time_ticks,
                state.score,
                seed
            ),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gap Glider (native) starting headless autopilot run...");
    log::info!("Build for wasm32 to play in the browser");
    headless::run();
}
