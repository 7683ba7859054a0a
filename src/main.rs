//! Emoji Meadow entry point
//!
//! On the web: builds the canvas, wires input and runs the frame loop.
//! Natively: plays seeded headless sessions of every game and logs results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Result, anyhow};
    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use emoji_meadow::input::{Key, SwipeTracker};
    use emoji_meadow::renderer::CanvasSurface;
    use emoji_meadow::{FrameControl, Game, GameKind, InputEvent, Settings, Tuning};

    const CANVAS_ID: &str = "canvas";
    const MAX_CANVAS_CSS_PX: f64 = 600.0;

    /// Page-level state for one game instance
    struct App {
        game: Box<dyn Game>,
        surface: CanvasSurface,
        swipe: SwipeTracker,
        window: Window,
        /// Pending requestAnimationFrame id
        frame_handle: Option<i32>,
    }

    impl App {
        fn redraw(&mut self) {
            self.game.draw(&mut self.surface);
        }

        /// Route one input; grid games redraw and may raise a modal
        fn dispatch(&mut self, event: InputEvent) {
            let notice = self.game.handle(event);
            if !self.game.is_continuous() {
                self.redraw();
            }
            if let Some(notice) = notice {
                if let Err(e) = self.window.alert_with_message(&notice.message()) {
                    log::warn!("alert failed: {e:?}");
                }
            }
        }

        /// Stop the loop and drop any scheduled frame
        fn halt(&mut self) {
            self.game.stop();
            if let Some(handle) = self.frame_handle.take() {
                let _ = self.window.cancel_animation_frame(handle);
            }
            log::info!("Frame loop stopped");
        }
    }

    pub fn run() -> Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("Window not found"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("No Document Found"))?;

        let query = window.location().search().unwrap_or_default();
        let kind = GameKind::from_query(&query).unwrap_or_default();

        let tuning = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();

        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(1024.0);
        let has_touch = window.navigator().max_touch_points() > 0;
        let settings = Settings::for_viewport(viewport_width as f32, has_touch);
        let swipe = SwipeTracker::new(settings.swipe_min_px);

        let seed = js_sys::Date::now() as u64;
        let game = kind.build(&tuning, settings, seed);

        let canvas = create_canvas(&document, game.canvas_size())?;
        fit_canvas(&window, &canvas);
        let surface = CanvasSurface::new(&canvas)?;

        let continuous = game.is_continuous();
        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            swipe,
            window: window.clone(),
            frame_handle: None,
        }));
        app.borrow_mut().redraw();

        setup_keyboard(&window, app.clone())?;
        setup_pointer(&canvas, app.clone())?;
        setup_resize(&window, canvas.clone())?;

        if continuous {
            setup_pagehide(&window, app.clone())?;
            request_animation_frame(app);
        }

        log::info!("Emoji Meadow running: {}", kind.as_str());
        Ok(())
    }

    /// Create the game canvas after `.game-info`, or at the end of `<body>`
    fn create_canvas(document: &Document, (width, height): (f32, f32)) -> Result<HtmlCanvasElement> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow!("Could not create canvas: {e:#?}"))?
            .dyn_into()
            .map_err(|element| anyhow!("Error converting {element:#?} to HtmlCanvasElement"))?;
        canvas.set_id(CANVAS_ID);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let info = document.query_selector(".game-info").ok().flatten();
        match info.as_ref().and_then(|el| el.parent_node().map(|p| (el, p))) {
            Some((info, parent)) => {
                log::info!("Inserting canvas after .game-info");
                parent
                    .insert_before(&canvas, info.next_sibling().as_ref())
                    .map_err(|e| anyhow!("Could not insert canvas: {e:#?}"))?;
            }
            None => {
                log::info!(".game-info not found, appending canvas to body");
                document
                    .body()
                    .ok_or_else(|| anyhow!("No body element"))?
                    .append_child(&canvas)
                    .map_err(|e| anyhow!("Could not append canvas: {e:#?}"))?;
            }
        }
        Ok(canvas)
    }

    /// Scale the canvas CSS size to the viewport, keeping its aspect ratio
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) {
        let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let max_w = (inner(window.inner_width()) - 20.0).min(MAX_CANVAS_CSS_PX);
        let max_h = (inner(window.inner_height()) * 0.7).min(MAX_CANVAS_CSS_PX);
        let (w, h) = (canvas.width() as f64, canvas.height() as f64);
        let scale = (max_w / w).min(max_h / h).max(0.1);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", w * scale));
        let _ = style.set_property("height", &format!("{}px", h * scale));
    }

    /// Client coordinates to canvas pixels
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 { canvas.width() as f64 / rect.width() } else { 1.0 };
        let sy = if rect.height() > 0.0 { canvas.height() as f64 / rect.height() } else { 1.0 };
        Vec2::new(
            ((client_x as f64 - rect.left()) * sx) as f32,
            ((client_y as f64 - rect.top()) * sy) as f32,
        )
    }

    fn setup_keyboard(window: &Window, app: Rc<RefCell<App>>) -> Result<()> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    // Arrows and space would scroll the page
                    event.prevent_default();
                    app.borrow_mut().dispatch(InputEvent::KeyDown(key));
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("keydown listener: {e:#?}"))?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    app.borrow_mut().dispatch(InputEvent::KeyUp(key));
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("keyup listener: {e:#?}"))?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<()> {
        let listen = |name: &str, closure: &JsValue| {
            canvas
                .add_event_listener_with_callback(name, closure.unchecked_ref())
                .map_err(|e| anyhow!("{name} listener: {e:#?}"))
        };

        // Touch start: begin swipe, steer continuous games
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    let mut a = app.borrow_mut();
                    a.swipe.begin(pos.x, pos.y);
                    if a.game.is_continuous() {
                        a.dispatch(InputEvent::Pointer(pos));
                    }
                }
            });
            listen("touchstart", closure.as_ref())?;
            closure.forget();
        }

        // Touch move: keep the page still, follow the finger
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    if a.game.is_continuous() {
                        let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                        a.dispatch(InputEvent::Pointer(pos));
                    }
                }
            });
            listen("touchmove", closure.as_ref())?;
            closure.forget();
        }

        // Touch end: decode swipe
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let Some(touch) = event.changed_touches().get(0) {
                    let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    if let Some(direction) = a.swipe.end(pos.x, pos.y) {
                        log::debug!("Swipe detected: {}", direction.as_str());
                        a.dispatch(InputEvent::Swipe(direction));
                    }
                }
                a.dispatch(InputEvent::PointerUp);
            });
            listen("touchend", closure.as_ref())?;
            closure.forget();
        }

        // Mouse down: desktop stand-in for touch
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                let mut a = app.borrow_mut();
                a.swipe.begin(pos.x, pos.y);
                if a.game.is_continuous() {
                    a.dispatch(InputEvent::Pointer(pos));
                }
            });
            listen("mousedown", closure.as_ref())?;
            closure.forget();
        }

        // Mouse up: decode swipe
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                let mut a = app.borrow_mut();
                if let Some(direction) = a.swipe.end(pos.x, pos.y) {
                    log::debug!("Mouse swipe detected: {}", direction.as_str());
                    a.dispatch(InputEvent::Swipe(direction));
                }
                a.dispatch(InputEvent::PointerUp);
            });
            listen("mouseup", closure.as_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(window: &Window, canvas: HtmlCanvasElement) -> Result<()> {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&window_clone, &canvas);
        });
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("resize listener: {e:#?}"))?;
        closure.forget();
        Ok(())
    }

    /// Cancel the frame loop when the page goes away
    fn setup_pagehide(window: &Window, app: Rc<RefCell<App>>) -> Result<()> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PageTransitionEvent| {
            app.borrow_mut().halt();
        });
        window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("pagehide listener: {e:#?}"))?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = app.borrow().window.clone();
        let app_clone = app.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app_clone);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let control = {
            let mut a = app.borrow_mut();
            a.frame_handle = None;
            let control = a.game.frame();
            if control == FrameControl::Continue {
                a.redraw();
            }
            control
        };

        if control == FrameControl::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Emoji Meadow starting...");
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {e:#}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use emoji_meadow::input::Key;
    use emoji_meadow::renderer::RecordingSurface;
    use emoji_meadow::{FrameControl, GameKind, InputEvent, Settings, Tuning};

    const MAX_MOVES: usize = 400;
    const MAX_FRAMES: usize = 3600;
    /// Frames between steering changes in continuous games
    const STEER_EVERY: usize = 45;
    const KEYS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    /// Play one scripted session and log how it went
    pub fn play(kind: GameKind, tuning: &Tuning, seed: u64) {
        let mut game = kind.build(tuning, Settings::default(), seed);
        // Separate stream so the script does not perturb the game's RNG
        let mut script = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let mut held: Option<Key> = None;

        if game.is_continuous() {
            for frame in 0..MAX_FRAMES {
                if frame % STEER_EVERY == 0 {
                    if let Some(key) = held.take() {
                        game.handle(InputEvent::KeyUp(key));
                    }
                    let key = KEYS[script.random_range(0..KEYS.len())];
                    game.handle(InputEvent::KeyDown(key));
                    held = Some(key);
                }
                if game.frame() == FrameControl::Stop || game.is_over() {
                    break;
                }
            }
        } else {
            for _ in 0..MAX_MOVES {
                let key = KEYS[script.random_range(0..KEYS.len())];
                if let Some(notice) = game.handle(InputEvent::KeyDown(key)) {
                    log::info!("{}: {}", kind.as_str(), notice.message());
                    break;
                }
            }
        }
        game.stop();

        let mut surface = RecordingSurface::new();
        game.draw(&mut surface);
        log::info!(
            "{}: score {}, over: {}, final frame {} draw calls",
            kind.as_str(),
            game.score(),
            game.is_over(),
            surface.calls.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("Emoji Meadow (native) starting with seed {seed}");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    let tuning = emoji_meadow::Tuning::default();
    for kind in emoji_meadow::GameKind::ALL {
        headless::play(kind, &tuning, seed);
    }
}
