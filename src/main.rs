//! Canvas Arcade entry point
//!
//! Browser: canvas 2D surface, sprite loading, keyboard, HUD text, and the
//! requestAnimationFrame loop. Native: a headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
    };

    use canvas_arcade::game::Arcade;
    use canvas_arcade::renderer::{Color, Sprite, Surface, palette};
    use canvas_arcade::sim::{Action, InputSampler, Rect};
    use canvas_arcade::{FrameToken, GameKind, Hud, LoopDriver, Settings};

    const ASSET_DIR: &str = "assets";

    /// The page's 2D canvas
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        images: HashMap<Sprite, HtmlImageElement>,
        size: Vec2,
    }

    impl Surface for CanvasSurface {
        fn size(&self) -> Vec2 {
            self.size
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ctx.set_fill_style_str(&palette::css(color));
            self.ctx.fill_rect(
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }

        fn blit(&mut self, sprite: Sprite, rect: Rect) {
            match self.images.get(&sprite) {
                Some(img) if img.complete() && img.natural_width() > 0 => {
                    let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                // Never loaded (timeout or 404): keep the entity visible
                _ => self.fill_rect(rect, palette::fallback(sprite)),
            }
        }
    }

    struct App {
        driver: LoopDriver<Arcade>,
        input: InputSampler,
        surface: CanvasSurface,
    }

    type Shared = Rc<RefCell<App>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Settings from the canvas `data-settings` JSON, then the `?game=` query
    fn read_settings(canvas: &HtmlCanvasElement) -> Settings {
        let json = canvas.get_attribute("data-settings");
        let mut settings = Settings::from_json_or_default(json.as_deref());

        let requested = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("game"));
        if let Some(name) = requested {
            match GameKind::from_name(&name) {
                Some(kind) => settings.game = kind,
                None => log::warn!("Unknown game '{name}', using {:?}", settings.game),
            }
        }
        settings
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Canvas Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = read_settings(&canvas);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Arcade::new(&settings, seed);
        let size = game.playfield();
        canvas.set_width(size.x as u32);
        canvas.set_height(size.y as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let sprites = game.sprites();
        let (images, all_loaded) = load_images(&sprites)?;
        log::info!(
            "{:?} initialized with seed {seed}, loading {} sprites",
            game.kind(),
            sprites.len()
        );

        let app: Shared = Rc::new(RefCell::new(App {
            driver: LoopDriver::new(game),
            input: InputSampler::new(),
            surface: CanvasSurface { ctx, images, size },
        }));

        setup_input_handlers(app.clone())?;
        setup_restart_button(app.clone());
        update_hud(&app.borrow().driver.hud());

        // Ready signal
        {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(all_loaded).await {
                    Ok(_) => start_loop(&app, LoopDriver::assets_ready),
                    Err(e) => log::warn!("Sprite failed to load: {e:?}"),
                }
            });
        }

        // Timeout fallback
        {
            let app = app.clone();
            let closure = Closure::once(move || start_loop(&app, LoopDriver::assets_timed_out));
            window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                settings.asset_timeout_ms as i32,
            )?;
            closure.forget();
        }

        Ok(())
    }

    /// Create image elements and one promise resolving when all have decoded
    fn load_images(
        sprites: &[Sprite],
    ) -> Result<(HashMap<Sprite, HtmlImageElement>, js_sys::Promise), JsValue> {
        let pending = js_sys::Array::new();
        let mut images = HashMap::new();
        for &sprite in sprites {
            let img = HtmlImageElement::new()?;
            img.set_src(&format!("{ASSET_DIR}/{}", sprite.file_name()));
            pending.push(&img.decode());
            images.insert(sprite, img);
        }
        Ok((images, js_sys::Promise::all(&pending)))
    }

    fn start_loop(app: &Shared, signal: fn(&mut LoopDriver<Arcade>) -> Option<FrameToken>) {
        let token = signal(&mut app.borrow_mut().driver);
        if let Some(token) = token {
            if let Some(el) = document().and_then(|d| d.get_element_by_id("loading")) {
                let _ = el.class_list().add_1("hidden");
            }
            schedule(app.clone(), token);
        }
    }

    fn schedule(app: Shared, token: FrameToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| on_frame(app, token, time));
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
            return;
        }
        closure.forget();
    }

    fn on_frame(app: Shared, token: FrameToken, time: f64) {
        let next = {
            let mut guard = app.borrow_mut();
            let App {
                driver,
                input,
                surface,
            } = &mut *guard;
            let next = driver.frame(token, time, input, surface);
            update_hud(&driver.hud());
            next
        };
        if let Some(next) = next {
            schedule(app, next);
        }
    }

    fn setup_input_handlers(app: Shared) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    event.prevent_default();
                    app.borrow_mut().input.press(action);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    app.borrow_mut().input.release(action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(app: Shared) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("restart-btn")) else {
            log::warn!("No restart button on the page");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            let token = {
                let mut g = app.borrow_mut();
                g.input.clear();
                let token = g.driver.restart(seed);
                update_hud(&g.driver.hud());
                token
            };
            if let Some(token) = token {
                schedule(app.clone(), token);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Write the HUD snapshot into the page
    fn update_hud(hud: &Hud) {
        let Some(document) = document() else {
            return;
        };

        set_text(&document, "score", &hud.score.to_string());
        set_text(&document, "lives", &hud.lives.to_string());
        set_text(&document, "time", &hud.time_string());

        if let Some(kmh) = hud.speed_kmh {
            set_text(&document, "speed", &format!("{kmh} km/h"));
        }

        if let (Some(text), Some(class)) = (hud.booster_text(), hud.booster_class()) {
            if let Some(el) = document.get_element_by_id("booster") {
                el.set_text_content(Some(&text));
                el.set_class_name(&format!("booster {class}"));
            }
        }

        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.class_list().toggle_with_force("hidden", !hud.game_over);
            if hud.game_over {
                set_text(&document, "final-score", &hud.score.to_string());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_arcade::game::{Arcade, Game};
    use canvas_arcade::renderer::DisplayList;
    use canvas_arcade::{LoopDriver, Settings, consts};

    env_logger::init();
    log::info!("Canvas Arcade (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load settings from {path}: {e}; using defaults");
            Settings::default()
        }),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);

    let game = Arcade::new(&settings, seed);
    let size = game.playfield();
    log::info!("Running {:?} headless with seed {seed}", game.kind());

    let mut driver = LoopDriver::new(game);
    let mut surface = DisplayList::new(size.x, size.y);
    let frames = driver.run_headless(
        60 * 60,
        f64::from(consts::FRAME_MS),
        &mut surface,
        autopilot,
    );

    let hud = driver.game().hud();
    println!(
        "{:?}: {frames} frames, score {}, lives {}, time {}{}",
        driver.game().kind(),
        hud.score,
        hud.lives,
        hud.time_string(),
        if hud.game_over { " (game over)" } else { "" }
    );
}

/// Tap fire twice per cycle and weave left, then right
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(frame: u32, input: &mut canvas_arcade::sim::InputSampler) {
    use canvas_arcade::sim::Action;

    let beat = frame % 90;
    let wanted = [
        (Action::Fire, beat % 45 == 0),
        (Action::MoveLeft, (20..30).contains(&beat)),
        (Action::MoveRight, (60..70).contains(&beat)),
    ];
    for (action, down) in wanted {
        if down {
            input.press(action);
        } else {
            input.release(action);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
