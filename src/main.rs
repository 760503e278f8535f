//! Arena Duel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        HtmlImageElement, KeyboardEvent,
    };

    use arena_duel::platform::{Frontend, Sprite, Surface};
    use arena_duel::sim::Rect;
    use arena_duel::{Key, Session, SessionPhase, Tuning};

    /// Canvas 2D implementation of the render surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        hero: HtmlImageElement,
        villain: HtmlImageElement,
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
            let image = match sprite {
                Sprite::Hero => &self.hero,
                Sprite::Villain => &self.villain,
            };
            // Not loaded (or failed to load): draw nothing
            if !image.complete() || image.natural_width() == 0 {
                return;
            }
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                rect.left() as f64,
                rect.top() as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                rect.left() as f64,
                rect.top() as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }
    }

    /// Document-level key handlers, attached only while a session runs
    struct KeyListeners {
        down: Closure<dyn FnMut(KeyboardEvent)>,
        up: Closure<dyn FnMut(KeyboardEvent)>,
    }

    /// DOM readouts, visibility toggles and the game-over alert
    struct DomFrontend {
        document: Document,
        canvas: HtmlCanvasElement,
        start_button: Option<HtmlElement>,
        score: Option<Element>,
        time: Option<Element>,
        listeners: Option<KeyListeners>,
        listening: bool,
    }

    impl Frontend for DomFrontend {
        fn set_score_text(&mut self, text: &str) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(text));
            }
        }

        fn set_time_text(&mut self, text: &str) {
            if let Some(el) = &self.time {
                el.set_text_content(Some(text));
            }
        }

        fn set_arena_visible(&mut self, visible: bool) {
            let (canvas, button) = if visible { ("block", "none") } else { ("none", "block") };
            let _ = self.canvas.style().set_property("display", canvas);
            if let Some(btn) = &self.start_button {
                let _ = btn.style().set_property("display", button);
            }
        }

        fn set_key_listening(&mut self, listening: bool) {
            if listening == self.listening {
                return;
            }
            let Some(listeners) = &self.listeners else {
                log::warn!("Key listeners not installed");
                return;
            };

            let down: &js_sys::Function = listeners.down.as_ref().unchecked_ref();
            let up: &js_sys::Function = listeners.up.as_ref().unchecked_ref();
            let result = if listening {
                self.document
                    .add_event_listener_with_callback("keydown", down)
                    .and_then(|_| self.document.add_event_listener_with_callback("keyup", up))
            } else {
                self.document
                    .remove_event_listener_with_callback("keydown", down)
                    .and_then(|_| self.document.remove_event_listener_with_callback("keyup", up))
            };
            match result {
                Ok(()) => self.listening = listening,
                Err(e) => log::error!("Key listener update failed: {:?}", e),
            }
        }

        fn notify_game_over(&mut self, message: &str) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
    }

    /// Everything the callbacks share
    struct App {
        session: Session,
        frontend: DomFrontend,
        surface: CanvasSurface,
    }

    fn load_image(src: &str) -> Option<HtmlImageElement> {
        let image = HtmlImageElement::new().ok()?;
        image.set_src(src);
        Some(image)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Arena Duel starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let tuning = Tuning::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(tuning.arena_width as u32);
        canvas.set_height(tuning.arena_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let start_button = document
            .get_element_by_id("startButton")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if start_button.is_none() {
            log::warn!("No #startButton element; game cannot be started");
        }

        let surface = CanvasSurface {
            ctx,
            hero: load_image("hero.png").ok_or("image element")?,
            villain: load_image("villain.png").ok_or("image element")?,
        };

        let mut frontend = DomFrontend {
            document: document.clone(),
            canvas,
            start_button: start_button.clone(),
            score: document.get_element_by_id("score"),
            time: document.get_element_by_id("time"),
            listeners: None,
            listening: false,
        };
        frontend.set_arena_visible(false);

        let app = Rc::new(RefCell::new(App {
            session: Session::new(tuning),
            frontend,
            surface,
        }));

        install_key_listeners(app.clone());
        if let Some(btn) = start_button {
            setup_start_button(&btn, app);
        }

        log::info!("Arena Duel ready");
        Ok(())
    }

    fn install_key_listeners(app: Rc<RefCell<App>>) {
        let down = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().session.key_down(Key::from_dom_key(&event.key()));
            })
        };
        let up = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().session.key_up(Key::from_dom_key(&event.key()));
            })
        };
        app.borrow_mut().frontend.listeners = Some(KeyListeners { down, up });
    }

    fn setup_start_button(btn: &HtmlElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            {
                let mut guard = app.borrow_mut();
                if guard.session.phase() == SessionPhase::Running {
                    return;
                }
                let now = web_sys::window()
                    .and_then(|w| w.performance())
                    .map(|p| p.now())
                    .unwrap_or_default();
                let seed = js_sys::Date::now() as u64;

                let App {
                    session, frontend, ..
                } = &mut *guard;
                session.start(now as u64, seed, frontend);
            }
            request_animation_frame(app.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_running = {
            let mut guard = app.borrow_mut();
            let App {
                session,
                frontend,
                surface,
            } = &mut *guard;

            session.render(surface);
            session.frame(time as u64, frontend)
        };

        // Game over: stop scheduling frames
        if keep_running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use arena_duel::platform::Frontend;
    use arena_duel::{Key, Session};

    /// Frames per simulated second
    const FPS: u64 = 60;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u64 = FPS * 300;
    /// Frames between autopilot shots
    const FIRE_EVERY: u64 = 12;

    /// Front end that only logs
    #[derive(Default)]
    pub struct LogFrontend {
        pub game_over: Option<String>,
    }

    impl Frontend for LogFrontend {
        fn set_score_text(&mut self, text: &str) {
            log::debug!("{}", text);
        }

        fn set_time_text(&mut self, text: &str) {
            log::debug!("{}", text);
        }

        fn set_arena_visible(&mut self, visible: bool) {
            log::debug!("Arena visible: {}", visible);
        }

        fn set_key_listening(&mut self, listening: bool) {
            log::debug!("Key listening: {}", listening);
        }

        fn notify_game_over(&mut self, message: &str) {
            log::info!("{}", message);
            self.game_over = Some(message.to_string());
        }
    }

    /// Tracks the enemy vertically and fires on a fixed cadence
    #[derive(Default)]
    struct Autopilot {
        held: Option<Key>,
    }

    impl Autopilot {
        fn drive(&mut self, session: &mut Session, frame: u64) {
            let state = session.state();
            let gap = state.enemy.pos.y - state.player.pos.y;
            let wanted = if gap > state.player.speed {
                Some(Key::Down)
            } else if gap < -state.player.speed {
                Some(Key::Up)
            } else {
                None
            };

            if wanted != self.held {
                if let Some(key) = self.held.take() {
                    session.key_up(key);
                }
                if let Some(key) = wanted {
                    session.key_down(key);
                }
                self.held = wanted;
            }

            if frame.is_multiple_of(FIRE_EVERY) {
                session.key_down(Key::Fire);
                session.key_up(Key::Fire);
            }
        }
    }

    pub fn run(mut session: Session, seed: u64) {
        let mut frontend = LogFrontend::default();
        let mut autopilot = Autopilot::default();

        session.start(0, seed, &mut frontend);

        let mut frame = 0;
        while frame < MAX_FRAMES {
            autopilot.drive(&mut session, frame);
            if !session.frame(frame * 1000 / FPS, &mut frontend) {
                break;
            }
            frame += 1;
        }

        let state = session.state();
        match frontend.game_over {
            Some(message) => println!("{message} ({frame} frames)"),
            None => println!(
                "Still alive after {} frames: score {}, time {}, health {}",
                frame, state.score, state.elapsed, state.player.health
            ),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_duel::{Session, Tuning};

    env_logger::init();
    log::info!("Arena Duel (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_file(std::path::Path::new(&path)),
        None => Tuning::default(),
    };

    headless::run(Session::new(tuning), 0x5eed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
