//! Jungle Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build owns the DOM: input listeners, the HUD line, the win
//! overlay, and a JSON frame feed for the page's renderer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, PointerEvent};

    use jungle_dash::consts::LEVEL_COUNT;
    use jungle_dash::sim::{FrameEvent, Phase, TickInput, World, tick};

    /// Game instance holding all state
    struct Game {
        world: World,
        input: TickInput,
        last_time: f64,
        // Cached HUD line so the DOM only updates on change
        hud_line: String,
        overlay_shown: bool,
    }

    impl Game {
        fn new() -> Self {
            Self {
                world: World::new(),
                input: TickInput::default(),
                last_time: 0.0,
                hud_line: String::new(),
                overlay_shown: false,
            }
        }

        /// Run one simulation frame and clear one-shot inputs
        fn update(&mut self, dt: f32) {
            tick(&mut self.world, &self.input, dt);
            self.input.jump_pressed = false;
            self.input.reload = false;

            for event in self.world.take_events() {
                match event {
                    FrameEvent::LevelAdvanced { index } => {
                        log::info!("Advanced to level {}", index + 1);
                    }
                    FrameEvent::Won => log::info!("All {} levels cleared", LEVEL_COUNT),
                    _ => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let hud = self.world.hud_status();
            let banana = if hud.collectible_taken { "yes" } else { "no" };
            let line = format!(
                "Level {} / {} | Score: {} | Banana: {} | Stomps: {}",
                hud.level_index + 1,
                hud.level_count,
                hud.score,
                banana,
                hud.stomps_this_level,
            );
            if line != self.hud_line {
                if let Some(el) = document.get_element_by_id("status") {
                    el.set_text_content(Some(&line));
                }
                self.hud_line = line;
            }

            let won = self.world.phase == Phase::Won;
            if won != self.overlay_shown {
                if let Some(el) = document.get_element_by_id("overlay") {
                    if won {
                        let _ = el.class_list().remove_1("hidden");
                    } else {
                        let _ = el.class_list().add_1("hidden");
                    }
                }
                if won {
                    if let Some(el) = document.get_element_by_id("overlayTitle") {
                        el.set_text_content(Some("You win!"));
                    }
                    if let Some(el) = document.get_element_by_id("overlayText") {
                        el.set_text_content(Some(&format!(
                            "Final score: {}",
                            self.world.player.score
                        )));
                    }
                }
                self.overlay_shown = won;
            }
        }

        /// Hand the frame to the page's renderer, if one is installed.
        /// The page exposes `window.renderFrame(jsonWorld)`.
        fn render(&self) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let hook = js_sys::Reflect::get(&window, &JsValue::from_str("renderFrame"))
                .ok()
                .and_then(|v| v.dyn_into::<js_sys::Function>().ok());
            if let Some(func) = hook {
                if let Ok(json) = serde_json::to_string(&self.world) {
                    let _ = func.call1(&JsValue::NULL, &JsValue::from_str(&json));
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Jungle Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let game = Rc::new(RefCell::new(Game::new()));

        setup_keyboard(game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_play_again(&document, game.clone());

        request_animation_frame(game);

        log::info!("Jungle Dash running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "ArrowUp" | "w" | "W" | " " => {
                        g.input.jump = true;
                        if !event.repeat() {
                            g.input.jump_pressed = true;
                        }
                    }
                    "r" | "R" => g.input.reload = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    "ArrowUp" | "w" | "W" | " " => g.input.jump = false,
                    _ => {}
                }
            });
            let _ =
                web_sys::window()
                    .unwrap()
                    .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen buttons for touch devices. Pointer down holds the input,
    /// up/leave releases it.
    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, fn(&mut TickInput, bool)); 3] = [
            ("btnLeft", |input, held| input.left = held),
            ("btnRight", |input, held| input.right = held),
            ("btnJump", |input, held| {
                if held && !input.jump {
                    input.jump_pressed = true;
                }
                input.jump = held;
            }),
        ];

        for (id, apply) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    apply(&mut game.borrow_mut().input, true);
                });
                let _ = btn.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }

            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    apply(&mut game.borrow_mut().input, false);
                });
                let _ =
                    btn.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_play_again(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("playAgainBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.world.play_again();
                g.input = TickInput::default();
                log::info!("New session started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            let document = web_sys::window().unwrap().document().unwrap();
            g.update_hud(&document);
        }

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
    use jungle_dash::consts::LEVEL_COUNT;
    use jungle_dash::sim::{TickInput, World, generate, tick};

    env_logger::init();
    log::info!("Jungle Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    for index in 0..LEVEL_COUNT {
        let desc = generate(index);
        log::info!(
            "level {:>2}: {:>2} platforms, {:>2} hazards, {} flyers, {} checkpoint(s)",
            index + 1,
            desc.platforms.len(),
            desc.hazards.len(),
            desc.flyers.len(),
            desc.checkpoints.len(),
        );
    }

    // A short scripted run so `cargo run` exercises the frame loop.
    let mut world = World::new();
    let input = TickInput {
        right: true,
        ..TickInput::default()
    };
    for _ in 0..600 {
        tick(&mut world, &input, 1.0 / 60.0);
    }
    log::info!(
        "after 10s of running right: x = {:.2}, score = {}",
        world.player.pos.x,
        world.player.score,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
