//! Melee Duel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Performance};

    use melee_duel::renderer::CanvasRenderer;
    use melee_duel::{CombatState, InputState, Settings};

    /// Game instance holding all state
    struct Game {
        state: CombatState,
        input: InputState,
        renderer: CanvasRenderer,
        performance: Performance,
    }

    impl Game {
        /// One animation frame: sample input, step the duel, draw
        fn frame(&mut self) {
            let now = self.performance.now();
            let input = self.input.snapshot();
            let frame = self.state.advance(now, &input);
            self.renderer.render(&frame);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Melee Duel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let performance = window.performance().expect("no performance clock");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref());

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("getContext failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game {
            state: CombatState::new(settings.rules.clone()),
            input: InputState::new(settings.bindings.clone()),
            renderer: CanvasRenderer::new(ctx, &canvas, &settings),
            performance,
        }));

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Melee Duel running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    // Arrow keys would otherwise scroll the page
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
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups for held keys will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
                log::info!("Input released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
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
    env_logger::init();
    log::info!("Melee Duel (native) starting...");
    log::info!("Interactive play requires a browser - build for wasm32 and serve the canvas page");

    let json = std::env::var("MELEE_DUEL_SETTINGS").ok();
    let settings = melee_duel::Settings::from_json_or_default(json.as_deref());

    println!("\nRunning scripted duel...");
    let frame = scripted::run_duel(&settings);
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless duel: whoever holds the turn walks up to the other fighter and strikes
#[cfg(not(target_arch = "wasm32"))]
mod scripted {
    use melee_duel::sim::{CombatEvent, CombatState, MoveInput, RenderState, TickInput};
    use melee_duel::Settings;

    /// 60 Hz frame clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub fn run_duel(settings: &Settings) -> RenderState {
        let mut state = CombatState::new(settings.rules.clone());
        let mut swing = false;
        let mut frame = state.render_state(0.0, Vec::new());

        for i in 0..MAX_FRAMES {
            let now = i as f64 * FRAME_MS;
            let input = approach(&state, swing);
            swing = input.attack;
            frame = state.advance(now, &input);

            for event in &frame.events {
                if let CombatEvent::Hit { attacker, defender, remaining_hp, .. } = event {
                    println!(
                        "  t={:>7.1}ms  P{} hits P{} -> {} hp",
                        now,
                        attacker.number(),
                        defender.number(),
                        remaining_hp
                    );
                }
            }

            if let Some(winner) = frame.winner {
                println!("Player {} wins after {} frames", winner.number(), i + 1);
                return frame;
            }
        }

        log::warn!("Scripted duel did not finish in {} frames", MAX_FRAMES);
        frame
    }

    /// Input for the active fighter: close the gap, face the target, then tap attack
    fn approach(state: &CombatState, swung_last_frame: bool) -> TickInput {
        let me = state.turn.active;
        let delta = state.fighter(me.other()).pos - state.fighter(me).pos;

        let mut moves = MoveInput::default();
        if delta.x.abs() > 60.0 || delta.x.abs() < 20.0 {
            // Too far to reach, or stacked on top of the target
            let toward = delta.x.abs() > 60.0;
            moves.right = (delta.x > 0.0) == toward;
            moves.left = !moves.right;
        } else if state.fighter(me).facing.sign() as f32 * delta.x < 0.0 {
            // In range but facing away
            moves.right = delta.x > 0.0;
            moves.left = delta.x < 0.0;
        }
        if delta.y.abs() > 20.0 {
            moves.down = delta.y > 0.0;
            moves.up = delta.y < 0.0;
        }

        let in_position = moves == MoveInput::default();
        let mut input = TickInput::default();
        input.moves[me.index()] = moves;
        // Release between swings so each press is a fresh edge
        input.attack = in_position && !swung_last_frame;
        input
    }
}
