//! Stick Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, PointerEvent};

    use stick_runner::audio::{AudioManager, SoundEffect};
    use stick_runner::bestscore::BestScore;
    use stick_runner::consts::*;
    use stick_runner::renderer::CanvasRenderer;
    use stick_runner::settings::Settings;
    use stick_runner::sim::{GameEvent, SimState, TickInput, submit_answer, tick};
    use stick_runner::ui::{self, OverlayModel};

    /// Game instance holding all state
    struct Game {
        state: SimState,
        renderer: Option<CanvasRenderer>,
        input: TickInput,
        last_time: f64,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            let mut state = SimState::new(seed);
            state.best = BestScore::load().0;

            Self {
                state,
                renderer: None,
                input: TickInput::default(),
                last_time: 0.0,
                audio,
                settings,
            }
        }

        /// Run one simulation tick and react to its events
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                MAX_FRAME_DELTA_MS
            };
            self.last_time = time;

            let input = self.input;
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.input = TickInput::default();

            self.handle_events();
        }

        /// Drain simulation events into sounds, persistence and input focus
        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::RunStarted => self.audio.play(SoundEffect::Home),
                    GameEvent::Died { .. } => self.audio.play(SoundEffect::Death),
                    GameEvent::NewBest { best } => BestScore(best).save(),
                    GameEvent::AnswerRejected => {
                        self.audio.play(SoundEffect::WrongAnswer);
                        focus_quiz_input();
                    }
                    GameEvent::AnswerAccepted => {
                        self.audio.play(SoundEffect::Correct);
                        clear_quiz_input();
                    }
                    GameEvent::CheckpointQuiz => clear_quiz_input(),
                    GameEvent::Landed { .. } => {}
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, self.settings.effective_screen_shake());
            }
        }

        /// Sync HUD and overlay DOM from simulation state
        fn sync_dom(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            set_text(&document, "score", &self.state.display_score().to_string());
            set_text(&document, "best", &self.state.best.to_string());

            let model = OverlayModel::derive(&self.state);
            toggle_hidden(&document, "overlay", !model.visible);
            toggle_hidden(&document, "shareBtn", !model.share_visible);
            toggle_hidden(&document, "quiz", !model.quiz_visible);
            set_text(&document, "overlayTitle", &model.title);
            set_text(&document, "overlayDesc", &model.description);
            set_text(&document, "startBtn", &model.start_label);
            set_text(&document, "quizQuestion", &model.quiz_prompt);
            set_text(&document, "quizError", &model.quiz_error);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn toggle_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            if hidden {
                let _ = classes.add_1("hidden");
            } else {
                let _ = classes.remove_1("hidden");
            }
        }
    }

    fn quiz_input() -> Option<HtmlInputElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("quizAnswer")?
            .dyn_into()
            .ok()
    }

    fn clear_quiz_input() {
        if let Some(input) = quiz_input() {
            input.set_value("");
        }
    }

    fn focus_quiz_input() {
        if let Some(input) = quiz_input() {
            let _ = input.focus();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Stick Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().renderer = Some(CanvasRenderer::new(
            ctx,
            f64::from(VIEW_WIDTH),
            f64::from(VIEW_HEIGHT),
        ));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_overlay_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Stick Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Hold space to grow, release to topple
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.start_grow = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.stop_grow = true;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer hold on the canvas mirrors the space bar
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.start_grow = true;
                // Browsers unlock audio on the first gesture
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().input.stop_grow = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Start/continue/restart: one button, quiz-gated in the simulation
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let answer = quiz_input().map(|i| i.value()).unwrap_or_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                submit_answer(&mut g.state, &answer);
                g.handle_events();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Share copies the score text; failures only lose the copy
        if let Some(btn) = document.get_element_by_id("shareBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let g = game.borrow();
                g.audio.play(SoundEffect::Share);
                let text = ui::share_text(g.state.display_score());
                if let Some(window) = web_sys::window() {
                    let _ = window.navigator().clipboard().write_text(&text);
                }
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
            g.update(time);
            g.render();
            g.sync_dom();
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
    env_logger::init();
    log::info!("Stick Runner (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless smoke run
    println!("\nRunning headless bridge demo...");
    demo_bridge();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_bridge() {
    use stick_runner::sim::{Phase, SimState, TickInput, tick};

    let mut state = SimState::new(0xC0FFEE);
    tick(
        &mut state,
        &TickInput {
            start_grow: true,
            ..Default::default()
        },
        16.0,
    );
    assert!(state.running, "first press should start the run");

    // Hold long enough to clear the smallest gap, then release
    for _ in 0..80 {
        tick(&mut state, &TickInput::default(), 16.0);
    }
    tick(
        &mut state,
        &TickInput {
            stop_grow: true,
            ..Default::default()
        },
        16.0,
    );
    for _ in 0..2_000 {
        tick(&mut state, &TickInput::default(), 16.0);
        if state.phase == Phase::Idle && !state.paused {
            break;
        }
    }
    println!("✓ Headless demo done (score {})", state.display_score());
}
