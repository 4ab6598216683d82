//! Starleap entry point
//!
//! Handles platform-specific initialization and runs the game loop: a
//! blocking throttled loop on native, a requestAnimationFrame pump in the
//! browser. Both translate the same step results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use starleap::audio::AudioManager;
    use starleap::frame::FrameClock;
    use starleap::platform::web::{CanvasPresentation, LocalStorageScoreStore};
    use starleap::session::Session;
    use starleap::sim::StepResult;
    use starleap::Settings;

    type WebSession = Session<CanvasPresentation, AudioManager, LocalStorageScoreStore>;

    /// Game instance holding all state
    struct Game {
        session: WebSession,
        clock: FrameClock,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Starleap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let presentation =
            CanvasPresentation::new(&document).expect("presentation init failed");
        let settings = Settings::load();
        let audio = AudioManager::new(&settings);
        let store = LocalStorageScoreStore::new();

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(presentation, audio, store, &settings, seed)
            .expect("session init failed");

        let game = Rc::new(RefCell::new(Game {
            session,
            clock: FrameClock::new(),
        }));

        // Start game loop; the host paces us, no throttling here
        request_animation_frame(game);

        log::info!("Starleap running!");
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
        let result = {
            let mut g = game.borrow_mut();
            let Game { session, clock } = &mut *g;
            let timing = clock.tick(time);
            let result = session.run_step(&timing);
            if result == StepResult::Restart {
                session.reset_round();
            }
            result
        };

        match result {
            StepResult::Continue | StepResult::Restart => request_animation_frame(game),
            StepResult::Quit => log::info!("game quit, stopping the loop"),
            StepResult::Error => log::error!("presentation failure, stopping the loop"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use starleap::frame::run_blocking;
    use starleap::platform::headless::{HeadlessPresentation, NullAudio};
    use starleap::platform::FileScoreStore;
    use starleap::session::Session;
    use starleap::sim::InputEvent;
    use starleap::Settings;

    env_logger::init();
    log::info!("Starleap (native) starting...");
    log::info!("The interactive shell targets the browser build; running the scripted demo round");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    // A short piloted round: jump, drift right, fall out, quit from the board
    let script = vec![
        (5, InputEvent::Up),
        (30, InputEvent::Right),
        (90, InputEvent::Still),
        (480, InputEvent::Quit),
    ];
    let presentation = HeadlessPresentation::scripted(script);
    let settings = Settings::load();
    let session = Session::new(
        presentation,
        NullAudio::new(),
        FileScoreStore::new(".starleap_highscores"),
        &settings,
        seed,
    );

    let code = match session {
        Ok(mut session) => {
            let code = run_blocking(&mut session);
            log::info!(
                "demo round done, final score {}",
                session.state().player.score()
            );
            code
        }
        Err(err) => {
            log::error!("fatal: {err}");
            1
        }
    };
    std::process::exit(code);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
