pub mod runner;

pub use runner::{parse_config, GameRunner};

#[doc(hidden)]
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a practice game.
///
/// Generates `thread_local!` storage for the [`GameRunner`], a `with_runner()`
/// helper and the exports the browser shell calls: session start, pointer
/// input, shell commands and buffer accessors.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use quill_engine::*;
///
/// quill_web::export_game!(SpellGame, "spell-practice");
/// ```
///
/// # Arguments
///
/// - `$game_type`: a type implementing `quill_engine::PracticeGame`
/// - `$game_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Runs `f` against the live session. `None` before `game_init` or after
        /// `game_dispose`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        fn start_session(phrase: &str, config_json: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = $crate::parse_config(config_json);
            let runner = $crate::GameRunner::<$game_type>::start(phrase, config)
                .map_err(|err| JsValue::from($crate::js_sys::Error::new(&err.to_string())))?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_init(spell_text: &str, config_json: &str) -> Result<(), JsValue> {
            start_session(spell_text, config_json)
        }

        #[wasm_bindgen]
        pub fn game_init_item(item_json: &str, config_json: &str) -> Result<(), JsValue> {
            let phrase = LearningItem::phrase_from_json(item_json).map_err(|err| {
                log::warn!("{}: {err}", $game_name);
                JsValue::from($crate::js_sys::Error::new(&err.to_string()))
            })?;
            start_session(&phrase, config_json)
        }

        /// Drop the session without further events.
        #[wasm_bindgen]
        pub fn game_dispose() {
            RUNNER.with(|cell| {
                cell.borrow_mut().take();
            });
        }

        #[wasm_bindgen]
        pub fn game_tick() {
            with_runner(|r| r.tick());
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, pointer_type: &str) {
            let pointer = PointerKind::from_pointer_type(pointer_type);
            with_runner(|r| {
                r.push_input(InputEvent::PointerDown { x, y, pointer });
                r.tick();
            });
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32, pointer_type: &str) {
            let pointer = PointerKind::from_pointer_type(pointer_type);
            with_runner(|r| {
                r.push_input(InputEvent::PointerMove { x, y, pointer });
                r.tick();
            });
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32, pointer_type: &str) {
            let pointer = PointerKind::from_pointer_type(pointer_type);
            with_runner(|r| {
                r.push_input(InputEvent::PointerUp { x, y, pointer });
                r.tick();
            });
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| {
                r.push_input(InputEvent::Custom { kind, a, b, c });
                r.tick();
            });
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_surface_width() -> f32 {
            with_runner(|r| r.surface_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_surface_height() -> f32 {
            with_runner(|r| r.surface_height()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_status_message() -> Option<String> {
            with_runner(|r| r.status_message()).flatten()
        }

        #[wasm_bindgen]
        pub fn get_summary_json() -> Option<String> {
            with_runner(|r| r.summary_json()).flatten()
        }
    };

    // Variant with vectors feature
    ($game_type:ty, $game_name:literal, vectors) => {
        $crate::export_game!($game_type, $game_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
        }
    };
}
