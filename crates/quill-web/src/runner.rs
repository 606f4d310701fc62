use quill_engine::{
    EngineContext, Game, GameConfig, InputEvent, InputQueue, PracticeGame, QuillError,
    SpellConfig,
};
#[cfg(feature = "vectors")]
use quill_engine::{RenderContext, VectorState};

/// Generic game runner that wires a game to the browser shell.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly. There is no frame loop: every input call ticks once, so
/// all outputs are ready as soon as the call returns.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    config: GameConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for reads from JS memory.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            config,
            initialized: false,
            sound_buffer: Vec::new(),
        }
    }

    /// Initialize the game and draw the first frame. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.clear_frame_data();
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input, then repaint and refresh the output buffers.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        // Clear per-tick transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.publish();
    }

    fn publish(&mut self) {
        #[cfg(feature = "vectors")]
        {
            self.vectors.clear();
            let mut render_ctx = RenderContext {
                vectors: &mut self.vectors,
            };
            self.game.render(&mut render_ctx);
        }

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.config = self.game.config();
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for reads from JS memory ----

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn surface_width(&self) -> f32 {
        self.config.surface_width
    }

    pub fn surface_height(&self) -> f32 {
        self.config.surface_height
    }

    pub fn status_message(&self) -> Option<String> {
        self.game.status_message()
    }

    pub fn summary_json(&self) -> Option<String> {
        self.game.summary_json()
    }
}

impl<G: PracticeGame> GameRunner<G> {
    /// Build and initialize a runner for `phrase`.
    pub fn start(phrase: &str, config: SpellConfig) -> Result<Self, QuillError> {
        let mut runner = Self::new(G::from_phrase(phrase, config)?);
        runner.init();
        Ok(runner)
    }
}

/// Parse the shell's config JSON. A blank string means defaults; malformed
/// JSON is logged and also falls back to defaults.
pub fn parse_config(json: &str) -> SpellConfig {
    if json.trim().is_empty() {
        return SpellConfig::default();
    }
    SpellConfig::from_json(json).unwrap_or_else(|err| {
        log::warn!("{err}; using default config");
        SpellConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_engine::game::spell::{CUSTOM_FINISH, CUSTOM_RESIZE, EVENT_RESIZED, EVENT_SCORE};
    use quill_engine::{GameEvent, PointerKind, SoundEvent, SpellGame};

    fn runner(phrase: &str) -> GameRunner<SpellGame> {
        GameRunner::start(phrase, SpellConfig::default()).unwrap()
    }

    fn events(r: &GameRunner<SpellGame>) -> &[GameEvent] {
        // events live in ctx until the next tick
        &r.ctx.events
    }

    #[test]
    fn start_reports_surface_size() {
        let r = runner("cat");
        assert_eq!(r.surface_width(), 650.0);
        assert_eq!(r.surface_height(), 400.0);
        assert_eq!(events(&r)[0].kind, EVENT_RESIZED);
        assert_eq!(r.game_events_len(), 1);
        #[cfg(feature = "vectors")]
        assert!(r.vector_vertex_count() > 0);
    }

    #[test]
    fn finish_command_packs_sound_and_event() {
        let mut r = runner("cat");
        r.push_input(InputEvent::Custom { kind: CUSTOM_FINISH, a: 0.0, b: 0.0, c: 0.0 });
        r.tick();
        assert_eq!(r.sound_buffer, vec![SoundEvent::ERROR.0 as u8]);
        assert_eq!(r.sound_events_len(), 1);
        assert_eq!(events(&r)[0].kind, EVENT_SCORE);
        assert_eq!(r.status_message().as_deref(), Some("Try again! Accuracy: 0%"));

        r.tick();
        assert_eq!(r.sound_events_len(), 0);
        assert_eq!(r.game_events_len(), 0);
    }

    #[test]
    fn resize_updates_reported_surface() {
        let mut r = runner("a phrase long enough to wrap onto several lines when narrow");
        r.push_input(InputEvent::Custom { kind: CUSTOM_RESIZE, a: 180.0, b: 0.0, c: 0.0 });
        r.tick();
        assert_eq!(r.surface_width(), 180.0);
        assert!(r.surface_height() > 400.0);
    }

    #[test]
    fn input_is_consumed_once() {
        let mut r = runner("cat");
        r.push_input(InputEvent::PointerDown { x: 10.0, y: 10.0, pointer: PointerKind::Mouse });
        r.push_input(InputEvent::PointerUp { x: 10.0, y: 10.0, pointer: PointerKind::Mouse });
        r.tick();
        r.tick();
        assert_eq!(r.game().ink().completed.len(), 1);
    }

    #[test]
    fn blank_or_bad_config_falls_back_to_defaults() {
        assert_eq!(parse_config(""), SpellConfig::default());
        assert_eq!(parse_config("not json"), SpellConfig::default());
        assert_eq!(parse_config(r#"{ "fontSize": 48 }"#).font_size, 48.0);
    }
}
