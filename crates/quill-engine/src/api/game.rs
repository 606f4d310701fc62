use crate::api::types::{GameEvent, SoundEvent};
use crate::config::SpellConfig;
use crate::error::QuillError;
use crate::input::queue::InputQueue;
#[cfg(feature = "vectors")]
use crate::raster::vector::VectorState;

/// Surface dimensions reported by the game to the runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Drawing surface width in pixels.
    pub surface_width: f32,
    /// Drawing surface height in pixels.
    pub surface_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 650.0,
            surface_height: 400.0,
        }
    }
}

/// The contract a game fulfills to be driven by a runner.
pub trait Game {
    /// Current surface configuration. Queried after every tick.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Called once before the first tick.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Handle every pending input event.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only repaint of the surface.
    #[cfg(feature = "vectors")]
    fn render(&self, _ctx: &mut RenderContext) {}

    /// User-facing status line (e.g. the last verdict), if any.
    fn status_message(&self) -> Option<String> {
        None
    }

    /// JSON summary of the session so far, if the game keeps one.
    fn summary_json(&self) -> Option<String> {
        None
    }
}

/// A game the shell starts from a practice phrase.
pub trait PracticeGame: Game + Sized {
    fn from_phrase(phrase: &str, config: SpellConfig) -> Result<Self, QuillError>;
}

/// Per-tick outputs a game hands back to the shell.
#[derive(Debug, Default)]
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-tick transient data.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

/// Render target for [`Game::render`].
#[cfg(feature = "vectors")]
pub struct RenderContext<'a> {
    pub vectors: &'a mut VectorState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_frame_data_empties_outputs() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent::SUCCESS);
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }
}
