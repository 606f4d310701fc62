pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod ink;
pub mod input;
pub mod phrase;
pub mod raster;
pub mod scoring;
pub mod text;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, PracticeGame};
#[cfg(feature = "vectors")]
pub use api::game::RenderContext;
pub use api::sound::{SoundPlayer, SoundQueue};
pub use api::types::{GameEvent, SoundEvent};
pub use config::SpellConfig;
pub use error::QuillError;
pub use game::spell::{RoundSummary, SessionSummary, SpellGame, SpellPhase, Verdict};
pub use ink::capture::{InkCapture, InkState, Stroke};
pub use input::queue::{InputEvent, InputQueue, PointerKind};
pub use phrase::LearningItem;
pub use raster::mask::ReferenceMask;
pub use scoring::accuracy::{score, Score, PASS_THRESHOLD};
pub use text::font::{FontMetrics, FontWeight, StrokeFont};
pub use text::layout::{layout, GlyphKind, LayoutLine, LayoutParams, PlacedGlyph, TextLayout};

#[cfg(feature = "vectors")]
pub use raster::vector::{VectorColor, VectorState, VectorVertex};
