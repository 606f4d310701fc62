use thiserror::Error;

/// Errors raised while loading session data (config, font, learning items).
///
/// Runtime operations (pointer input, scoring, resize) never fail; only the
/// data a session is constructed from can be malformed.
#[derive(Debug, Error)]
pub enum QuillError {
    #[error("invalid spell config: {0}")]
    Config(#[source] serde_json::Error),
    #[error("invalid stroke font: {0}")]
    Font(#[source] serde_json::Error),
    #[error("invalid learning item: {0}")]
    Item(#[source] serde_json::Error),
    #[error("learning item has no text to practice")]
    EmptyItem,
    #[error("stroke font has no fallback glyph strokes")]
    MissingFallbackGlyph,
}
