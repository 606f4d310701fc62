//! Built-in single-stroke vector font.
//!
//! Glyphs are baked as polylines in em units: the origin is the top-left of
//! the em box, `x` runs right up to the glyph's `advance`, `y` runs down to 1.0.
//! Text is positioned by the top of its em box (top baseline), so a glyph
//! placed at `(x, y)` with size `s` covers `[x, x + advance * s] × [y, y + s]`.
//!
//! A single-stroke font serves both halves of the game: the strokes are
//! drawn as the guide text and are also the "centerlines" a learner traces.

use std::collections::HashMap;

use glam::Vec2;
use serde::Deserialize;

use crate::error::QuillError;

const BUILTIN_FONT_JSON: &str = include_str!("../../assets/stroke_font.json");

/// Top-level baked font data.
#[derive(Debug, Clone, Deserialize)]
pub struct StrokeFont {
    pub meta: FontMeta,
    glyphs: HashMap<String, GlyphDef>,
}

/// Vertical guide positions (em units) and the glyph used for unknown characters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMeta {
    pub name: String,
    pub cap_top: f32,
    pub x_height_top: f32,
    pub baseline: f32,
    pub descent: f32,
    /// Box glyph drawn for any character the font does not define.
    pub fallback: GlyphDef,
}

/// Definition of a single glyph.
#[derive(Debug, Clone, Deserialize)]
pub struct GlyphDef {
    /// Horizontal advance in em units, side bearings included.
    pub advance: f32,
    /// Polylines in em units. A one-point stroke is a dot.
    #[serde(default)]
    pub strokes: Vec<Vec<[f32; 2]>>,
}

impl StrokeFont {
    /// Parse baked font JSON.
    pub fn from_json(json: &str) -> Result<Self, QuillError> {
        let font: StrokeFont = serde_json::from_str(json).map_err(QuillError::Font)?;
        if font.meta.fallback.strokes.is_empty() {
            return Err(QuillError::MissingFallbackGlyph);
        }
        log::debug!("stroke font {:?}: {} glyphs", font.meta.name, font.len());
        Ok(font)
    }

    /// The font compiled into the crate.
    pub fn builtin() -> Result<Self, QuillError> {
        Self::from_json(BUILTIN_FONT_JSON)
    }

    /// Glyph for `ch`, or the fallback box when the font has no entry for it.
    pub fn glyph(&self, ch: char) -> &GlyphDef {
        let mut buf = [0u8; 4];
        self.glyphs
            .get(&*ch.encode_utf8(&mut buf))
            .unwrap_or(&self.meta.fallback)
    }

    /// Whether the font defines `ch` (as opposed to drawing the fallback).
    pub fn has_char(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.glyphs.contains_key(&*ch.encode_utf8(&mut buf))
    }

    /// Number of defined glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Stroke weight. Only affects pen width, never advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    #[default]
    Bold,
}

impl FontWeight {
    /// Pen width as a fraction of the font size.
    pub fn pen_ratio(self) -> f32 {
        match self {
            FontWeight::Regular => 0.08,
            FontWeight::Bold => 0.12,
        }
    }
}

/// A font at a concrete pixel size and weight.
///
/// Layout, the guide render and the reference mask all read glyph geometry
/// through this type so they cannot disagree on metrics.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics<'a> {
    pub font: &'a StrokeFont,
    /// Em size in pixels.
    pub size: f32,
    pub weight: FontWeight,
}

impl<'a> FontMetrics<'a> {
    pub fn new(font: &'a StrokeFont, size: f32, weight: FontWeight) -> Self {
        Self { font, size, weight }
    }

    /// Horizontal advance of `ch` in pixels.
    pub fn advance(&self, ch: char) -> f32 {
        self.font.glyph(ch).advance * self.size
    }

    /// Rendered width of a run of characters in pixels.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.advance(c)).sum()
    }

    /// Pen width used to ink glyph strokes.
    pub fn pen_width(&self) -> f32 {
        self.size * self.weight.pen_ratio()
    }

    /// Glyph strokes for `ch` mapped to surface pixels, with the em box's
    /// top-left corner at `origin`. Spaces yield no strokes.
    pub fn glyph_strokes(&self, ch: char, origin: Vec2) -> Vec<Vec<Vec2>> {
        if ch == ' ' {
            return Vec::new();
        }
        self.font
            .glyph(ch)
            .strokes
            .iter()
            .filter(|stroke| !stroke.is_empty())
            .map(|stroke| {
                stroke
                    .iter()
                    .map(|&[x, y]| origin + Vec2::new(x, y) * self.size)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_JSON: &str = r#"{
        "meta": {
            "name": "test",
            "capTop": 0.1, "xHeightTop": 0.4, "baseline": 0.8, "descent": 1.0,
            "fallback": { "advance": 0.5, "strokes": [[[0.1, 0.1], [0.4, 0.1]]] }
        },
        "glyphs": {
            "i": { "advance": 0.25, "strokes": [[[0.125, 0.4], [0.125, 0.8]], [[0.125, 0.2]]] },
            " ": { "advance": 0.3 }
        }
    }"#;

    #[test]
    fn parse_font() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        assert_eq!(font.len(), 2);
        assert_eq!(font.meta.baseline, 0.8);
        assert!(font.has_char('i'));
        assert!(!font.has_char('x'));
    }

    #[test]
    fn missing_fallback_is_rejected() {
        let json = r#"{
            "meta": { "name": "t", "capTop": 0.1, "xHeightTop": 0.4, "baseline": 0.8, "descent": 1.0,
                      "fallback": { "advance": 0.5 } },
            "glyphs": {}
        }"#;
        assert!(matches!(
            StrokeFont::from_json(json),
            Err(QuillError::MissingFallbackGlyph)
        ));
    }

    #[test]
    fn malformed_json_is_a_font_error() {
        assert!(matches!(StrokeFont::from_json("{"), Err(QuillError::Font(_))));
    }

    #[test]
    fn unknown_char_uses_fallback() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        let metrics = FontMetrics::new(&font, 40.0, FontWeight::Bold);
        assert_eq!(metrics.advance('x'), 20.0);
        assert_eq!(metrics.glyph_strokes('x', Vec2::ZERO).len(), 1);
    }

    #[test]
    fn strokes_are_scaled_and_offset() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        let metrics = FontMetrics::new(&font, 40.0, FontWeight::Regular);
        let strokes = metrics.glyph_strokes('i', Vec2::new(100.0, 50.0));
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0][0], Vec2::new(105.0, 66.0));
        assert_eq!(strokes[0][1], Vec2::new(105.0, 82.0));
        // dot
        assert_eq!(strokes[1].len(), 1);
        assert_eq!(metrics.pen_width(), 40.0 * 0.08);
    }

    #[test]
    fn space_has_advance_but_no_ink() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        let metrics = FontMetrics::new(&font, 40.0, FontWeight::Bold);
        assert_eq!(metrics.advance(' '), 12.0);
        assert!(metrics.glyph_strokes(' ', Vec2::ZERO).is_empty());
    }

    #[test]
    fn builtin_font_covers_ascii_letters_and_digits() {
        let font = StrokeFont::builtin().unwrap();
        for ch in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert!(font.has_char(ch), "missing glyph {ch:?}");
            assert!(!font.glyph(ch).strokes.is_empty(), "glyph {ch:?} has no strokes");
        }
        for ch in ". , ! ? ' - ( ) : ;".split(' ') {
            let ch = ch.chars().next().unwrap();
            assert!(font.has_char(ch), "missing glyph {ch:?}");
        }
        assert!(font.has_char(' '));
    }

    #[test]
    fn builtin_glyph_points_stay_inside_em_box() {
        let font = StrokeFont::builtin().unwrap();
        for ch in (' '..='~').filter(|&c| font.has_char(c)) {
            let glyph = font.glyph(ch);
            for stroke in &glyph.strokes {
                for &[x, y] in stroke {
                    assert!(x >= 0.0 && x <= glyph.advance, "{ch:?} x={x}");
                    assert!((0.0..=1.0).contains(&y), "{ch:?} y={y}");
                }
            }
        }
    }
}
