use serde::Deserialize;

use crate::error::QuillError;
use crate::text::font::FontWeight;
use crate::text::layout::LayoutParams;

/// Widest surface accepted from config or a resize.
pub const MAX_SURFACE_WIDTH: f32 = 8192.0;

/// Tunables for a spell practice session. Every field has a default, so a
/// shell may pass `{}` or any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpellConfig {
    /// Initial surface width in pixels.
    pub surface_width: f32,
    /// Smallest surface height, so short phrases still get room to write.
    pub min_surface_height: f32,
    pub padding: f32,
    /// Writing room below the last line of text.
    pub footer_margin: f32,
    /// Guide text em size in pixels.
    pub font_size: f32,
    pub font_weight: FontWeight,
    /// Line pitch as a multiple of `font_size`.
    pub line_height_factor: f32,
    /// Accept pen input only, ignoring mouse and touch.
    pub stylus_only: bool,
    /// Passing attempts needed to complete the session.
    pub repeat_count: u32,
    /// Width of the user's ink on screen.
    pub ink_width: f32,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            surface_width: 650.0,
            min_surface_height: 400.0,
            padding: 20.0,
            footer_margin: 20.0,
            font_size: 36.0,
            font_weight: FontWeight::Bold,
            line_height_factor: 1.25,
            stylus_only: false,
            repeat_count: 1,
            ink_width: 4.0,
        }
    }
}

impl SpellConfig {
    /// Parse a config from JSON. Out-of-range values are clamped.
    pub fn from_json(json: &str) -> Result<Self, QuillError> {
        let config: SpellConfig = serde_json::from_str(json).map_err(QuillError::Config)?;
        Ok(config.sanitized())
    }

    /// Clamp values that would make layout or rounds meaningless.
    pub fn sanitized(mut self) -> Self {
        self.repeat_count = self.repeat_count.max(1);
        self.font_size = self.font_size.max(1.0);
        self.line_height_factor = self.line_height_factor.max(1.0);
        self.padding = self.padding.max(0.0);
        self.footer_margin = self.footer_margin.max(0.0);
        self.surface_width = self.surface_width.max(0.0).min(MAX_SURFACE_WIDTH);
        self.min_surface_height = self.min_surface_height.max(0.0);
        self
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_factor
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            padding: self.padding,
            line_height: self.line_height(),
            min_height: self.min_surface_height,
            footer_margin: self.footer_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SpellConfig::from_json("{}").unwrap();
        assert_eq!(config, SpellConfig::default());
        assert_eq!(config.line_height(), 45.0);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config =
            SpellConfig::from_json(r#"{ "fontSize": 40, "stylusOnly": true, "fontWeight": "regular" }"#)
                .unwrap();
        assert_eq!(config.font_size, 40.0);
        assert!(config.stylus_only);
        assert_eq!(config.font_weight, FontWeight::Regular);
        assert_eq!(config.repeat_count, 1);
    }

    #[test]
    fn zero_repeat_count_is_clamped() {
        let config = SpellConfig::from_json(r#"{ "repeatCount": 0 }"#).unwrap();
        assert_eq!(config.repeat_count, 1);
    }

    #[test]
    fn oversized_surface_width_is_clamped() {
        let config = SpellConfig::from_json(r#"{ "surfaceWidth": 1e12 }"#).unwrap();
        assert_eq!(config.surface_width, MAX_SURFACE_WIDTH);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        assert!(matches!(
            SpellConfig::from_json(r#"{ "fontSize": "big" }"#),
            Err(QuillError::Config(_))
        ));
    }

    #[test]
    fn layout_params_follow_config() {
        let params = SpellConfig::default().layout_params();
        assert_eq!(params, LayoutParams::default());
    }
}
