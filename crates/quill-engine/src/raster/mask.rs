//! Off-screen opacity mask of the guide text, used only for hit-testing ink.
//!
//! Glyph strokes are inked with a round pen: a pixel is on-glyph when its
//! center lies within half the pen width of any stroke segment. Only glyph
//! ink is rasterized, never underlines or rule lines.

use glam::Vec2;

use crate::text::font::FontMetrics;
use crate::text::layout::{GlyphKind, TextLayout};

const OPAQUE: u8 = 255;

/// Smallest pen radius stamped. Just above half a pixel diagonal, so any
/// point on a centerline floors into a pixel whose center is inked.
const MIN_PEN_RADIUS: f32 = 0.75;

/// Per-pixel opacity buffer sized exactly to the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl ReferenceMask {
    /// A fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major opacity buffer. `None` if the length does
    /// not match `width * height`.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> Option<Self> {
        (alpha.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            alpha,
        })
    }

    /// Rasterize every placed glyph of `layout` into a fresh mask.
    pub fn rasterize(layout: &TextLayout, width: u32, height: u32, font: &FontMetrics) -> Self {
        let mut mask = Self::new(width, height);
        let radius = (font.pen_width() * 0.5).max(MIN_PEN_RADIUS);

        for glyph in layout.glyphs().filter(|g| g.kind != GlyphKind::Space) {
            for stroke in font.glyph_strokes(glyph.ch, Vec2::new(glyph.x, glyph.y)) {
                if let [dot] = stroke.as_slice() {
                    mask.stamp_segment(*dot, *dot, radius);
                    continue;
                }
                for seg in stroke.windows(2) {
                    mask.stamp_segment(seg[0], seg[1], radius);
                }
            }
        }

        log::debug!(
            "mask: {}x{} with {} glyph pixels",
            width,
            height,
            mask.covered_pixels()
        );
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at pixel `(x, y)`, or `None` outside the mask.
    pub fn alpha_at(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.alpha[y as usize * self.width as usize + x as usize])
    }

    /// Whether pixel `(x, y)` is inside the mask and covered by glyph ink.
    pub fn is_on_glyph(&self, x: i64, y: i64) -> bool {
        self.alpha_at(x, y).is_some_and(|a| a > 0)
    }

    /// Number of on-glyph pixels.
    pub fn covered_pixels(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > 0).count()
    }

    /// Ink every pixel whose center is within `radius` of segment `a..b`.
    fn stamp_segment(&mut self, a: Vec2, b: Vec2, radius: f32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let min = a.min(b) - Vec2::splat(radius);
        let max = a.max(b) + Vec2::splat(radius);

        let x0 = (min.x.floor() as i64).max(0);
        let y0 = (min.y.floor() as i64).max(0);
        let x1 = (max.x.ceil() as i64).min(self.width as i64 - 1);
        let y1 = (max.y.ceil() as i64).min(self.height as i64 - 1);

        for py in y0..=y1 {
            for px in x0..=x1 {
                let center = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if distance_to_segment(center, a, b) <= radius {
                    self.alpha[py as usize * self.width as usize + px as usize] = OPAQUE;
                }
            }
        }
    }
}

/// Euclidean distance from `p` to the closed segment `a..b`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
