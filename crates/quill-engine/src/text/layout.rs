//! Greedy word-wrap layout of a phrase onto a fixed-width surface.
//!
//! Every character of the phrase gets a position, spaces included (they carry
//! underlines). A space that would start a wrapped line is dropped instead.
//! Words wider than the usable line are broken per character with an inserted
//! hyphen at each break.
//!
//! Layout is a pure function of its inputs. The guide render and the scoring
//! mask both call [`layout`] and must see identical results.

use crate::text::font::FontMetrics;

/// What a placed glyph represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// A character from the phrase (including literal hyphens).
    Text,
    /// A space from the phrase.
    Space,
    /// A hyphen inserted where a long word was broken.
    Hyphen,
}

/// One placed character. `(x, y)` is the top-left of its em box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub kind: GlyphKind,
}

/// One visual line of wrapped text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutLine {
    pub glyphs: Vec<PlacedGlyph>,
}

/// Spacing policy for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Inset on every side of the surface.
    pub padding: f32,
    /// Distance between the tops of consecutive lines.
    pub line_height: f32,
    /// Smallest surface height ever reported.
    pub min_height: f32,
    /// Extra writing room below the last line.
    pub footer_margin: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            padding: 20.0,
            line_height: 45.0,
            min_height: 400.0,
            footer_margin: 20.0,
        }
    }
}

/// Result of laying out a phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LayoutLine>,
    /// Surface height needed to show every line plus margins.
    pub total_height: f32,
    pub line_height: f32,
}

impl TextLayout {
    /// All placed glyphs in reading order.
    pub fn glyphs(&self) -> impl Iterator<Item = &PlacedGlyph> {
        self.lines.iter().flat_map(|line| line.glyphs.iter())
    }

    /// Phrase characters in placement order, without spaces and inserted hyphens.
    pub fn text_chars(&self) -> String {
        self.glyphs()
            .filter(|g| g.kind == GlyphKind::Text)
            .map(|g| g.ch)
            .collect()
    }
}

/// Lay out `phrase` across a surface `surface_width` pixels wide.
pub fn layout(
    phrase: &str,
    surface_width: f32,
    font: &FontMetrics,
    params: &LayoutParams,
) -> TextLayout {
    let mut lines = LineBuilder::new(surface_width, params);

    if !phrase.is_empty() {
        let space_w = font.advance(' ');
        let hyphen_w = font.advance('-');

        for (i, word) in phrase.split(' ').enumerate() {
            let word_w = font.text_width(word);
            let long_word = word_w > lines.usable();

            if i > 0 {
                if lines.at_wrapped_line_start() {
                    // a space never opens a wrapped line
                } else if lines.cursor + space_w + word_w <= lines.right {
                    lines.place(' ', space_w, GlyphKind::Space);
                } else if long_word && lines.cursor + space_w <= lines.right {
                    // the long word starts on this line and breaks later
                    lines.place(' ', space_w, GlyphKind::Space);
                } else if lines.has_content() {
                    lines.break_line();
                }
            }

            if long_word {
                lines.place_broken_word(word, font, hyphen_w);
            } else {
                for ch in word.chars() {
                    lines.place(ch, font.advance(ch), GlyphKind::Text);
                }
            }
        }
    }

    lines.finish(params)
}

struct LineBuilder {
    lines: Vec<LayoutLine>,
    current: LayoutLine,
    cursor: f32,
    y: f32,
    left: f32,
    right: f32,
    line_height: f32,
}

impl LineBuilder {
    fn new(surface_width: f32, params: &LayoutParams) -> Self {
        Self {
            lines: Vec::new(),
            current: LayoutLine::default(),
            cursor: params.padding,
            y: params.padding,
            left: params.padding,
            right: surface_width - params.padding,
            line_height: params.line_height,
        }
    }

    fn usable(&self) -> f32 {
        self.right - self.left
    }

    fn has_content(&self) -> bool {
        !self.current.glyphs.is_empty()
    }

    fn at_wrapped_line_start(&self) -> bool {
        !self.has_content() && !self.lines.is_empty()
    }

    fn place(&mut self, ch: char, width: f32, kind: GlyphKind) {
        self.current.glyphs.push(PlacedGlyph {
            ch,
            x: self.cursor,
            y: self.y,
            width,
            kind,
        });
        self.cursor += width;
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.cursor = self.left;
        self.y += self.line_height;
    }

    /// Place a word character by character, hyphenating at each overflow.
    ///
    /// A non-final character only goes on the line if a hyphen still fits
    /// after it; the final character only needs room for itself. A character
    /// on an empty line is always placed so layout makes progress on surfaces
    /// narrower than one glyph.
    fn place_broken_word(&mut self, word: &str, font: &FontMetrics, hyphen_w: f32) {
        let mut chars = word.chars().peekable();
        let mut placed_on_line = 0usize;

        while let Some(ch) = chars.next() {
            let w = font.advance(ch);
            let reserve = if chars.peek().is_some() { hyphen_w } else { 0.0 };

            if self.cursor + w + reserve > self.right && self.has_content() {
                if placed_on_line > 0 {
                    self.place('-', hyphen_w, GlyphKind::Hyphen);
                }
                self.break_line();
                placed_on_line = 0;
            }

            self.place(ch, w, GlyphKind::Text);
            placed_on_line += 1;
        }
    }

    fn finish(mut self, params: &LayoutParams) -> TextLayout {
        if self.has_content() {
            self.lines.push(self.current);
        }
        let content_height = self.lines.len() as f32 * params.line_height
            + 2.0 * params.padding
            + params.footer_margin;
        log::debug!(
            "layout: {} lines, content height {:.1}",
            self.lines.len(),
            content_height
        );
        TextLayout {
            total_height: content_height.max(params.min_height),
            line_height: params.line_height,
            lines: self.lines,
        }
    }
}
