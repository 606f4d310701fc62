//! Spell practice session: guide text, freehand ink and coverage scoring.
//!
//! Phases run `Idle -> Drawing -> Scoring -> {Retry, Complete}`. A failed
//! attempt clears the ink and waits in `Retry` until the next stroke; a pass
//! either starts the next round or completes the session. `Closed` is the
//! abandoned terminal phase.
//!
//! Resizing relayouts the guide text but leaves existing ink where it was
//! drawn. Strokes are not reflowed, so ink drawn before a resize may score
//! lower against the new layout.

use glam::Vec2;
use serde::Serialize;

use crate::api::game::{EngineContext, Game, GameConfig, PracticeGame};
#[cfg(feature = "vectors")]
use crate::api::game::RenderContext;
use crate::api::sound::{SoundPlayer, SoundQueue};
use crate::api::types::GameEvent;
use crate::config::{SpellConfig, MAX_SURFACE_WIDTH};
use crate::error::QuillError;
use crate::ink::capture::{InkCapture, InkState};
use crate::input::queue::{InputEvent, InputQueue, PointerKind};
use crate::raster::mask::ReferenceMask;
#[cfg(feature = "vectors")]
use crate::raster::vector::{VectorColor, VectorState};
use crate::scoring::accuracy::{self, Score};
use crate::text::font::{FontMetrics, StrokeFont};
use crate::text::layout::{self, TextLayout};
#[cfg(feature = "vectors")]
use crate::text::layout::GlyphKind;

// Game event kinds (Rust -> shell)
pub const EVENT_SCORE: f32 = 1.0;
pub const EVENT_ROUND: f32 = 2.0;
pub const EVENT_RESIZED: f32 = 3.0;
pub const EVENT_CLOSED: f32 = 4.0;

// Custom event kinds (shell -> Rust)
pub const CUSTOM_FINISH: u32 = 1;
pub const CUSTOM_RESET: u32 = 2;
pub const CUSTOM_CLOSE: u32 = 3;
pub const CUSTOM_RESIZE: u32 = 4;
pub const CUSTOM_STYLUS_ONLY: u32 = 5;

#[cfg(feature = "vectors")]
const GUIDE_ALPHA: f32 = 0.25;
#[cfg(feature = "vectors")]
const UNDERLINE_WIDTH: f32 = 1.5;

/// Session phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellPhase {
    Idle,
    Drawing,
    Scoring,
    Retry,
    Complete,
    Closed,
}

impl SpellPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SpellPhase::Complete | SpellPhase::Closed)
    }
}

/// Result of the last scored attempt, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed { percent: u8 },
    Failed { percent: u8 },
}

impl Verdict {
    pub fn percent(self) -> u8 {
        match self {
            Verdict::Passed { percent } | Verdict::Failed { percent } => percent,
        }
    }

    pub fn message(self) -> String {
        match self {
            Verdict::Passed { percent } => format!("Great job! Accuracy: {percent}%"),
            Verdict::Failed { percent } => format!("Try again! Accuracy: {percent}%"),
        }
    }
}

/// One passed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: u32,
    /// Finish presses in this round, the passing one included.
    pub attempts: u32,
    pub best_percent: u8,
    pub final_percent: u8,
}

/// Session record handed to the shell once it is over (or on request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub phrase: String,
    pub repeat_count: u32,
    pub completed: bool,
    pub rounds: Vec<RoundSummary>,
}

pub struct SpellGame<P = SoundQueue> {
    phrase: String,
    config: SpellConfig,
    font: StrokeFont,
    ink: InkCapture,
    phase: SpellPhase,
    surface_width: f32,
    surface_height: f32,
    sound: P,
    on_close: Option<Box<dyn FnOnce()>>,
    close_reported: bool,
    last_verdict: Option<Verdict>,
    rounds: Vec<RoundSummary>,
    round_attempts: u32,
    round_best: u8,
    events: Vec<GameEvent>,
}

impl<P: SoundPlayer> SpellGame<P> {
    /// Start a visible session for `phrase` using the built-in font.
    pub fn new(phrase: &str, config: SpellConfig, sound: P) -> Result<Self, QuillError> {
        Ok(Self::with_font(phrase, config, sound, StrokeFont::builtin()?))
    }

    pub fn with_font(phrase: &str, config: SpellConfig, sound: P, font: StrokeFont) -> Self {
        let config = config.sanitized();
        let mut game = Self {
            phrase: phrase.to_string(),
            surface_width: config.surface_width,
            surface_height: config.min_surface_height,
            config,
            font,
            ink: InkCapture::new(),
            phase: SpellPhase::Idle,
            sound,
            on_close: None,
            close_reported: false,
            last_verdict: None,
            rounds: Vec::new(),
            round_attempts: 0,
            round_best: 0,
            events: Vec::new(),
        };
        game.surface_height = game.layout().total_height;
        log::info!(
            "spell session: {:?} on {}x{} ({} rounds)",
            game.phrase,
            game.surface_width,
            game.surface_height,
            game.config.repeat_count
        );
        game
    }

    /// Callback run once when the session completes or is closed.
    pub fn with_on_close(mut self, on_close: impl FnOnce() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn metrics(&self) -> FontMetrics<'_> {
        FontMetrics::new(&self.font, self.config.font_size, self.config.font_weight)
    }

    /// The one layout both the guide render and scoring use.
    pub fn layout(&self) -> TextLayout {
        layout::layout(
            &self.phrase,
            self.surface_width,
            &self.metrics(),
            &self.config.layout_params(),
        )
    }

    /// Fresh hit-test mask for `text`, sized to the current surface.
    pub fn reference_mask(&self, text: &TextLayout) -> ReferenceMask {
        ReferenceMask::rasterize(
            text,
            self.surface_width.ceil() as u32,
            self.surface_height.ceil() as u32,
            &self.metrics(),
        )
    }

    fn accepts(&self, pointer: PointerKind) -> bool {
        !self.phase.is_terminal() && (!self.config.stylus_only || pointer == PointerKind::Pen)
    }

    pub fn pointer_down(&mut self, pos: Vec2, pointer: PointerKind) {
        if !self.accepts(pointer) {
            return;
        }
        self.ink.begin_stroke(pos);
        self.phase = SpellPhase::Drawing;
    }

    pub fn pointer_move(&mut self, pos: Vec2, pointer: PointerKind) {
        if self.accepts(pointer) && self.phase == SpellPhase::Drawing {
            self.ink.extend_stroke(pos);
        }
    }

    pub fn pointer_up(&mut self, pointer: PointerKind) {
        if self.accepts(pointer) {
            self.ink.end_stroke();
        }
    }

    /// Score the committed ink. `None` once the session is over.
    pub fn finish(&mut self) -> Option<Score> {
        if self.phase.is_terminal() {
            return None;
        }
        self.phase = SpellPhase::Scoring;

        let text = self.layout();
        let mask = self.reference_mask(&text);
        let result = accuracy::score(self.ink.state(), &mask);

        self.round_attempts += 1;
        self.round_best = self.round_best.max(result.percent);
        self.events.push(GameEvent::new(
            EVENT_SCORE,
            result.percent as f32,
            if result.passed { 1.0 } else { 0.0 },
            self.current_round() as f32,
        ));

        if result.passed {
            self.sound.play_success();
            self.last_verdict = Some(Verdict::Passed { percent: result.percent });
            self.complete_round(result.percent);
        } else {
            self.sound.play_error();
            self.last_verdict = Some(Verdict::Failed { percent: result.percent });
            self.ink.reset();
            self.phase = SpellPhase::Retry;
        }
        log::info!(
            "attempt scored {}% ({}/{} points), phase {:?}",
            result.percent,
            result.hits,
            result.total,
            self.phase
        );
        Some(result)
    }

    fn complete_round(&mut self, percent: u8) {
        let summary = RoundSummary {
            round: self.current_round(),
            attempts: self.round_attempts,
            best_percent: self.round_best,
            final_percent: percent,
        };
        self.rounds.push(summary);
        self.round_attempts = 0;
        self.round_best = 0;
        self.ink.reset();

        if self.rounds.len() as u32 >= self.config.repeat_count {
            self.phase = SpellPhase::Complete;
            log::info!("spell session complete after {} rounds", self.rounds.len());
            self.report_close();
        } else {
            self.phase = SpellPhase::Idle;
            self.events.push(GameEvent::new(
                EVENT_ROUND,
                self.current_round() as f32,
                self.config.repeat_count as f32,
                0.0,
            ));
        }
    }

    /// Discard all ink without scoring.
    pub fn reset(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.ink.reset();
        if self.phase != SpellPhase::Idle {
            self.phase = SpellPhase::Retry;
        }
    }

    /// Relayout for a new surface width. Existing ink is kept as drawn.
    pub fn resize(&mut self, surface_width: f32) {
        if self.phase.is_terminal() {
            return;
        }
        self.surface_width = surface_width.max(0.0).min(MAX_SURFACE_WIDTH);
        self.surface_height = self.layout().total_height;
        log::debug!("resized to {}x{}", self.surface_width, self.surface_height);
        self.events.push(GameEvent::new(
            EVENT_RESIZED,
            self.surface_width,
            self.surface_height,
            0.0,
        ));
    }

    /// Abandon the session.
    pub fn close(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = SpellPhase::Closed;
        log::info!("spell session closed");
        self.report_close();
    }

    /// Hiding a session closes it.
    pub fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.close();
        }
    }

    pub fn set_stylus_only(&mut self, stylus_only: bool) {
        self.config.stylus_only = stylus_only;
    }

    fn report_close(&mut self) {
        if self.close_reported {
            return;
        }
        self.close_reported = true;
        let completed = self.phase == SpellPhase::Complete;
        self.events.push(GameEvent::new(
            EVENT_CLOSED,
            if completed { 1.0 } else { 0.0 },
            0.0,
            0.0,
        ));
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
    }

    pub fn phase(&self) -> SpellPhase {
        self.phase
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn spell_config(&self) -> &SpellConfig {
        &self.config
    }

    pub fn ink(&self) -> &InkState {
        self.ink.state()
    }

    pub fn surface_size(&self) -> (f32, f32) {
        (self.surface_width, self.surface_height)
    }

    pub fn is_visible(&self) -> bool {
        !self.phase.is_terminal()
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    /// 1-based number of the round in progress (or the last one, once over).
    pub fn current_round(&self) -> u32 {
        let passed = self.rounds.len() as u32;
        if self.phase == SpellPhase::Complete {
            passed
        } else {
            passed + 1
        }
    }

    pub fn sound(&self) -> &P {
        &self.sound
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            phrase: self.phrase.clone(),
            repeat_count: self.config.repeat_count,
            completed: self.phase == SpellPhase::Complete,
            rounds: self.rounds.clone(),
        }
    }

    /// Cap line, x-height line and baseline of layout line `line_index`.
    pub fn guide_rule_ys(&self, line_index: usize) -> [f32; 3] {
        let meta = &self.font.meta;
        let top = self.config.padding + line_index as f32 * self.config.line_height();
        let size = self.config.font_size;
        [
            top + meta.cap_top * size,
            top + meta.x_height_top * size,
            top + meta.baseline * size,
        ]
    }

    /// Repaint guide text, underlines and ink.
    #[cfg(feature = "vectors")]
    pub fn draw(&self, vectors: &mut VectorState) {
        let text = self.layout();
        let metrics = self.metrics();
        let size = metrics.size;
        let padding = self.config.padding;
        let rule_color = VectorColor::rgba8(200, 210, 225, 255);
        let guide_color = VectorColor::BLACK.with_alpha(GUIDE_ALPHA);
        let underline_color = VectorColor::rgba8(90, 90, 90, 90);
        let ink_color = VectorColor::rgba8(0, 122, 217, 255);

        for k in 0..text.lines.len() {
            let [cap, x_height, baseline] = self.guide_rule_ys(k);
            let left = Vec2::new(padding, 0.0);
            let right = Vec2::new(self.surface_width - padding, 0.0);
            for (y, color) in [
                (cap, rule_color.with_alpha(0.5)),
                (x_height, rule_color.with_alpha(0.5)),
                (baseline, rule_color),
            ] {
                let dy = Vec2::new(0.0, y);
                vectors.stroke_line(left + dy, right + dy, 1.0, color);
            }
        }

        for glyph in text.glyphs() {
            let underline_y = glyph.y + self.font.meta.descent * size + UNDERLINE_WIDTH;
            vectors.stroke_line(
                Vec2::new(glyph.x, underline_y),
                Vec2::new(glyph.x + glyph.width, underline_y),
                UNDERLINE_WIDTH,
                underline_color,
            );
            if glyph.kind == GlyphKind::Space {
                continue;
            }
            for stroke in metrics.glyph_strokes(glyph.ch, Vec2::new(glyph.x, glyph.y)) {
                vectors.stroke_polyline(&stroke, metrics.pen_width(), guide_color);
            }
        }

        let ink = self.ink.state();
        for stroke in ink.completed.iter().chain(ink.active.as_ref()) {
            vectors.stroke_polyline(&stroke.points, self.config.ink_width, ink_color);
        }
    }
}

impl SpellGame<SoundQueue> {
    fn flush(&mut self, ctx: &mut EngineContext) {
        for sound in self.sound.drain() {
            ctx.emit_sound(sound);
        }
        for event in self.take_events() {
            ctx.emit_event(event);
        }
    }

    fn handle_custom(&mut self, kind: u32, a: f32) {
        match kind {
            CUSTOM_FINISH => {
                self.finish();
            }
            CUSTOM_RESET => self.reset(),
            CUSTOM_CLOSE => self.close(),
            CUSTOM_RESIZE => self.resize(a),
            CUSTOM_STYLUS_ONLY => self.set_stylus_only(a != 0.0),
            _ => log::warn!("unknown custom event kind {kind}"),
        }
    }
}

impl PracticeGame for SpellGame<SoundQueue> {
    fn from_phrase(phrase: &str, config: SpellConfig) -> Result<Self, QuillError> {
        Self::new(phrase, config, SoundQueue::new())
    }
}

impl Game for SpellGame<SoundQueue> {
    fn config(&self) -> GameConfig {
        GameConfig {
            surface_width: self.surface_width,
            surface_height: self.surface_height,
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.events.push(GameEvent::new(
            EVENT_RESIZED,
            self.surface_width,
            self.surface_height,
            0.0,
        ));
        self.flush(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y, pointer } => {
                    self.pointer_down(Vec2::new(x, y), pointer)
                }
                InputEvent::PointerMove { x, y, pointer } => {
                    self.pointer_move(Vec2::new(x, y), pointer)
                }
                InputEvent::PointerUp { pointer, .. } => self.pointer_up(pointer),
                InputEvent::Custom { kind, a, .. } => self.handle_custom(kind, a),
            }
        }
        self.flush(ctx);
    }

    #[cfg(feature = "vectors")]
    fn render(&self, ctx: &mut RenderContext) {
        self.draw(ctx.vectors);
    }

    fn status_message(&self) -> Option<String> {
        self.last_verdict.map(Verdict::message)
    }

    fn summary_json(&self) -> Option<String> {
        serde_json::to_string(&self.summary()).ok()
    }
}
