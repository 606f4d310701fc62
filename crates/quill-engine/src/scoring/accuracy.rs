//! Coverage-based handwriting accuracy.
//!
//! Every committed ink point is a hit when its pixel (coordinates rounded
//! down) is on-glyph in the reference mask. The score is the rounded hit
//! percentage; points outside the mask are misses.

use crate::ink::capture::InkState;
use crate::raster::mask::ReferenceMask;

/// Minimum percentage needed to pass an attempt.
pub const PASS_THRESHOLD: u8 = 80;

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Rounded hit percentage, 0..=100.
    pub percent: u8,
    pub passed: bool,
    pub hits: usize,
    pub total: usize,
}

impl Score {
    /// Build a score from raw hit counts.
    ///
    /// Rounds half up; zero points score 0.
    pub fn from_counts(hits: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            ((200 * hits.min(total) + total) / (2 * total)) as u8
        };
        Self {
            percent,
            passed: percent >= PASS_THRESHOLD,
            hits,
            total,
        }
    }
}

/// Score committed ink against `mask`. Never mutates either.
pub fn score(ink: &InkState, mask: &ReferenceMask) -> Score {
    let mut hits = 0usize;
    let mut total = 0usize;

    for stroke in &ink.completed {
        for p in &stroke.points {
            total += 1;
            if p.x.is_finite()
                && p.y.is_finite()
                && mask.is_on_glyph(p.x.floor() as i64, p.y.floor() as i64)
            {
                hits += 1;
            }
        }
    }

    Score::from_counts(hits, total)
}
