use glam::Vec2;

/// One continuous pen-down-to-pen-up gesture, points in capture order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    pub points: Vec<Vec2>,
}

impl Stroke {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Recorded ink for one attempt.
///
/// `completed` only grows until [`InkCapture::reset`]; `active` is the stroke
/// being drawn while the pointer is down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InkState {
    pub completed: Vec<Stroke>,
    pub active: Option<Stroke>,
}

impl InkState {
    /// Total number of committed points (the active stroke is excluded).
    pub fn committed_points(&self) -> usize {
        self.completed.iter().map(Stroke::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.active.is_none()
    }
}

/// Pure recorder of freehand strokes.
///
/// Device filtering (stylus-only and the like) happens before events reach
/// this type; it records whatever it is given.
#[derive(Debug, Clone, Default)]
pub struct InkCapture {
    state: InkState,
}

impl InkCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `point`, discarding any unterminated active stroke.
    pub fn begin_stroke(&mut self, point: Vec2) {
        if self.state.active.is_some() {
            log::debug!("ink: discarding unterminated stroke");
        }
        self.state.active = Some(Stroke {
            points: vec![point],
        });
    }

    /// Append `point` to the active stroke. No-op when no stroke is active.
    pub fn extend_stroke(&mut self, point: Vec2) {
        if let Some(stroke) = self.state.active.as_mut() {
            stroke.points.push(point);
        }
    }

    /// Seal the active stroke into the completed list if it has any points.
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.state.active.take() {
            if !stroke.is_empty() {
                self.state.completed.push(stroke);
            }
        }
    }

    /// Discard all ink, completed and active.
    pub fn reset(&mut self) {
        self.state.completed.clear();
        self.state.active = None;
    }

    /// Whether a stroke is currently being drawn.
    pub fn is_drawing(&self) -> bool {
        self.state.active.is_some()
    }

    pub fn state(&self) -> &InkState {
        &self.state
    }

    /// Every committed point, stroke by stroke, in capture order.
    pub fn all_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.state
            .completed
            .iter()
            .flat_map(|stroke| stroke.points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_sealing_keeps_capture_order() {
        let mut ink = InkCapture::new();
        ink.begin_stroke(Vec2::new(1.0, 1.0));
        for i in 0..5 {
            ink.extend_stroke(Vec2::new(2.0 + i as f32, 1.0));
        }
        ink.end_stroke();

        let state = ink.state();
        assert_eq!(state.completed.len(), 1);
        assert!(state.active.is_none());
        let points = &state.completed[0].points;
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Vec2::new(1.0, 1.0));
        assert_eq!(points[5], Vec2::new(6.0, 1.0));
    }

    #[test]
    fn extend_without_begin_is_ignored() {
        let mut ink = InkCapture::new();
        ink.extend_stroke(Vec2::new(3.0, 3.0));
        assert!(ink.state().is_empty());
    }

    #[test]
    fn end_without_begin_is_ignored() {
        let mut ink = InkCapture::new();
        ink.end_stroke();
        ink.end_stroke();
        assert!(ink.state().completed.is_empty());
    }

    #[test]
    fn begin_discards_unterminated_stroke() {
        let mut ink = InkCapture::new();
        ink.begin_stroke(Vec2::new(0.0, 0.0));
        ink.extend_stroke(Vec2::new(1.0, 0.0));
        // pointer-up was lost
        ink.begin_stroke(Vec2::new(10.0, 10.0));
        ink.end_stroke();

        let state = ink.state();
        assert_eq!(state.completed.len(), 1);
        assert_eq!(state.completed[0].points, vec![Vec2::new(10.0, 10.0)]);
    }

    #[test]
    fn active_stroke_is_not_committed() {
        let mut ink = InkCapture::new();
        ink.begin_stroke(Vec2::ZERO);
        ink.end_stroke();
        ink.begin_stroke(Vec2::ONE);
        ink.extend_stroke(Vec2::ONE * 2.0);
        assert!(ink.is_drawing());
        assert_eq!(ink.all_points().count(), 1);
        assert_eq!(ink.state().committed_points(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut ink = InkCapture::new();
        ink.begin_stroke(Vec2::ZERO);
        ink.extend_stroke(Vec2::ONE);
        ink.end_stroke();
        ink.begin_stroke(Vec2::ONE);

        ink.reset();
        let once = ink.state().clone();
        ink.reset();
        assert_eq!(ink.state(), &once);
        assert_eq!(once, InkState::default());
    }
}
