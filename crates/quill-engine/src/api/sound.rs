use crate::api::types::SoundEvent;

/// Audio feedback capability owned by a game session.
pub trait SoundPlayer {
    fn play_success(&mut self);
    fn play_error(&mut self);
}

/// Queues sound events for the shell to play after each tick.
#[derive(Debug, Clone, Default)]
pub struct SoundQueue {
    pending: Vec<SoundEvent>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued sounds, oldest first.
    pub fn drain(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[SoundEvent] {
        &self.pending
    }
}

impl SoundPlayer for SoundQueue {
    fn play_success(&mut self) {
        self.pending.push(SoundEvent::SUCCESS);
    }

    fn play_error(&mut self) {
        self.pending.push(SoundEvent::ERROR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_records_in_order_and_drains() {
        let mut q = SoundQueue::new();
        q.play_error();
        q.play_success();
        assert_eq!(q.pending(), &[SoundEvent::ERROR, SoundEvent::SUCCESS]);
        assert_eq!(q.drain().len(), 2);
        assert!(q.pending().is_empty());
    }
}
