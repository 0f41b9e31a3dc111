//! Card expand/collapse transitions
//!
//! A transition interpolates a card's height between two row counts. When it
//! reaches its target it reports `TransitionEvent::Finished` exactly once,
//! which is what hands keyboard focus to the card's label input.

use std::time::{Duration, Instant};

pub const COLLAPSED_HEIGHT: u16 = 3;
pub const EXPANDED_HEIGHT: u16 = 9;
pub const EXPAND_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Finished,
}

#[derive(Debug, Clone)]
pub struct Transition {
    from: u16,
    to: u16,
    started_at: Instant,
    duration: Duration,
    finished: bool,
}

impl Transition {
    pub fn new(from: u16, to: u16, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            finished: false,
        }
    }

    pub fn expand(now: Instant, animated: bool) -> Self {
        Self::new(COLLAPSED_HEIGHT, EXPANDED_HEIGHT, now, duration_for(animated))
    }

    pub fn collapse(now: Instant, animated: bool) -> Self {
        Self::new(EXPANDED_HEIGHT, COLLAPSED_HEIGHT, now, duration_for(animated))
    }

    /// Fraction of the way to the target, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn height(&self, now: Instant) -> u16 {
        let p = ease_out(self.progress(now));
        let from = f32::from(self.from);
        let to = f32::from(self.to);
        (from + (to - from) * p).round() as u16
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Step the transition. Returns `Finished` on the first call at or past
    /// the end, and `None` before and after that.
    pub fn advance(&mut self, now: Instant) -> Option<TransitionEvent> {
        if self.finished || self.progress(now) < 1.0 {
            return None;
        }
        self.finished = true;
        Some(TransitionEvent::Finished)
    }
}

fn duration_for(animated: bool) -> Duration {
    if animated {
        EXPAND_DURATION
    } else {
        Duration::ZERO
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_heights() {
        let start = Instant::now();
        let t = Transition::expand(start, true);
        assert_eq!(t.height(start), COLLAPSED_HEIGHT);
        assert_eq!(t.height(start + EXPAND_DURATION), EXPANDED_HEIGHT);
        let mid = t.height(start + EXPAND_DURATION / 2);
        assert!(mid > COLLAPSED_HEIGHT && mid < EXPANDED_HEIGHT);
    }

    #[test]
    fn test_collapse_heights() {
        let start = Instant::now();
        let t = Transition::collapse(start, true);
        assert_eq!(t.height(start), EXPANDED_HEIGHT);
        assert_eq!(t.height(start + Duration::from_secs(1)), COLLAPSED_HEIGHT);
    }

    #[test]
    fn test_finished_fires_once() {
        let start = Instant::now();
        let mut t = Transition::expand(start, true);
        assert_eq!(t.advance(start + Duration::from_millis(100)), None);
        assert!(!t.is_finished());
        assert_eq!(
            t.advance(start + EXPAND_DURATION),
            Some(TransitionEvent::Finished)
        );
        assert!(t.is_finished());
        assert_eq!(t.advance(start + EXPAND_DURATION * 2), None);
    }

    #[test]
    fn test_unanimated_finishes_immediately() {
        let start = Instant::now();
        let mut t = Transition::expand(start, false);
        assert_eq!(t.height(start), EXPANDED_HEIGHT);
        assert_eq!(t.advance(start), Some(TransitionEvent::Finished));
    }
}
