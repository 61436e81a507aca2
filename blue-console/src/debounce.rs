//! Debounced input
//!
//! Keystrokes reset a fixed-delay deadline; only the last value before
//! a quiet window elapses is emitted. Keeps the search box from
//! producing a refetch per keystroke.

use std::time::{Duration, Instant};

/// Default quiet window before a search value is reported upstream
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke's value, resetting the deadline
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now + self.delay));
    }

    /// Emit the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop any pending value without emitting
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_last_value_after_quiet_window() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        // "jo" then "john" within the window: a single event with "john"
        debouncer.input("jo", start);
        debouncer.input("john", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(701)),
            Some("john".to_string())
        );
        // At most one emission per window
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn keystroke_resets_deadline() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        debouncer.input("a", start);
        // Just before expiry, another keystroke arrives
        debouncer.input("ab", start + Duration::from_millis(499));
        assert_eq!(debouncer.poll(start + Duration::from_millis(501)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(999)),
            Some("ab".to_string())
        );
    }

    #[test]
    fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        debouncer.input("x", start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
