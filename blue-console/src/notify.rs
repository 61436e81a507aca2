//! Toast notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen
const TOAST_TTL: Duration = Duration::from_secs(5);
/// Most toasts kept at once
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created: Instant,
}

/// Bounded stack of transient notifications
#[derive(Debug, Default)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::warn!("{message}"),
            _ => tracing::info!("{message}"),
        }
        self.toasts.push_back(Toast {
            level,
            message,
            created: Instant::now(),
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Drop expired toasts; called on every tick
    pub fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.duration_since(t.created) < TOAST_TTL);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_bounded() {
        let mut stack = ToastStack::new();
        for i in 0..10 {
            stack.info(format!("toast {i}"));
        }
        assert_eq!(stack.iter().count(), MAX_TOASTS);
        // Oldest were dropped
        assert_eq!(stack.iter().next().unwrap().message, "toast 6");
    }

    #[test]
    fn prune_drops_expired() {
        let mut stack = ToastStack::new();
        stack.error("boom");
        stack.prune(Instant::now() + Duration::from_secs(6));
        assert!(stack.is_empty());
    }
}
