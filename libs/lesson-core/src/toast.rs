//! Single-slot notifications.

use crate::types::Severity;
use std::time::{Duration, Instant};

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

/// Holds at most one toast. Showing another replaces it and restarts the timer.
#[derive(Debug, Clone, Default)]
pub struct ToastSlot {
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, duration: Duration, now: Instant) {
        self.current = Some(Toast {
            message: message.into(),
            severity,
            shown_at: now,
            expires_at: now + duration,
        });
    }

    /// Dismiss the toast once its deadline has passed. Returns true if it just hid.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .map_or(false, |toast| now >= toast.expires_at);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
