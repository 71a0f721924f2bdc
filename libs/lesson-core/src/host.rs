//! The callback surface a lesson view may use.
//!
//! Views never see the host application itself, only this trait. The host
//! decides how notifications are shown and where `go_back` leads.

use crate::theme::Theme;
use crate::types::{LessonDescriptor, Reward, Severity};
use std::time::Duration;

/// Host callbacks available to lesson builders and views.
pub trait LessonHost {
    /// Current theme. Read it when needed; it changes when the user toggles it.
    fn theme(&self) -> Theme;

    /// Record one completion, grant the reward and return to the catalog page.
    fn complete_lesson(&mut self, descriptor: &LessonDescriptor, reward: Reward, message: &str);

    /// Return to the last top-level page without touching the profile.
    fn go_back(&mut self);

    /// Show a transient notification, replacing any visible one.
    fn notify(&mut self, message: &str, severity: Severity, duration: Duration);

    /// Whether the profile owns a shop item.
    fn has_item(&self, item_id: &str) -> bool;
}
