//! Settings commands.

use crate::state::AppState;
use lesson_core::{LessonHost, Severity, ThemeName};
use std::time::Duration;
use tracing::info;

pub fn theme_label(theme: ThemeName) -> &'static str {
    match theme {
        ThemeName::Light => "Light",
        ThemeName::Dark => "Dark",
    }
}

/// Flip between the light and dark themes and save the choice.
pub fn toggle_theme(state: &mut AppState) -> ThemeName {
    let theme = state.profile.settings.theme.toggled();
    state.profile.settings.theme = theme;
    state.persist();
    info!(theme = theme.as_str(), "theme changed");
    state.notify(
        &format!("Theme set to {}.", theme_label(theme)),
        Severity::Info,
        Duration::from_millis(1800),
    );
    theme
}
