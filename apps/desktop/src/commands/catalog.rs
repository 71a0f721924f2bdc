//! Lesson listing, opening and reloading.

use crate::commands::CommandError;
use crate::navigation::Page;
use crate::state::AppState;
use lesson_core::{
    Catalog, CatalogEntry, LessonHost, LessonRegistry, LessonView, RegistryError, Severity, Surface,
};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

/// Lessons listed on `page`, in catalog order.
pub fn page_lessons(catalog: &Catalog, page: Page) -> Vec<&CatalogEntry> {
    match page.category() {
        Some(category) => catalog.in_category(category).collect(),
        None => Vec::new(),
    }
}

/// Find a lesson by its 1-based position on `page`, or by id.
pub fn resolve<'a>(catalog: &'a Catalog, page: Page, selector: &str) -> Option<&'a CatalogEntry> {
    if let Ok(n) = selector.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| page_lessons(catalog, page).get(i).copied());
    }
    catalog.get(selector)
}

const ERROR_TOAST: Duration = Duration::from_millis(3200);

/// Build the selected lesson and switch the screen to it.
///
/// An unknown selector or a builder failure is shown as an error toast and the
/// page stays as it was.
pub fn open_lesson(
    state: &mut AppState,
    catalog: &Catalog,
    surface: &Surface,
    selector: &str,
) -> Result<Box<dyn LessonView>, CommandError> {
    let page = state.nav.last_page();
    let Some(entry) = resolve(catalog, page, selector) else {
        let err = CommandError::new(format!("No lesson '{selector}' here."));
        state.notify(&err.message, Severity::Error, ERROR_TOAST);
        return Err(err);
    };

    match entry.builder.build(surface, &*state, &entry.descriptor) {
        Ok(view) => {
            info!(lesson = %entry.descriptor.id, builder = entry.builder.name(), "lesson opened");
            state.nav.enter_lesson(entry.descriptor.id.clone());
            state.slide_page();
            Ok(view)
        }
        Err(e) => {
            error!(lesson = %entry.descriptor.id, error = %e, "lesson failed to build");
            let err = CommandError::from(e);
            state.notify(&err.message, Severity::Error, ERROR_TOAST);
            Err(err)
        }
    }
}

/// Rescan the lessons directory. On failure the old catalog stays in use.
pub fn reload_lessons(
    state: &mut AppState,
    registry: &LessonRegistry,
    dir: &Path,
) -> Result<Catalog, CommandError> {
    report_reload(state, registry.scan(dir))
}

fn report_reload(
    state: &mut AppState,
    scanned: Result<Catalog, RegistryError>,
) -> Result<Catalog, CommandError> {
    match scanned {
        Ok(catalog) => {
            info!(lessons = catalog.len(), skipped = catalog.diagnostics().len(), "lessons reloaded");
            state.notify("Lessons reloaded.", Severity::Info, Duration::from_millis(1600));
            Ok(catalog)
        }
        Err(e) => {
            error!(error = %e, "lesson reload failed");
            let err = CommandError::from(e);
            state.notify(&err.message, Severity::Error, ERROR_TOAST);
            Err(err)
        }
    }
}
