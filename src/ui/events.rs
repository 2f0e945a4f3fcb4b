//! Application event handling.
//!
//! Processes results from background tasks: feed loads and task panics.

use crate::app::{App, AppEvent};

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FeedsLoaded {
            generation,
            outcome,
        } => {
            let failed = outcome.has_failure();
            if app.apply_feeds(generation, outcome) && failed {
                tracing::debug!(generation, "Feed load finished with errors");
            }
        }
        AppEvent::TaskPanicked {
            generation,
            task,
            error,
        } => {
            tracing::error!(generation, task, error, "Background task panicked");
            if app.fail_load(generation) {
                app.set_status(format!("Internal error in {} task", task));
            }
        }
    }
}
