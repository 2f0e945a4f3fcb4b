//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry; mouse wheel events
//! scroll the page directly.

use crate::app::{App, AppEvent};
use crate::keybindings::Action as KbAction;
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
use tokio::sync::mpsc;

use super::Action;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    let Some(action) = app.keybindings.action_for_key(code, modifiers) else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::Back => {
            // Esc first clears a link selection, then quits
            if app.selected_link.take().is_none() {
                return Ok(Action::Quit);
            }
        }
        KbAction::ScrollDown => app.surface.scroll_by(1),
        KbAction::ScrollUp => app.surface.scroll_by(-1),
        KbAction::PageDown => app.surface.scroll_by(page_rows(app)),
        KbAction::PageUp => app.surface.scroll_by(-page_rows(app)),
        KbAction::ScrollTop => app.surface.scroll_to(0),
        KbAction::ScrollBottom => {
            let bottom = app.surface.max_scroll();
            app.surface.scroll_to(bottom);
        }
        KbAction::NextLink => app.select_next_link(),
        KbAction::PrevLink => app.select_prev_link(),
        KbAction::OpenLink => open_selected(app),
        KbAction::Reload => {
            app.remount(event_tx);
            if !app.loading {
                app.set_status("No news API key configured");
            }
        }
        KbAction::CycleTheme => app.cycle_theme(),
    }

    Ok(Action::Continue)
}

/// Handle a mouse event. Only the wheel is used.
pub(super) fn handle_mouse(app: &mut App, kind: MouseEventKind) -> bool {
    match kind {
        MouseEventKind::ScrollDown => app.surface.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => app.surface.scroll_by(-WHEEL_ROWS),
        _ => return false,
    }
    true
}

/// Rows moved by PageUp/PageDown: one viewport less a line of overlap.
fn page_rows(app: &App) -> isize {
    let rows = app.viewport_rows.saturating_sub(1).max(1);
    isize::try_from(rows).unwrap_or(isize::MAX)
}

fn open_selected(app: &mut App) {
    let Some(url) = app.selected_article().map(|a| a.url.clone()) else {
        app.set_status("Select an article with Tab first");
        return;
    };

    // Validate before open::that() so only http(s) reaches the OS handler
    match validate_url_for_open(&url) {
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Refusing to open article link");
            app.set_status(e.to_string());
        }
        Ok(valid) => match open::that(valid.as_str()) {
            Ok(()) => app.set_status(format!("Opening {}", valid.host_str().unwrap_or("link"))),
            Err(e) => app.set_status(format!("Failed to open browser: {}", e)),
        },
    }
}
