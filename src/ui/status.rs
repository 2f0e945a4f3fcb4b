use crate::app::App;
use crate::keybindings::{Action, KeybindingRegistry};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Actions advertised in the idle status bar, with their labels.
const IDLE_HINTS: [(Action, &str); 5] = [
    (Action::NextLink, "next link"),
    (Action::OpenLink, "open"),
    (Action::Reload, "reload"),
    (Action::CycleTheme, "theme"),
    (Action::Quit, "quit"),
];

const SELECTION_HINTS: [(Action, &str); 3] = [
    (Action::OpenLink, "open"),
    (Action::NextLink, "next"),
    (Action::Back, "clear"),
];

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    f.render_widget(
        Paragraph::new(status_text(app)).style(app.style("status_bar")),
        area,
    );
}

fn status_text(app: &App) -> Cow<'_, str> {
    if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_str())
    } else if app.loading {
        Cow::Borrowed("Loading news...")
    } else if let Some(article) = app.selected_article() {
        Cow::Owned(format!(
            "{} | {}",
            article.url,
            key_hints(&app.keybindings, &SELECTION_HINTS)
        ))
    } else {
        Cow::Owned(idle_hints(&app.keybindings))
    }
}

fn primary_key(registry: &KeybindingRegistry, action: Action) -> Option<String> {
    registry.keys_for(action).into_iter().next()
}

/// "[key]label" for each bound action; unbound actions are left out.
fn key_hints(registry: &KeybindingRegistry, hints: &[(Action, &str)]) -> String {
    hints
        .iter()
        .filter_map(|(action, label)| {
            primary_key(registry, *action).map(|key| format!("[{}]{}", key, label))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn idle_hints(registry: &KeybindingRegistry) -> String {
    let scroll = match (
        primary_key(registry, Action::ScrollDown),
        primary_key(registry, Action::ScrollUp),
    ) {
        (Some(down), Some(up)) => Some(format!("[{}/{}]scroll", down, up)),
        (Some(key), None) | (None, Some(key)) => Some(format!("[{}]scroll", key)),
        (None, None) => None,
    };

    let rest = key_hints(registry, &IDLE_HINTS);
    match scroll {
        Some(scroll) => format!("{} {}", scroll, rest),
        None => rest,
    }
}
