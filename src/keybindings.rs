//! Keybinding registry — maps keys to page actions with config overrides.
//!
//! Defaults cover the page's keys; the `[keybindings]` table in config.toml
//! rebinds an action to a different key.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Back,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ScrollTop,
    ScrollBottom,
    NextLink,
    PrevLink,
    OpenLink,
    Reload,
    CycleTheme,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Drops SHIFT where the key code already carries it ('G', BackTab).
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers - KeyModifiers::SHIFT)
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "PageUp", "Home"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.chars().count() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    // Named keys (case-insensitive)
    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    // Function keys
    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        if (1..=12).contains(&n) {
            return Some(KeySpec::plain(KeyCode::F(n)));
        }
        return None;
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec for display.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
pub struct KeybindingRegistry {
    lookup: HashMap<KeySpec, Action>,
    /// All bindings in registration order
    bindings: Vec<(KeySpec, Action)>,
}

impl KeybindingRegistry {
    /// Create a registry with the default page bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, key: KeySpec, action: Action) {
        let key = key.normalized();
        self.lookup.insert(key, action);
        self.bindings.push((key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;

        self.bind(KeySpec::plain(Char('q')), Action::Quit);
        self.bind(KeySpec::ctrl('c'), Action::Quit);
        self.bind(KeySpec::plain(Esc), Action::Back);

        // Scrolling
        self.bind(KeySpec::plain(Char('j')), Action::ScrollDown);
        self.bind(KeySpec::plain(Down), Action::ScrollDown);
        self.bind(KeySpec::plain(Char('k')), Action::ScrollUp);
        self.bind(KeySpec::plain(Up), Action::ScrollUp);
        self.bind(KeySpec::plain(PageDown), Action::PageDown);
        self.bind(KeySpec::plain(Char(' ')), Action::PageDown);
        self.bind(KeySpec::ctrl('d'), Action::PageDown);
        self.bind(KeySpec::plain(PageUp), Action::PageUp);
        self.bind(KeySpec::ctrl('u'), Action::PageUp);
        self.bind(KeySpec::plain(Home), Action::ScrollTop);
        self.bind(KeySpec::plain(Char('g')), Action::ScrollTop);
        self.bind(KeySpec::plain(End), Action::ScrollBottom);
        self.bind(KeySpec::plain(Char('G')), Action::ScrollBottom);

        // Links
        self.bind(KeySpec::plain(Tab), Action::NextLink);
        self.bind(KeySpec::plain(BackTab), Action::PrevLink);
        self.bind(KeySpec::plain(Enter), Action::OpenLink);
        self.bind(KeySpec::plain(Char('o')), Action::OpenLink);

        self.bind(KeySpec::plain(Char('r')), Action::Reload);
        self.bind(KeySpec::plain(Char('t')), Action::CycleTheme);
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "next_link").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). An override
    /// replaces every default key of that action.
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, a)| *a != action);
            self.bind(key, action);

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a key event.
    pub fn action_for_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.lookup
            .get(&KeySpec::new(code, modifiers).normalized())
            .copied()
    }

    /// Key display strings bound to `action`, in registration order.
    pub fn keys_for(&self, action: Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(key, _)| format_key(key))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "back" => Some(Action::Back),
        "scroll_down" | "scrolldown" | "down" => Some(Action::ScrollDown),
        "scroll_up" | "scrollup" | "up" => Some(Action::ScrollUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "scroll_top" | "scrolltop" | "top" => Some(Action::ScrollTop),
        "scroll_bottom" | "scrollbottom" | "bottom" => Some(Action::ScrollBottom),
        "next_link" | "nextlink" => Some(Action::NextLink),
        "prev_link" | "prevlink" => Some(Action::PrevLink),
        "open_link" | "openlink" | "open" => Some(Action::OpenLink),
        "reload" | "refresh" => Some(Action::Reload),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
