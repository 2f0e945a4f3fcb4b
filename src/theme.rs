//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role of the page mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub logo: Style,
    pub nav: Style,
    pub write_button: Style,

    // -- Sections --
    pub heading: Style,
    pub body: Style,
    pub article_title: Style,
    pub article_meta: Style,
    pub link: Style,
    pub link_selected: Style,
    pub error: Style,
    pub empty: Style,

    // -- Chrome --
    pub bezel: Style,
    pub backdrop: Style,
    pub status_bar: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            logo: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            nav: Style::default().fg(Color::Gray),
            write_button: Style::default().fg(Color::Black).bg(Color::Gray),

            heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            body: Style::default(),
            article_title: Style::default().add_modifier(Modifier::BOLD),
            article_meta: Style::default().fg(Color::DarkGray),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            link_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            error: Style::default().fg(Color::Red),
            empty: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            bezel: Style::default().fg(Color::Gray),
            backdrop: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }

    fn light() -> Self {
        Self {
            logo: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            nav: Style::default().fg(Color::DarkGray),
            write_button: Style::default().fg(Color::White).bg(Color::Black),

            heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            body: Style::default().fg(Color::Black),
            article_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_meta: Style::default().fg(Color::DarkGray),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            link_selected: Style::default().bg(Color::Blue).fg(Color::White),
            error: Style::default().fg(Color::Red),
            empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            bezel: Style::default().fg(Color::DarkGray),
            backdrop: Style::default().fg(Color::Gray),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 14] = [
    "logo",
    "nav",
    "write_button",
    "heading",
    "body",
    "article_title",
    "article_meta",
    "link",
    "link_selected",
    "error",
    "empty",
    "bezel",
    "backdrop",
    "status_bar",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 14] = [
            p.logo,
            p.nav,
            p.write_button,
            p.heading,
            p.body,
            p.article_title,
            p.article_meta,
            p.link,
            p.link_selected,
            p.error,
            p.empty,
            p.bezel,
            p.backdrop,
            p.status_bar,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

impl From<ThemeVariant> for StyleMap {
    fn from(variant: ThemeVariant) -> Self {
        Self::from_palette(&variant.palette())
    }
}
