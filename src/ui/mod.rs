//! Terminal User Interface module.
//!
//! This module provides the TUI for the Brief page, including:
//! - Main event loop (`run`)
//! - Keyboard and mouse wheel handling
//! - Page layout and rendering
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Key and mouse handling
//! - `events` - Background task event processing
//! - `page` - Page text layout (also used by `--print`)
//! - `render` - Screen, backdrop and status bar drawing
//! - `status` - Status bar widget

mod events;
mod input;
mod loop_runner;
mod page;
mod render;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
pub use page::{build_page, render_plain, PageText};
