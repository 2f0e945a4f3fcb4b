//! Brief: a terminal front page for news headlines.
//!
//! Two feeds ("Latest News" and "Trending News") are fetched concurrently from
//! a news API, filtered to articles with images and shown on a single page
//! whose backdrop and content shift with a damped parallax as it scrolls.

pub mod app;
pub mod config;
pub mod keybindings;
pub mod news;
pub mod parallax;
pub mod theme;
pub mod ui;
pub mod util;
