//! Render functions for the TUI.
//!
//! The page is drawn as a "laptop screen": a bordered content region centered
//! over a decorative backdrop. Both move with the parallax translation.

use crate::app::App;
use crate::parallax::{ElementHandle, PageSurface};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::page::{build_page, PageText};
use super::status;

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Widest the screen region grows on large terminals.
const MAX_SCREEN_WIDTH: u16 = 120;
/// Columns of backdrop kept visible on each side when there is room.
const GUTTER: u16 = 4;

const BACKDROP_PATTERN: &str = "·  ╱  ·  ╲  ";

/// Main render function.
///
/// Lays out the page for the current screen width and updates the scroll
/// limit and link rows on `app` as a side effect.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Layout can clamp the scroll position, which moves both layers, so it
    // runs before anything is drawn.
    let screen = screen_rect(chunks[0]);
    let block = screen_block(app);
    let page = text_rect(block.inner(screen))
        .map(|text_area| (text_area, layout_page(app, text_area)));

    render_backdrop(f, app, chunks[0]);
    f.render_widget(block, screen);
    if let Some((text_area, page)) = page {
        render_page(f, app, page, text_area);
    }
    status::render(f, app, chunks[1]);
}

/// Centered region for the screen, leaving backdrop gutters when possible.
fn screen_rect(area: Rect) -> Rect {
    let max_width = area.width.saturating_sub(GUTTER * 2).max(MIN_WIDTH.min(area.width));
    let width = max_width.min(MAX_SCREEN_WIDTH);
    let x = area.x + (area.width - width) / 2;

    let (y, height) = if area.height > 12 {
        (area.y + 1, area.height - 2)
    } else {
        (area.y, area.height)
    };
    Rect::new(x, y, width, height)
}

fn render_backdrop(f: &mut Frame, app: &App, area: Rect) {
    let shift = app.surface.shift_rows(ElementHandle::Backdrop);
    let pattern: Vec<char> = BACKDROP_PATTERN.chars().collect();
    let period = pattern.len();

    // Pattern rows are derived from absolute row index so an upward shift
    // reads as the backdrop sliding.
    let lines: Vec<Line> = (shift..shift + area.height as usize)
        .map(|row| {
            let row_text: String = (0..area.width as usize)
                .map(|col| pattern[(col + row * 3) % period])
                .collect();
            Line::from(row_text)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).style(app.style("backdrop")), area);
}

fn screen_block(app: &App) -> Block<'static> {
    let title = if app.loading {
        " Brief · loading "
    } else {
        " Brief "
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(app.style("bezel"))
        .title(title)
}

/// Text region inside the bezel, with one column of padding on each side.
fn text_rect(inner: Rect) -> Option<Rect> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    Some(Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2).max(1),
        inner.height,
    ))
}

/// Builds the page for `text_area` and feeds its size back into `app`.
fn layout_page(app: &mut App, text_area: Rect) -> PageText {
    let mut page = build_page(
        &app.feeds,
        app.selected_link,
        app.style_map(),
        text_area.width as usize,
    );

    app.viewport_rows = text_area.height as usize;
    app.surface
        .set_max_scroll(PageSurface::scroll_limit(page.height(), app.viewport_rows));
    app.link_rows = std::mem::take(&mut page.link_rows);
    page
}

fn render_page(f: &mut Frame, app: &App, page: PageText, text_area: Rect) {
    let first_row = u16::try_from(app.surface.first_visible_row()).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(page.lines)
        .style(app.style("body"))
        .scroll((first_row, 0));
    f.render_widget(paragraph, text_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_rect_keeps_gutters() {
        let area = Rect::new(0, 0, 100, 30);
        let screen = screen_rect(area);
        assert_eq!(screen.width, 92);
        assert_eq!(screen.x, 4);
        assert_eq!(screen.height, 28);
    }

    #[test]
    fn test_screen_rect_caps_width() {
        let screen = screen_rect(Rect::new(0, 0, 200, 40));
        assert_eq!(screen.width, MAX_SCREEN_WIDTH);
        assert_eq!(screen.x, 40);
    }

    #[tokio::test]
    async fn test_backdrop_drawn_with_clamped_shift() {
        use crate::config::Config;
        use crate::news::{FeedLoader, NewsClient};
        use crate::theme::ThemeVariant;
        use ratatui::{backend::TestBackend, Terminal};
        use std::sync::Arc;
        use tokio::sync::mpsc;

        let pattern: Vec<char> = BACKDROP_PATTERN.chars().collect();

        // Two starting positions whose backdrop shifts differ by one row, so
        // at least one of them differs from the clamped shift in the pattern.
        for start in [10_000, 10_010] {
            let client =
                NewsClient::from_config(reqwest::Client::new(), &Config::default()).unwrap();
            let mut app = App::new(Arc::new(FeedLoader::new(client, None)), ThemeVariant::Dark);
            let (tx, _rx) = mpsc::channel(4);
            app.mount(&tx);
            app.surface.scroll_to(start);

            let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
            terminal.draw(|f| render(f, &mut app)).unwrap();

            let shift = app.surface.shift_rows(ElementHandle::Backdrop);
            assert!(app.surface.scroll_top() < start);

            let buffer = terminal.backend().buffer();
            for y in 0..4u16 {
                let expected = pattern[((shift + y as usize) * 3) % pattern.len()];
                assert_eq!(
                    buffer[(0, y)].symbol(),
                    expected.to_string(),
                    "row {} from start {}",
                    y,
                    start
                );
            }
        }
    }

    #[test]
    fn test_screen_rect_narrow_terminal() {
        let screen = screen_rect(Rect::new(0, 0, 44, 10));
        assert_eq!(screen.width, 40);
        assert_eq!(screen.height, 10);
    }
}
