//! Page text for the Brief front page.
//!
//! The whole page is laid out here as pre-wrapped lines so the renderer never
//! wraps; the row count is exact, which the scroll limit depends on.

use crate::news::{Article, FeedKind, FeedState, LatestView};
use crate::theme::StyleMap;
use crate::util::{display_width, pad_to_width, strip_control_chars, truncate_to_width, wrap_to_width};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

const LOGO: &str = "Brief";
const NAV_ITEMS: [&str; 4] = ["Stories", "Creator", "Community", "Subscribe"];
const WRITE_LABEL: &str = " Write ";
const READ_MORE: &str = "Read more";
const SEE_ALL: &str = "See all";
const EMPTY_TRENDING: &str = "No trending articles found.";
const EMPTY_LATEST: &str = "No articles found.";

const ABOUT_HEADING: &str = "About Brief";
const ABOUT_TEXT: &str = "Brief is a virtual reality experience designed to help users explore, \
learn, and grow through engaging content. Brief is designed to be an immersive experience \
that simulates real-world environments, allowing users to engage with content in a more \
interactive and memorable way. Our platform is constantly evolving to include new features \
and functionalities that enhance the user experience.";
const ABOUT_VISIT: &str = "Visit our website at briefVR.com (https://www.briefvr.com/) for more information.";
const FUNCTIONALITIES_HEADING: &str = "Functionalities";
const FUNCTIONALITIES: [&str; 2] = [
    "Scroll inside the laptop screen to explore more content.",
    "Visit our website for more information.",
];
const CONTACT_HEADING: &str = "Contact Support";
const CONTACT_TEXT: &str = "Reach out to us with any questions or concerns.";
const CONTACT_ITEMS: [&str; 3] = [
    "Email: support@briefvr.com",
    "Phone: +91 88888-88888",
    "Address: 123 Virtual Reality Lane, San Francisco, CA 94105",
];

/// Gap between grid columns.
const GRID_GAP: usize = 2;
/// Title rows reserved per grid card.
const CARD_TITLE_ROWS: usize = 2;

/// Laid-out page.
#[derive(Debug, Default)]
pub struct PageText {
    pub lines: Vec<Line<'static>>,
    /// Row of each "Read more" link: Trending first, then Latest News.
    pub link_rows: Vec<usize>,
}

impl PageText {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn wrapped(&mut self, text: &str, width: usize, style: Style) {
        for row in wrap_to_width(text, width) {
            self.lines.push(Line::styled(row, style));
        }
    }

    fn heading(&mut self, text: &str, width: usize, styles: &StyleMap) {
        self.blank();
        self.push(Line::styled(text.to_string(), styles.resolve("heading")));
        self.push(Line::styled(
            "─".repeat(display_width(text).min(width)),
            styles.resolve("heading"),
        ));
    }

    fn link(&mut self, selected: bool, styles: &StyleMap) {
        let style = if selected {
            styles.resolve("link_selected")
        } else {
            styles.resolve("link")
        };
        self.link_rows.push(self.lines.len());
        self.push(Line::from(Span::styled(format!("{} →", READ_MORE), style)));
    }
}

/// Lays out the page for a content region `width` columns wide.
///
/// `selected` indexes the "Read more" links in page order.
pub fn build_page(
    feeds: &FeedState,
    selected: Option<usize>,
    styles: &StyleMap,
    width: usize,
) -> PageText {
    let width = width.max(1);
    let mut page = PageText::default();

    header(&mut page, styles, width);
    trending(&mut page, &feeds.trending, selected, styles, width);

    let offset = feeds.trending.len();
    let latest_selected = selected.and_then(|i| i.checked_sub(offset));
    latest(&mut page, feeds.latest_view(), latest_selected, styles, width);

    info(&mut page, styles, width);
    page
}

fn header(page: &mut PageText, styles: &StyleMap, width: usize) {
    let nav = NAV_ITEMS.join("  ");
    let write_width = display_width(WRITE_LABEL);
    let used = display_width(LOGO) + 4 + display_width(&nav);

    if used + GRID_GAP + write_width <= width {
        let mut spans = vec![
            Span::styled(LOGO, styles.resolve("logo")),
            Span::raw("    "),
        ];
        for (i, item) in NAV_ITEMS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*item, styles.resolve("nav")));
        }
        spans.push(Span::raw(" ".repeat(width - used - write_width)));
        spans.push(Span::styled(WRITE_LABEL, styles.resolve("write_button")));
        page.push(Line::from(spans));
    } else {
        // Narrow screens stack logo, nav and the write control
        page.push(Line::styled(LOGO, styles.resolve("logo")));
        page.wrapped(&nav, width, styles.resolve("nav"));
        page.push(Line::styled(WRITE_LABEL, styles.resolve("write_button")));
    }
}

fn trending(
    page: &mut PageText,
    articles: &[Article],
    selected: Option<usize>,
    styles: &StyleMap,
    width: usize,
) {
    page.heading(FeedKind::Trending.label(), width, styles);

    if articles.is_empty() {
        page.push(Line::styled(EMPTY_TRENDING, styles.resolve("empty")));
        return;
    }

    for (i, article) in articles.iter().enumerate() {
        if i > 0 {
            page.blank();
        }
        page.wrapped(&clean_title(article), width, styles.resolve("article_title"));
        if let Some(meta) = meta_line(article) {
            page.push(Line::styled(
                truncate_to_width(&meta, width).into_owned(),
                styles.resolve("article_meta"),
            ));
        }
        page.link(selected == Some(i), styles);
    }
}

fn latest(
    page: &mut PageText,
    view: LatestView<'_>,
    selected: Option<usize>,
    styles: &StyleMap,
    width: usize,
) {
    page.heading(FeedKind::Latest.label(), width, styles);

    match view {
        LatestView::Error(message) => page.wrapped(message, width, styles.resolve("error")),
        LatestView::Empty => page.push(Line::styled(EMPTY_LATEST, styles.resolve("empty"))),
        LatestView::Grid(articles) => grid(page, articles, selected, styles, width),
    }

    page.blank();
    page.push(Line::styled(SEE_ALL, styles.resolve("link")));
}

/// Number of grid columns that fit in `width`.
pub(super) fn grid_columns(width: usize) -> usize {
    match width {
        w if w >= 96 => 3,
        w if w >= 60 => 2,
        _ => 1,
    }
}

fn grid(
    page: &mut PageText,
    articles: &[Article],
    selected: Option<usize>,
    styles: &StyleMap,
    width: usize,
) {
    let columns = grid_columns(width);
    let col_width = (width.saturating_sub(GRID_GAP * (columns - 1)) / columns).max(1);

    for (row_index, row) in articles.chunks(columns).enumerate() {
        if row_index > 0 {
            page.blank();
        }

        let cards: Vec<Card> = row
            .iter()
            .enumerate()
            .map(|(col, article)| {
                let index = row_index * columns + col;
                Card::new(article, selected == Some(index), col_width)
            })
            .collect();

        let link_row = page.lines.len() + CARD_TITLE_ROWS + 1;
        for _ in &cards {
            page.link_rows.push(link_row);
        }

        for cell_row in 0..Card::HEIGHT {
            let mut spans = Vec::with_capacity(cards.len() * 2);
            for (col, card) in cards.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" ".repeat(GRID_GAP)));
                }
                let (text, role) = card.cell(cell_row);
                spans.push(Span::styled(pad_to_width(&text, col_width), styles.resolve(role)));
            }
            page.push(Line::from(spans));
        }
    }
}

/// One grid cell: title rows, meta row, link row.
struct Card {
    title: Vec<String>,
    meta: String,
    link: String,
    selected: bool,
}

impl Card {
    const HEIGHT: usize = CARD_TITLE_ROWS + 2;

    fn new(article: &Article, selected: bool, width: usize) -> Self {
        let mut title = wrap_to_width(&clean_title(article), width);
        if title.len() > CARD_TITLE_ROWS {
            let rest = title[CARD_TITLE_ROWS - 1..].join(" ");
            title.truncate(CARD_TITLE_ROWS - 1);
            title.push(truncate_to_width(&rest, width).into_owned());
        }
        let meta = meta_line(article).unwrap_or_default();
        Self {
            title,
            meta: truncate_to_width(&meta, width).into_owned(),
            link: truncate_to_width(&format!("{} →", READ_MORE), width).into_owned(),
            selected,
        }
    }

    fn cell(&self, row: usize) -> (String, &'static str) {
        match row {
            r if r < CARD_TITLE_ROWS => (
                self.title.get(r).cloned().unwrap_or_default(),
                "article_title",
            ),
            r if r == CARD_TITLE_ROWS => (self.meta.clone(), "article_meta"),
            _ if self.selected => (self.link.clone(), "link_selected"),
            _ => (self.link.clone(), "link"),
        }
    }
}

fn info(page: &mut PageText, styles: &StyleMap, width: usize) {
    let body = styles.resolve("body");

    page.heading(ABOUT_HEADING, width, styles);
    page.wrapped(ABOUT_TEXT, width, body);
    page.blank();
    page.wrapped(ABOUT_VISIT, width, body);

    page.heading(FUNCTIONALITIES_HEADING, width, styles);
    for item in FUNCTIONALITIES {
        bullet(page, item, width, body);
    }

    page.heading(CONTACT_HEADING, width, styles);
    page.wrapped(CONTACT_TEXT, width, body);
    for item in CONTACT_ITEMS {
        bullet(page, item, width, body);
    }
}

fn bullet(page: &mut PageText, text: &str, width: usize, style: Style) {
    let inner = width.saturating_sub(2).max(1);
    for (i, row) in wrap_to_width(text, inner).into_iter().enumerate() {
        let prefix = if i == 0 { "• " } else { "  " };
        page.push(Line::styled(format!("{}{}", prefix, row), style));
    }
}

fn clean_title(article: &Article) -> String {
    let title = strip_control_chars(&article.title);
    if title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        title.into_owned()
    }
}

/// "Source · 2024-05-01", or whichever half is known.
fn meta_line(article: &Article) -> Option<String> {
    match (article.source_name(), article.published_date()) {
        (Some(source), Some(date)) => Some(format!("{} · {}", strip_control_chars(source), date)),
        (Some(source), None) => Some(strip_control_chars(source).into_owned()),
        (None, Some(date)) => Some(date.to_string()),
        (None, None) => None,
    }
}

/// Page text without styling, one row per line.
pub fn render_plain(page: &PageText) -> String {
    let mut out = String::new();
    for line in &page.lines {
        let row: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{FetchError, FeedOutcome, Source, FEED_ERROR_MESSAGE};
    use crate::theme::ThemeVariant;
    use pretty_assertions::assert_eq;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            url: format!("https://a.example/{}", title),
            url_to_image: Some("https://img.example/x.jpg".to_string()),
            source: Some(Source {
                id: None,
                name: Some("Wire".to_string()),
            }),
            author: None,
            description: None,
            published_at: Some("2024-05-01T08:00:00Z".to_string()),
        }
    }

    fn state(latest: &[&str], trending: &[&str]) -> FeedState {
        let mut state = FeedState::default();
        state.apply(FeedOutcome {
            latest: Ok(latest.iter().map(|t| article(t)).collect()),
            trending: Ok(trending.iter().map(|t| article(t)).collect()),
        });
        state
    }

    fn plain(state: &FeedState, width: usize) -> String {
        let styles = StyleMap::from(ThemeVariant::Dark);
        render_plain(&build_page(state, None, &styles, width))
    }

    #[test]
    fn test_sections_in_order() {
        let text = plain(&state(&["Markets rally"], &["Storm warning"]), 80);

        let order = [
            "Brief",
            "Stories",
            "Write",
            "Trending News",
            "Storm warning",
            "Latest News",
            "Markets rally",
            "See all",
            "About Brief",
            "Functionalities",
            "Contact Support",
            "support@briefvr.com",
        ];
        let mut last = 0;
        for needle in order {
            let pos = text[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' missing or out of order", needle));
            last += pos;
        }
    }

    #[test]
    fn test_empty_feeds_show_placeholders() {
        let text = plain(&FeedState::default(), 80);
        assert!(text.contains(EMPTY_TRENDING));
        assert!(text.contains(EMPTY_LATEST));
        assert!(!text.contains(READ_MORE));
    }

    #[test]
    fn test_error_replaces_grid_but_not_trending() {
        let mut feeds = FeedState::default();
        feeds.apply(FeedOutcome {
            latest: Ok(vec![article("Hidden headline")]),
            trending: Ok(vec![article("Visible trend")]),
        });
        feeds.apply(FeedOutcome {
            latest: Err(FetchError::HttpStatus(500)),
            trending: Ok(vec![article("Visible trend")]),
        });

        let text = plain(&feeds, 80);
        assert!(text.contains(FEED_ERROR_MESSAGE));
        assert!(text.contains("Visible trend"));
        assert!(!text.contains("Hidden headline"));
        assert!(!text.contains(EMPTY_LATEST));
        assert_eq!(text.matches(READ_MORE).count(), 1);
    }

    #[test]
    fn test_link_rows_point_at_read_more() {
        let styles = StyleMap::from(ThemeVariant::Dark);
        let feeds = state(&["a", "b", "c"], &["t1", "t2"]);
        let page = build_page(&feeds, None, &styles, 70);
        let text = render_plain(&page);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), page.height());

        assert_eq!(page.link_rows.len(), 5);
        for row in &page.link_rows {
            assert!(lines[*row].contains(READ_MORE), "row {} is '{}'", row, lines[*row]);
        }
        // Two columns: "a" and "b" share a row
        assert_eq!(page.link_rows[2], page.link_rows[3]);
        assert!(page.link_rows[4] > page.link_rows[3]);
    }

    #[test]
    fn test_selected_link_styled() {
        let styles = StyleMap::from(ThemeVariant::Dark);
        let feeds = state(&[], &["t1", "t2"]);
        let page = build_page(&feeds, Some(1), &styles, 80);

        let selected_row = page.link_rows[1];
        let span = &page.lines[selected_row].spans[0];
        assert_eq!(span.style, styles.resolve("link_selected"));
        let other = &page.lines[page.link_rows[0]].spans[0];
        assert_eq!(other.style, styles.resolve("link"));
    }

    #[test]
    fn test_no_line_exceeds_width() {
        let long = "An exceptionally long headline that keeps going well past any sensible column width";
        let feeds = state(&[long, long, long, long], &[long]);
        for width in [24, 40, 64, 100] {
            let text = plain(&feeds, width);
            for line in text.lines() {
                assert!(
                    display_width(line) <= width,
                    "width {}: '{}' is {} wide",
                    width,
                    line,
                    display_width(line)
                );
            }
        }
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(40), 1);
        assert_eq!(grid_columns(60), 2);
        assert_eq!(grid_columns(120), 3);
    }

    #[test]
    fn test_meta_line_variants() {
        let mut a = article("x");
        assert_eq!(meta_line(&a).as_deref(), Some("Wire · 2024-05-01"));
        a.published_at = None;
        assert_eq!(meta_line(&a).as_deref(), Some("Wire"));
        a.source = None;
        assert_eq!(meta_line(&a), None);
    }
}
