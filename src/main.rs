use anyhow::{Context, Result};
use brief::app::{App, AppEvent};
use brief::config::{Config, API_KEY_ENV};
use brief::news::{http_client, FeedLoader, FeedState, NewsClient};
use brief::theme::{StyleMap, ThemeVariant};
use brief::ui;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Column width used by `--print` when the terminal size is unknown.
const PRINT_WIDTH: usize = 80;

/// Get the config directory path (~/.config/brief/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("brief"))
}

#[derive(Parser, Debug)]
#[command(name = "brief", about = "Terminal front page for news headlines")]
struct Args {
    /// Config file (default: ~/.config/brief/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load once and print the page to stdout instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Theme override ("dark" or "light")
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,
}

fn resolve_theme(cli: Option<&str>, config: &str) -> ThemeVariant {
    let name = cli.unwrap_or(config);
    ThemeVariant::from_str_name(name).unwrap_or_else(|| {
        tracing::warn!(theme = %name, "Unknown theme, falling back to dark");
        ThemeVariant::Dark
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; the TUI owns stdout. Silent unless RUST_LOG is set,
    // except in --print mode where warnings are useful.
    let default_filter = if args.print { "warn" } else { "off" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    tracing::debug!(?config, "Effective configuration");

    let api_key = config.resolve_api_key(std::env::var(API_KEY_ENV).ok());
    let http = http_client().context("Failed to build HTTP client")?;
    let client = NewsClient::from_config(http, &config).context("Invalid base_url in config")?;
    let loader = Arc::new(FeedLoader::new(client, api_key));
    let theme = resolve_theme(args.theme.as_deref(), &config.theme);

    if args.print {
        return print_page(&loader, theme).await;
    }

    let mut app = App::new(loader, theme);
    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!(%warning, "Keybinding override skipped");
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::run(&mut app, event_tx, event_rx).await?;
    Ok(())
}

/// `--print`: one load, page text to stdout.
async fn print_page(loader: &FeedLoader, theme: ThemeVariant) -> Result<()> {
    let mut feeds = FeedState::default();
    if let Some(outcome) = loader.load().await {
        feeds.apply(outcome);
    }

    let width = crossterm::terminal::size()
        .map(|(w, _)| usize::from(w).clamp(40, 120))
        .unwrap_or(PRINT_WIDTH);
    let page = ui::build_page(&feeds, None, &StyleMap::from(theme), width);
    print!("{}", ui::render_plain(&page));
    Ok(())
}
