//! # vtracker
//!
//! A terminal dashboard for competitive leaderboards and the weapon skin catalog.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
#[cfg(not(target_arch = "wasm32"))]
use ratatui::{Terminal, backend::CrosstermBackend};
#[cfg(not(target_arch = "wasm32"))]
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::str::FromStr;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use vtracker::api::{self, blocking::ApiClient};
#[cfg(not(target_arch = "wasm32"))]
use vtracker::app_core::{route::Route, state::AppState};
#[cfg(not(target_arch = "wasm32"))]
use vtracker::config::{self, Settings};
#[cfg(not(target_arch = "wasm32"))]
use vtracker::model::{Language, Region};
#[cfg(not(target_arch = "wasm32"))]
use vtracker::runtime::native::{self, fetcher::Fetcher};
#[cfg(not(target_arch = "wasm32"))]
use vtracker::{logging, theme};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "vtracker: a terminal dashboard for competitive leaderboards.\n\
                  Browse ranked players by region, episode and act, and search the weapon skin catalog."
)]
struct Args {
    /// Stats API base URL (defaults to $VTRACKER_API_BASE, then http://localhost:5001/api)
    #[arg(long)]
    api_base: Option<String>,

    /// Leaderboard region (br, na, eu, ap, kr, latam)
    #[arg(short, long)]
    region: Option<Region>,

    /// Catalog and content language (pt-BR, en-US, es-ES)
    #[arg(short, long)]
    language: Option<Language>,

    /// Initial page, e.g. /leaderboard, /skins, /skins/search or /skins/weapon/<uuid>
    #[arg(long)]
    route: Option<String>,

    /// UI theme (dracula, solarized, gruvbox)
    #[arg(short, long)]
    theme: Option<String>,

    /// HTTP timeout in seconds (defaults to $VTRACKER_HTTP_TIMEOUT_SECS, then 10)
    #[arg(long)]
    timeout: Option<u64>,

    /// Show the paths and effective settings used by the application
    #[arg(long)]
    config: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::from_env();

    if let Some(base) = args.api_base.as_deref().map(str::trim)
        && !base.is_empty()
    {
        settings.api_base = base.to_string();
    }
    if let Some(secs) = args.timeout.filter(|secs| *secs > 0) {
        settings.http_timeout = Duration::from_secs(secs);
    }
    if let Some(region) = args.region {
        settings.region = region;
    }
    if let Some(language) = args.language {
        settings.language = language;
    }
    if let Some(name) = args.theme.as_deref() {
        settings.theme = theme::Theme::from_str(name).map_err(anyhow::Error::msg)?;
    }
    if let Some(path) = args.route.as_deref() {
        settings.route = Route::parse(path).unwrap_or_else(|| {
            eprintln!("unknown route '{path}', opening the leaderboard");
            Route::default()
        });
    }
    Ok(settings)
}

#[cfg(not(target_arch = "wasm32"))]
fn print_config(settings: &Settings) -> Result<()> {
    println!("App Paths:");
    println!("  Data:     {}", config::data_dir()?.display());
    println!("  Log:      {}", config::log_path()?.display());
    println!("Settings:");
    println!("  API base: {}", settings.api_base);
    println!("  Timeout:  {}s", settings.http_timeout.as_secs());
    println!("  Region:   {}", settings.region);
    println!("  Language: {}", settings.language);
    println!("  Theme:    {}", settings.theme.name());
    println!("  Route:    {}", settings.route);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    let args = Args::parse();
    let app_version = format!("v{}", env!("CARGO_PKG_VERSION"));
    let settings = resolve_settings(&args)?;

    if args.config {
        return print_config(&settings);
    }

    logging::init(&config::log_path()?)?;
    tracing::info!(
        api_base = %settings.api_base,
        region = %settings.region,
        language = %settings.language,
        route = %settings.route,
        "starting"
    );

    let base = api::parse_base(&settings.api_base)
        .with_context(|| format!("invalid API base URL '{}'", settings.api_base))?;
    let client = ApiClient::new(base, settings.http_timeout).context("failed to build HTTP client")?;
    let fetcher = Fetcher::new(client);

    let mut app = AppState::new(
        settings.route.clone(),
        settings.theme.config(),
        app_version,
        settings.api_base.clone(),
        settings.region,
        settings.language,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = native::run(&mut terminal, &mut app, &fetcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "event loop failed");
    }
    res
}
