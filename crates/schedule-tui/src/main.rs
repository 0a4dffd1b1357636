mod action;
mod app;
mod app_state;
mod component;
mod components;
mod debounce;
mod theme;
mod widgets;

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};

use schedule_proto::config::Config;
use schedule_proto::html::render_page;
use schedule_proto::loader::load_document;
use schedule_proto::platform;
use schedule_proto::preference::ThemeStore;

use crate::app_state::AppState;

#[derive(Parser, Debug)]
#[command(name = "radio-schedule", version, about = "Weekly radio schedule grid")]
struct Cli {
    /// schedule.json location (URL or file path); overrides [source] location
    #[arg(short, long)]
    source: Option<String>,

    /// IANA timezone the schedule is published in; overrides [clock] timezone
    #[arg(short, long)]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Paint the grid once to a static HTML page and exit
    Render {
        /// Output file; defaults to [paths] html_out
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Search term to pre-filter the grid with
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("tui.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("radio-schedule log: {}", log_path.display());

    tracing::info!("radio-schedule starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });
    if let Some(source) = cli.source {
        config.source.location = source;
    }
    if let Some(tz) = cli.timezone {
        config.clock.timezone = tz;
    }

    match cli.command {
        Some(Command::Render { out, search }) => {
            let out = out.unwrap_or_else(|| config.paths.html_out.clone());
            render_html(&config, &search, &out).await
        }
        None => app::App::new(&config).run().await,
    }
}

/// One-shot: load, filter, resolve now, and write the page.
async fn render_html(config: &Config, search: &str, out: &Path) -> anyhow::Result<()> {
    let theme = ThemeStore::new(&config.paths.preferences_file).load(platform::os_prefers_dark());
    let mut state = AppState::new(
        config.source.location.clone(),
        config.clock.tz(),
        theme,
        Utc::now(),
    );
    match load_document(&config.source.location).await {
        Ok(doc) => state.apply_document(doc, Utc::now()),
        Err(e) => state.apply_load_error(&e),
    }
    state.apply_search(search);

    std::fs::write(out, render_page(&state.page_view()))?;
    tracing::info!("wrote {}", out.display());
    println!("{}", out.display());
    Ok(())
}
