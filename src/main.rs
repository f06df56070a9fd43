mod api;
mod app;
mod config;
mod error;
mod panels;
mod runtime;
mod state;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;
use crate::app::{App, AppOptions};
use crate::error::Result;
use crate::runtime::RuntimeBridge;
use crate::state::NavMode;
use crate::store::{UiState, UiStateStore};

#[derive(Debug, Parser)]
#[command(
    name = "dbdesk",
    version,
    about = "dbdesk: terminal navigation shell for a database client server"
)]
struct Args {
    /// Server base URL (e.g. http://127.0.0.1:10824)
    #[arg(long)]
    server: Option<String>,

    /// Desktop mode: remember the tab, never show a path
    #[arg(long)]
    desktop: bool,

    /// Initial path in addressable mode (e.g. /connections)
    #[arg(long)]
    path: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Send tracing output to the log file; the terminal belongs to the UI.
fn init_logging(log_path: Option<&Path>) {
    let filter = EnvFilter::try_from_env("DBDESK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let file = log_path.and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = store::paths::log_path();
    init_logging(log_path.as_deref());

    let config_path = args.config.clone().or_else(config::config_path);
    let config = config::load(args.config.as_deref()).with_overrides(args.server, args.desktop);
    tracing::info!(server = %config.server, desktop = config.desktop, "starting dbdesk");

    let store = match store::paths::ui_state_path() {
        Some(path) => UiStateStore::open(&path),
        None => UiStateStore::in_memory(UiState::default()),
    };

    let client = ApiClient::new(&config.server)?;
    let bridge = RuntimeBridge::new(Arc::new(client), config.request_timeout())?;

    let options = AppOptions {
        mode: if config.desktop {
            NavMode::Desktop
        } else {
            NavMode::Addressable
        },
        initial_path: args.path,
        github_url: config.github_url.clone(),
        server: config.server.clone(),
        config_path,
        log_path,
    };
    let mut app = App::new(store, options);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal, &bridge);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "event loop failed");
    }
    res?;
    Ok(())
}
