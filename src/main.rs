// ============================================================================
// IDEASPARK - capture, label and review ideas from the terminal
// ============================================================================
//
// MODULE STRUCTURE:
// 1. model / validate        - Ideas, comments, notifications, templates
// 2. storage / store         - Key/value persistence and the state store
// 3. analytics / views       - Read models for the pages
// 4. editor / export         - Form templates and CSV/text exports
// 5. route / app             - Pages, UI state, keyboard and mouse handling
// 6. ui / faq                - All rendering
// 7. config / errors / clock - Ambient plumbing
//
// Usage: IdeaSpark [PATH]   where PATH is a page such as /ideas or /analytics
// ============================================================================

mod analytics;
mod app;
mod clock;
mod config;
mod editor;
mod errors;
mod export;
mod faq;
mod model;
mod route;
mod storage;
mod store;
mod ui;
mod validate;
mod views;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;
use crate::route::Route;
use crate::storage::FileStorage;
use crate::store::IdeaStore;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Could not create {}", config.data_dir.display()))?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())
        .with_context(|| format!("Could not open {}", config.log_file().display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();
    Ok(())
}

fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config)?;

    tracing::info!("Starting IdeaSpark");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Export directory: {:?}", config.export_dir);

    let route = std::env::args()
        .nth(1)
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Landing);

    let storage = FileStorage::open(&config.data_dir)?;
    let store = IdeaStore::load(storage);
    let mut app = App::new(store, config.export_dir.clone(), route);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        event::DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = &res {
        tracing::error!("Terminal loop failed: {:#}", err);
    }
    tracing::info!("IdeaSpark stopped");
    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStorage>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app::handle_key(app, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => app::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
