//! Hotelier - a terminal client for the hotel management backend.
//!
//! Guests browse rooms and categories; admins get a dashboard whose every
//! page sits behind the session guard.

mod app;
mod edit;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hotelier_core::auth::GuardDecision;
use hotelier_core::config::Config;
use hotelier_core::Route;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written under the cache directory
const LOG_FILE: &str = "hotelier.log";

const USAGE: &str = "\
Usage: hotelier [OPTION]

Options:
  --login          Log in from the command line
  --logout         Forget the stored session token and remembered password
  --whoami         Show who the stored token belongs to and what the admin guard
                   decides. Read only: the token is kept even when refused
  --open <PATH>    Start on a page, e.g. /admin/users
  --help           Show this message

Environment:
  HOTELIER_BACKEND_URL   Backend base URL (default http://localhost:5000)
  HOTELIER_EMAIL         Prefill the login e-mail
  HOTELIER_PASSWORD      Prefill the login password
  RUST_LOG               Log filter, e.g. RUST_LOG=hotelier_core=debug";

/// Initialize the tracing subscriber.
///
/// The terminal belongs to the UI, so logs go to a file in the cache
/// directory. Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config.cache_dir().ok()?;
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

fn load_config() -> Config {
    match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config ({}), using defaults", e);
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = load_config();
    let _log_guard = init_tracing(&config);

    let args: Vec<String> = std::env::args().collect();
    let mut start_path: Option<String> = None;
    match args.get(1).map(String::as_str) {
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some("--login") => return App::new(config)?.login_interactive().await,
        Some("--logout") => return logout(config),
        Some("--whoami") => return whoami(config),
        Some("--open") => match args.get(2) {
            Some(path) => start_path = Some(path.clone()),
            None => anyhow::bail!("--open needs a path\n\n{}", USAGE),
        },
        Some(other) => anyhow::bail!("Unknown option: {}\n\n{}", other, USAGE),
        None => {}
    }

    info!("Hotelier starting");

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    match start_path {
        Some(path) => app.open_path(&path).await,
        None => app.open(Route::Home).await,
    }

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Hotelier shutting down");
    Ok(())
}

fn logout(config: Config) -> Result<()> {
    let mut app = App::new(config)?;
    app.session.logout()?;
    app.forget_credentials();
    println!("Logged out.");
    Ok(())
}

/// Print the stored session and the admin guard's verdict on it.
fn whoami(config: Config) -> Result<()> {
    let app = App::new(config)?;

    match app.session.claims() {
        Some(claims) => {
            println!("Signed in as {} ({})", claims.display_name(), claims.role);
            if let Some(expires) = claims.expires_at() {
                println!("Token expires {}", expires.to_rfc3339());
            }
        }
        None => println!("Not signed in"),
    }

    let outcome = app.session.inspect_admin();
    match outcome.decision {
        GuardDecision::Valid => println!("Admin dashboard: allowed"),
        decision => {
            let target = decision.redirect().map(|r| r.path()).unwrap_or_default();
            println!("Admin dashboard: refused, redirect to {}", target);
            if let Some(notice) = outcome.notice {
                println!("  {}", notice);
            }
            if outcome.clear_token {
                info!(?decision, "Stored token would be discarded on the next admin visit");
                println!("  Stored token is unusable and will be discarded on the next admin visit");
            }
        }
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
