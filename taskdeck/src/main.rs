//! `TaskDeck` — terminal-native task board client.
//!
//! Launches the TUI and connects to the task board REST API.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Against a local API
//! cargo run --bin taskdeck
//!
//! # Against another server
//! cargo run --bin taskdeck -- --base-url https://tasks.example.com/api
//!
//! # Or via environment variable
//! TASKDECK_API_URL=https://tasks.example.com/api cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::ApiClient;
use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::net::{self, ApiCommand, ApiEvent};
use taskdeck::session::SessionStore;
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    // Fail before touching the terminal if the client cannot be built.
    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let session = match SessionStore::open(config.session_dir.clone()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, client, session, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ApiClient,
    session: SessionStore,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new().with_toast_ticks(config.toast_ticks);

    let (cmd_tx, mut evt_rx) = net::spawn_net(client, session, config.channel_capacity);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending ApiEvents (non-blocking).
        drain_api_events(&mut app, &mut evt_rx, &cmd_tx);

        // Step 3: Tick the toast timer.
        app.tick_toast();

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(ApiCommand) when a gesture
            // requires a server call (e.g., moving a task to another
            // column, signing in, marking notifications read).
            if let Some(command) = app.handle_key_event(key) {
                dispatch(&mut app, &cmd_tx, command);
            }
        }

        if app.should_quit {
            // Ask the networking task to shut down.
            let _ = cmd_tx.try_send(ApiCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `ApiEvent`s and apply them, dispatching follow-ups.
fn drain_api_events(
    app: &mut App,
    evt_rx: &mut mpsc::Receiver<ApiEvent>,
    cmd_tx: &mpsc::Sender<ApiCommand>,
) {
    while let Ok(event) = evt_rx.try_recv() {
        for command in app.apply_event(event) {
            dispatch(app, cmd_tx, command);
        }
    }
}

/// Sends a command to the networking task, surfacing backpressure.
fn dispatch(app: &mut App, cmd_tx: &mpsc::Sender<ApiCommand>, command: ApiCommand) {
    match cmd_tx.try_send(command) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            app.show_toast("Busy, action dropped. Try again", taskdeck::app::ToastKind::Error);
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.show_toast("Networking stopped", taskdeck::app::ToastKind::Error);
        }
    }
}
