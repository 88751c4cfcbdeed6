//! `TaskDeck` stub server — in-memory task board API.
//!
//! An axum REST server backing the client during development and in
//! integration tests. All state lives in memory and is lost on exit.
//!
//! ```bash
//! # Run on default address 0.0.0.0:8080
//! cargo run --bin taskdeck-stub
//!
//! # Run on custom address
//! cargo run --bin taskdeck-stub -- --bind 127.0.0.1:9090
//!
//! # Or via environment variable
//! TASKDECK_STUB_ADDR=127.0.0.1:9090 cargo run --bin taskdeck-stub
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdeck_stub::config::{StubCliArgs, StubConfig};
use taskdeck_stub::server;
use taskdeck_stub::state::StubState;

#[tokio::main]
async fn main() {
    let cli = StubCliArgs::parse();

    let config = match StubConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskdeck stub server");

    let state = Arc::new(StubState::new());
    match server::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "stub server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "stub server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start stub server");
            std::process::exit(1);
        }
    }
}
