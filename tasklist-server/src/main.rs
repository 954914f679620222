//! `tasklist-server` -- in-memory task store.
//!
//! # Usage
//!
//! ```bash
//! # Run on the default address 127.0.0.1:9400
//! cargo run --bin tasklist-server
//!
//! # Run on a custom address
//! cargo run --bin tasklist-server -- --bind 0.0.0.0:8080
//!
//! # Or via environment variable
//! TASKLIST_SERVER_ADDR=0.0.0.0:8080 cargo run --bin tasklist-server
//! ```

use std::sync::Arc;

use clap::Parser;
use tasklist_server::config::{ServerCliArgs, ServerConfig};
use tasklist_server::server::{self, ServerState};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, max_body_size = config.max_body_size, "starting task server");

    let state = Arc::new(ServerState::with_max_body_size(config.max_body_size));
    let addr = config.bind_addr.to_string();

    match server::start_server_with_state(&addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task server");
            std::process::exit(1);
        }
    }
}
