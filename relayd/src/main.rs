//! relayd
//!
//! REST API server for GPIO relay boards.
//!
//! # API Surfaces
//!
//! 1. **Relay resources**: `/relays`, `/relays/:id`, `/relays/:id/{on,off,toggle}`
//!    address any relay by its 1-based position in the configured pin list.
//!
//! 2. **myStrom WiFi Switch emulation**: `/relay?state=0|1`, `/toggle` and
//!    `/report` drive the configured default relay only.
//!
//! Both surfaces share one relay registry. On shutdown every relay is
//! switched off and its pin released.

mod api;
mod config;
mod logging;
mod relays;
mod shutdown;

use anyhow::Result;
use api::AppState;
use clap::Parser;
use relayswitch_core::{default_config_path, LogLevel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// relayd API Server
#[derive(Parser, Debug)]
#[command(name = "relayd")]
#[command(
    version,
    about = "Relay board REST API server",
    long_about = None,
    after_help = "Control relays with a REST API emulating the myStrom WiFi Switch API"
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server bind address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Logging level: trace, debug, info, warn, error (overrides config)
    #[arg(short = 'l', long)]
    log_level: Option<LogLevel>,

    /// Log file, rotated daily (overrides config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable mock mode (run without GPIO hardware for testing/development)
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Determine config path: CLI flag > env var > default
    let config_path = args.config.unwrap_or_else(|| {
        std::env::var("RELAYSWITCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path())
    });

    // Step 1: Load configuration
    let static_config = config::load(&config_path).await?;

    // Step 2: Initialize tracing
    let log_level = args.log_level.unwrap_or(static_config.logging.level);
    let log_file = args.log_file.or_else(|| static_config.logging.file.clone());
    let _log_guard = logging::init_tracing(log_level, log_file.as_deref())?;

    info!("Starting relay board REST API server");
    info!("Configuration file: {}", config_path.display());
    if let Some(ref log_file) = log_file {
        info!("Logging to {}", log_file.display());
    }

    let bind_addr = format!(
        "{}:{}",
        args.bind.as_deref().unwrap_or(static_config.server.hostname.as_str()),
        args.port.unwrap_or(static_config.server.port)
    );

    // Step 3: Claim one driver per relay pin
    if args.mock {
        info!("Mock mode: relays are simulated in memory");
    }
    let registry = Arc::new(relays::build_registry(&static_config.relays, args.mock)?);
    for relay in registry.iter() {
        debug!("Relay {} -> GPIO {}", relay.id(), relay.pin());
    }
    let default_relay = static_config.relays.default_relay_id();
    info!(
        "Relay registry initialized: {} relay(s), myStrom emulation on relay {}",
        registry.len(),
        default_relay
    );

    // Step 4: Create application state
    let app_state = AppState::new(registry.clone(), default_relay)?;
    let app = api::create_router(app_state);

    // Start server. Any early return from here drops the registry, which
    // releases the pins.
    info!("Starting server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("relayd listening on {}", bind_addr);

    shutdown::serve(listener, app, &registry, shutdown::shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}
