//! Subscription service - CLI server
//!
//! Headless REST backend suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/subscription-service/config.toml)
//! subscription-service
//!
//! # Custom config path
//! subscription-service --config /etc/subscription-service/config.toml
//!
//! # Override the port, keep the schema untouched
//! subscription-service --port 8081 --no-migrate
//!
//! # Print the effective configuration without starting
//! subscription-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use subscription_service::config::AppConfig;
use subscription_service::server::{init_tracing, ServerHandle, ServerOptions};

/// REST API for tracking online subscriptions and their cost over time.
#[derive(Parser, Debug)]
#[command(
    name = "subscription-service",
    version,
    about = "Subscription tracking REST service",
    long_about = "REST API for recording users' online subscriptions and \
                  calculating what they cost over a range of months.\n\n\
                  Default config: ~/.config/subscription-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SUBSCRIPTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the effective configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(subscription_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.no_migrate {
        config.database.auto_migrate = false;
    }

    // ── Config check mode ──────────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   HTTP address: {}", config.server.address());
        println!("   Database    : {}", config.database.redacted_url());
        println!("   Migrations  : {}", if config.database.auto_migrate { "on" } else { "off" });
        println!("   Log level   : {} ({})", config.logging.level, config.logging.format);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions::from(config)).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
