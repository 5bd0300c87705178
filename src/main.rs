//! AlquilerApp client: book rooms against the reservation backend.
//!
//! Main entry point: loads configuration, initializes logging, and
//! dispatches the CLI.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use alquiler_cli::Cli;
use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!("AlquilerApp client v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli.execute(&config).await {
        tracing::debug!(kind = %e.kind, "Command failed");
        eprintln!("Error: {}", e.message);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(explicit_path: Option<&str>) -> Result<AppConfig, AppError> {
    let config_path = explicit_path
        .map(str::to_string)
        .or_else(|| std::env::var("ALQUILER_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let env = std::env::var("ALQUILER_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
