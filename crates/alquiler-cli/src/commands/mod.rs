//! CLI command definitions and dispatch.

pub mod auth;
pub mod book;
pub mod config;
pub mod reservations;

use clap::{Parser, Subcommand};

use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;

use crate::output::OutputFormat;

/// AlquilerApp: book rooms from the terminal
#[derive(Debug, Parser)]
#[command(name = "alquiler", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to $ALQUILER_CONFIG or config/default.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and save the bearer token
    Login(auth::LoginArgs),
    /// Forget the saved bearer token
    Logout,
    /// Show who the current token belongs to
    Whoami,
    /// Book a room for a date range
    Book(book::BookArgs),
    /// List and manage reservations
    Reservations(reservations::ReservationsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, config, self.format).await,
            Commands::Logout => auth::logout(config).await,
            Commands::Whoami => auth::whoami(config, self.format).await,
            Commands::Book(args) => book::execute(args, config, self.format).await,
            Commands::Reservations(args) => {
                reservations::execute(args, config, self.format).await
            }
            Commands::Config(args) => config::execute(args, config, self.format).await,
        }
    }
}

/// Helper: read a line of input, mapping prompt failures
pub(crate) fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}
