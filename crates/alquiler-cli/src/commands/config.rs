//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use alquiler_core::config::AppConfig;
use alquiler_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check the effective configuration
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(&masked(config), format);
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success("Configuration is valid");
                output::print_kv("Backend", &config.api.base_url);
                output::print_kv(
                    "Timeout",
                    &format!("{}s", config.api.request_timeout_seconds),
                );
                output::print_kv(
                    "Student id in payload",
                    &config.booking.include_student_id.to_string(),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Copy of `config` with the bearer token hidden
fn masked(config: &AppConfig) -> AppConfig {
    let mut shown = config.clone();
    shown.auth.token = shown.auth.token.as_deref().map(mask_token);
    shown
}

/// Keep only the first characters of a token
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    format!("{visible}…")
}
