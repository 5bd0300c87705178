//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file, an optional environment overlay, and `ALQUILER_`
//! prefixed environment variables. Each sub-module represents a logical
//! configuration section, and every section has defaults so the client
//! runs without any file present.

pub mod api;
pub mod auth;
pub mod booking;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::auth::AuthConfig;
pub use self::booking::BookingConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix used for overrides (`ALQUILER__API__BASE_URL`).
pub const ENV_PREFIX: &str = "ALQUILER";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend REST endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Bearer token and claim settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Booking workflow behavior switches.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges the file at `path` (if it exists) with `config/<env>.toml`
    /// (if it exists) and environment variables prefixed with `ALQUILER`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations the client cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "api.base_url must be an http(s) URL, got '{base}'"
            )));
        }
        if self.api.request_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.request_timeout_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}
