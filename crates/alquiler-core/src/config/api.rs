//! Backend REST endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where the reservation backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Value sent in the `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    // Host loopback as seen from the Android emulator.
    "http://10.0.2.2:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("alquiler-client/", env!("CARGO_PKG_VERSION")).to_string()
}
