//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer token source and claim names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token to start with (usually supplied via `ALQUILER__AUTH__TOKEN`).
    #[serde(default)]
    pub token: Option<String>,
    /// File the `login` command persists the token to.
    #[serde(default = "default_token_file")]
    pub token_file: String,
    /// Claim holding the user identifier.
    #[serde(default = "default_subject_claim")]
    pub subject_claim: String,
    /// Claims consulted, in order, for the user role.
    #[serde(default = "default_role_claims")]
    pub role_claims: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_file: default_token_file(),
            subject_claim: default_subject_claim(),
            role_claims: default_role_claims(),
        }
    }
}

fn default_token_file() -> String {
    "data/token".to_string()
}

fn default_subject_claim() -> String {
    "sub".to_string()
}

fn default_role_claims() -> Vec<String> {
    vec!["role".to_string(), "roles".to_string()]
}
