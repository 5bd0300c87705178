//! Login endpoint.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use alquiler_core::error::AppError;
use alquiler_core::result::AppResult;

use crate::http::ApiClient;

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain password, sent over the configured transport.
    pub password: String,
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for later requests.
    pub token: String,
    /// Role, when the backend reports it outside the token.
    #[serde(default)]
    pub rol: Option<String>,
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    /// Create the auth API over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let url = self.api.endpoint(&["auth", "login"])?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        tracing::debug!(%url, email, "Logging in");

        let response = self
            .api
            .send_json::<LoginResponse>(self.api.request(Method::POST, url).json(&body))
            .await?;

        match (response.status, response.body) {
            (200..=299, Some(login)) if !login.token.trim().is_empty() => {
                tracing::info!(email, "Logged in");
                Ok(login)
            }
            (200..=299, _) => Err(AppError::authentication(
                "Login succeeded but no token was returned",
            )),
            (401 | 403, _) => Err(AppError::authentication("Invalid email or password")),
            (status, _) if status >= 500 => Err(AppError::service_unavailable(format!(
                "Login failed: HTTP {status}"
            ))),
            (status, _) => Err(AppError::authentication(format!(
                "Login failed: HTTP {status}"
            ))),
        }
    }
}
