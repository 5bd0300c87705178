//! Shared HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use alquiler_core::config::ApiConfig;
use alquiler_core::error::{AppError, ErrorKind};
use alquiler_core::result::AppResult;
use alquiler_core::traits::IdentityProvider;
use alquiler_core::types::ApiResponse;

/// reqwest client bound to the backend base URL and the current identity.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    identity: Arc<dyn IdentityProvider>,
}

impl ApiClient {
    /// Build a client from the `api` configuration section.
    pub fn new(config: &ApiConfig, identity: Arc<dyn IdentityProvider>) -> AppResult<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            AppError::configuration(format!("Invalid api.base_url '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "api.base_url '{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to create HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url,
            identity,
        })
    }

    /// Base URL all endpoints hang off.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint from path segments. Segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::configuration("api.base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request, attaching the bearer token when there is one.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.identity.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body into `T`.
    ///
    /// Any completed exchange is `Ok`, whatever the status. An empty body
    /// becomes `None`. A non-empty 2xx body that does not decode is a
    /// [`ErrorKind::Serialization`] error; on other statuses it is dropped.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> AppResult<ApiResponse<T>> {
        let (status, bytes) = self.exchange(builder).await?;
        decode_body(status, &bytes)
    }

    /// Send a request whose response body is not needed.
    pub async fn send_empty(&self, builder: RequestBuilder) -> AppResult<ApiResponse<()>> {
        let (status, _) = self.exchange(builder).await?;
        Ok(ApiResponse::new(status, Some(())))
    }

    async fn exchange(&self, builder: RequestBuilder) -> AppResult<(u16, Vec<u8>)> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        tracing::debug!(status, url = %response.url(), "Backend responded");

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::warn!(status, "Failed to read response body: {e}");
                Vec::new()
            }
        };
        Ok((status, bytes))
    }
}

fn decode_body<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> AppResult<ApiResponse<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse::new(status, None));
    }

    match serde_json::from_slice::<T>(bytes) {
        Ok(body) => Ok(ApiResponse::new(status, Some(body))),
        Err(e) if (200..300).contains(&status) => Err(AppError::with_source(
            ErrorKind::Serialization,
            format!("unreadable response (HTTP {status}): {e}"),
            e,
        )),
        Err(e) => {
            tracing::debug!(status, "Ignoring undecodable error body: {e}");
            Ok(ApiResponse::new(status, None))
        }
    }
}

/// Map a reqwest failure to a transport error.
pub fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("request failed: {err}")
    };
    AppError::with_source(ErrorKind::Network, message, err)
}
