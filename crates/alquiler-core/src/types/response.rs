//! HTTP response envelope shared by the transport and its callers.

use serde::{Deserialize, Serialize};

/// Status code plus the decoded body of a completed HTTP exchange.
///
/// `body` is `None` when the response carried no body, or when a non-2xx
/// body did not decode into `T`. Transport failures and unreadable 2xx
/// bodies never produce an `ApiResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body, if any.
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a response envelope.
    pub fn new(status: u16, body: Option<T>) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map the decoded body, keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            body: self.body.map(f),
        }
    }
}
