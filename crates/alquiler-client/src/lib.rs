//! # alquiler-client
//!
//! reqwest-based transport for the reservation backend: the shared
//! [`ApiClient`] (base URL, timeouts, bearer header), the
//! [`HttpReservationGateway`] used by the booking workflow, and the
//! login call in [`AuthApi`].

pub mod auth;
pub mod gateway;
pub mod http;

pub use auth::{AuthApi, LoginRequest, LoginResponse};
pub use gateway::HttpReservationGateway;
pub use http::ApiClient;
