//! # alquiler-auth
//!
//! Client-side authentication for the AlquilerApp client.
//!
//! ## Modules
//!
//! - `jwt`: reading claims (subject, role, expiry) out of bearer tokens
//! - `session`: the in-memory token holder that implements
//!   [`IdentityProvider`](alquiler_core::traits::IdentityProvider)
//! - `store`: persisting the token between CLI invocations

pub mod jwt;
pub mod session;
pub mod store;

pub use jwt::{Claims, ClaimsDecoder};
pub use session::TokenSession;
pub use store::TokenStore;
