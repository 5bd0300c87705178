//! # alquiler-core
//!
//! Core crate for the AlquilerApp client. Contains configuration schemas,
//! typed identifiers, the HTTP response envelope, collaborator traits,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Alquiler crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
