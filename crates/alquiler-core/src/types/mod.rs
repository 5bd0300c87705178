//! Core type definitions used across the Alquiler workspace.

pub mod id;
pub mod response;

pub use id::*;
pub use response::ApiResponse;
