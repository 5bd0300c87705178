//! Convenience result type alias for the Alquiler client.

use crate::error::AppError;

/// A specialized `Result` type for Alquiler operations.
pub type AppResult<T> = Result<T, AppError>;
