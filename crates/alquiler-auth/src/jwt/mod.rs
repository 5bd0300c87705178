//! JWT claim decoding.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::ClaimsDecoder;
