//! Reads claims out of bearer tokens without verifying them.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};

use alquiler_core::error::AppError;

use super::claims::Claims;

/// Decodes the payload of a JWT.
///
/// The client never holds the backend's signing key, so the signature
/// and the registered claims are not validated here; the backend does
/// that on every request. The decoded claims are only used to show who
/// is logged in and to fill in the student id when configured to.
#[derive(Clone)]
pub struct ClaimsDecoder {
    /// Placeholder key; never checked.
    decoding_key: DecodingKey,
    /// Validation with signature and expiry checks disabled.
    validation: Validation,
}

impl std::fmt::Debug for ClaimsDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl ClaimsDecoder {
    /// Creates a decoder that accepts any well-formed token.
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(&[]),
            validation,
        }
    }

    /// Decodes the claim set of `token`.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                _ => AppError::authentication(format!("Token could not be decoded: {e}")),
            })?;

        Ok(Claims::from_map(data.claims))
    }

    /// Decodes `token`, returning `None` on any failure.
    pub fn try_decode(&self, token: &str) -> Option<Claims> {
        match self.decode(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!("Ignoring undecodable bearer token: {}", e.message);
                None
            }
        }
    }
}

impl Default for ClaimsDecoder {
    fn default() -> Self {
        Self::new()
    }
}
