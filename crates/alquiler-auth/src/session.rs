//! In-memory bearer-token session.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use alquiler_core::config::AuthConfig;
use alquiler_core::traits::IdentityProvider;
use alquiler_entity::user::UserRole;

use crate::jwt::{Claims, ClaimsDecoder};

/// A token together with its decoded claims.
#[derive(Debug, Clone)]
struct ActiveToken {
    raw: String,
    claims: Option<Claims>,
}

/// Holds the token of the logged-in user and answers identity queries.
///
/// Claims are decoded once when the token is set. A malformed token is
/// still sent as the bearer credential but yields no subject or role.
#[derive(Debug)]
pub struct TokenSession {
    current: RwLock<Option<ActiveToken>>,
    decoder: ClaimsDecoder,
    subject_claim: String,
    role_claims: Vec<String>,
}

impl TokenSession {
    /// Creates an empty session with the claim names from `config`.
    pub fn new(config: &AuthConfig) -> Self {
        let session = Self {
            current: RwLock::new(None),
            decoder: ClaimsDecoder::new(),
            subject_claim: config.subject_claim.clone(),
            role_claims: config.role_claims.clone(),
        };
        if let Some(token) = config.token.as_deref() {
            session.set_token(token);
        }
        session
    }

    /// Replaces the current token. Blank tokens clear the session.
    pub fn set_token(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            self.clear();
            return;
        }

        let claims = self.decoder.try_decode(token);
        if claims.as_ref().is_some_and(Claims::is_expired) {
            tracing::warn!("Bearer token is already expired; the backend will reject it");
        }

        *self.write() = Some(ActiveToken {
            raw: token.to_string(),
            claims,
        });
    }

    /// Forgets the current token.
    pub fn clear(&self) {
        *self.write() = None;
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Decoded claims of the current token.
    pub fn claims(&self) -> Option<Claims> {
        self.read().as_ref().and_then(|t| t.claims.clone())
    }

    /// The role parsed into a known [`UserRole`].
    pub fn user_role(&self) -> Option<UserRole> {
        self.claims()?.user_role(&self.role_claims)
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<ActiveToken>> {
        self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<ActiveToken>> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IdentityProvider for TokenSession {
    fn bearer_token(&self) -> Option<String> {
        self.read().as_ref().map(|t| t.raw.clone())
    }

    fn subject(&self) -> Option<String> {
        self.claims()?.subject(&self.subject_claim)
    }

    fn role(&self) -> Option<String> {
        self.claims()?.role(&self.role_claims)
    }
}
