//! Claims carried by the backend's bearer tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use alquiler_entity::user::UserRole;

/// Raw claim set of a bearer token.
///
/// The backend decides the claim names, so claims are kept as a JSON
/// object and looked up by the names configured in `auth`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Wrap an already decoded claim object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Returns a claim as a string. Numbers are stringified; anything
    /// else yields `None`.
    pub fn string(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns the user identifier from the given subject claim.
    pub fn subject(&self, claim: &str) -> Option<String> {
        self.string(claim)
    }

    /// Returns the first role found among `claims`, in order.
    ///
    /// A claim may hold a single string or an array of strings (first
    /// element wins).
    pub fn role(&self, claims: &[String]) -> Option<String> {
        claims.iter().find_map(|name| match self.0.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => items.iter().find_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("authority")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            }),
            _ => None,
        })
    }

    /// Returns the role parsed into a known [`UserRole`].
    pub fn user_role(&self, claims: &[String]) -> Option<UserRole> {
        self.role(claims)?.parse().ok()
    }

    /// Returns the expiration, if the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.0.get("exp")?.as_i64()?;
        DateTime::from_timestamp(exp, 0)
    }

    /// Checks whether the token has expired. Tokens without `exp` never do.
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| Utc::now() >= at)
    }
}
