//! Newtype wrappers for the backend's opaque identifiers.
//!
//! The backend hands out identifiers as strings and the client never
//! interprets them, so each wrapper only guarantees it is not blank.
//! Distinct types prevent passing a `RoomId` where a `UserId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Macro to define a newtype ID wrapper around an opaque string.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, trimming surrounding whitespace.
            pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(AppError::validation(concat!(
                        stringify!($name),
                        " must not be empty"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Return the identifier as sent on the wire.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a rentable room ("habitación").
    RoomId
);

define_id!(
    /// Identifier of a reservation ("reserva").
    ReservationId
);

define_id!(
    /// Identifier of a user (student, owner, or admin).
    UserId
);
