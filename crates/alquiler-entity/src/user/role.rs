//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles the backend assigns to accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Manages users and every reservation.
    Admin,
    /// Publishes rooms and sees reservations on them.
    Propietario,
    /// Books rooms.
    Alumno,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role may create reservations.
    pub fn can_book(&self) -> bool {
        matches!(self, Self::Alumno | Self::Admin)
    }

    /// Return the role as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Propietario => "PROPIETARIO",
            Self::Alumno => "ALUMNO",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    /// Accepts the bare name or a Spring-style `ROLE_` prefix, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let name = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match name {
            "ADMIN" => Ok(Self::Admin),
            "PROPIETARIO" => Ok(Self::Propietario),
            "ALUMNO" => Ok(Self::Alumno),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}
