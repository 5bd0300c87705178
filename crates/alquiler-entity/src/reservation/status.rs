//! Reservation status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a reservation as reported by the backend.
///
/// The backend owns the set of statuses; values the client does not know
/// are carried through untouched in [`ReservationStatus::Other`] so an
/// update round trip does not rewrite them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    /// Submitted and waiting for the owner.
    #[default]
    Pending,
    /// Accepted by the owner.
    Confirmed,
    /// Withdrawn by the student or an admin.
    Cancelled,
    /// Declined by the owner.
    Rejected,
    /// Any other value the backend sends.
    Other(String),
}

impl ReservationStatus {
    /// Return the status as the backend spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDIENTE",
            Self::Confirmed => "CONFIRMADA",
            Self::Cancelled => "CANCELADA",
            Self::Rejected => "RECHAZADA",
            Self::Other(raw) => raw,
        }
    }

    /// Check if the reservation can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Rejected)
    }
}

impl From<String> for ReservationStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "PENDIENTE" | "PENDING" => Self::Pending,
            "CONFIRMADA" | "CONFIRMED" => Self::Confirmed,
            "CANCELADA" | "CANCELLED" => Self::Cancelled,
            "RECHAZADA" | "REJECTED" => Self::Rejected,
            _ => Self::Other(raw),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
