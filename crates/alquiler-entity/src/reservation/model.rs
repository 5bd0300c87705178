//! Server-confirmed reservation model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use alquiler_core::types::{ReservationId, RoomId, UserId};

use super::status::ReservationStatus;

/// A reservation as the backend reports it.
///
/// The client only holds read-only projections of these; every reload
/// replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Backend identifier.
    pub id: ReservationId,
    /// Booked room.
    #[serde(rename = "habitacionId")]
    pub room_id: RoomId,
    /// Booking student; filled in server-side from the bearer token.
    #[serde(rename = "alumnoId", default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<UserId>,
    /// Booking student's email, when the backend joins it in.
    #[serde(rename = "alumnoEmail", default, skip_serializing_if = "Option::is_none")]
    pub student_email: Option<String>,
    /// Room owner, when the backend joins it in.
    #[serde(rename = "propietarioId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    /// Room owner's email, when the backend joins it in.
    #[serde(rename = "propietarioEmail", default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    /// First day of the stay.
    #[serde(rename = "fechaInicio")]
    pub entry_date: NaiveDate,
    /// Day the room is handed back.
    #[serde(rename = "fechaFin")]
    pub exit_date: NaiveDate,
    /// Current status.
    #[serde(rename = "estadoReserva", default)]
    pub status: ReservationStatus,
}

impl Reservation {
    /// Check if this reservation belongs to the given student.
    pub fn is_booked_by(&self, student_id: &UserId) -> bool {
        self.student_id.as_ref() == Some(student_id)
    }

    /// Return a copy with a different status, for status updates.
    pub fn with_status(&self, status: ReservationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
