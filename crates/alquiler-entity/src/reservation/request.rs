//! Payload sent to `POST /reservas`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use alquiler_core::types::{RoomId, UserId};

use super::draft::ReservationDraft;
use super::status::ReservationStatus;

/// Reference to a room by id (`{"id": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    /// Room identifier.
    pub id: RoomId,
}

/// Reference to a user by id (`{"id": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// User identifier.
    pub id: UserId,
}

/// Reservation creation request.
///
/// `alumno` is normally absent: the backend takes the student from the
/// authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Room being booked.
    pub habitacion: RoomRef,
    /// Explicit student, only sent when configured to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alumno: Option<UserRef>,
    /// First day, `YYYY-MM-DD`.
    #[serde(rename = "fechaInicio")]
    pub entry_date: NaiveDate,
    /// Exit day, `YYYY-MM-DD`.
    #[serde(rename = "fechaFin")]
    pub exit_date: NaiveDate,
    /// Requested status, always `PENDIENTE` on creation.
    #[serde(rename = "estadoReserva")]
    pub status: ReservationStatus,
}

impl ReservationRequest {
    /// Build the request for a validated draft.
    pub fn from_draft(draft: &ReservationDraft, student: Option<UserId>) -> Self {
        Self {
            habitacion: RoomRef {
                id: draft.room_id().clone(),
            },
            alumno: student.map(|id| UserRef { id }),
            entry_date: draft.range().entry(),
            exit_date: draft.range().exit(),
            status: draft.status().clone(),
        }
    }
}
