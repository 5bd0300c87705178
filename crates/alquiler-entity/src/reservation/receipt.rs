//! Reservation summary returned by create and update calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use alquiler_core::types::ReservationId;

use super::status::ReservationStatus;

/// What `POST /reservas` and `PUT /reservas/{id}` answer with.
///
/// Narrower than [`super::Reservation`]: the backend does not echo the
/// room or the student here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationReceipt {
    /// Backend identifier.
    pub id: ReservationId,
    /// First day of the stay.
    #[serde(rename = "fechaInicio")]
    pub entry_date: NaiveDate,
    /// Day the room is handed back.
    #[serde(rename = "fechaFin")]
    pub exit_date: NaiveDate,
    #[serde(rename = "estadoReserva", default)]
    pub status: ReservationStatus,
}
