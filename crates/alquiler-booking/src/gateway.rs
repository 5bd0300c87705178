//! Backend port for reservation calls.

use async_trait::async_trait;

use alquiler_core::result::AppResult;
use alquiler_core::types::{ApiResponse, ReservationId, RoomId, UserId};
use alquiler_entity::reservation::{Reservation, ReservationReceipt, ReservationRequest};

/// The reservation endpoints the booking workflow consumes.
///
/// Every call that reaches the server returns `Ok` with the status code,
/// including non-2xx answers. `Err` with [`ErrorKind::Network`] means the
/// exchange never completed (timeout, DNS, connection reset) and nothing
/// is known to have reached the backend. `Err` with
/// [`ErrorKind::Serialization`] means a 2xx answer carried a body that
/// could not be read.
///
/// [`ErrorKind::Network`]: alquiler_core::error::ErrorKind::Network
/// [`ErrorKind::Serialization`]: alquiler_core::error::ErrorKind::Serialization
#[async_trait]
pub trait ReservationGateway: Send + Sync + std::fmt::Debug + 'static {
    /// `POST /reservas`; answers with a [`ReservationReceipt`].
    async fn create(
        &self,
        request: &ReservationRequest,
    ) -> AppResult<ApiResponse<ReservationReceipt>>;

    /// `GET /reservas`
    async fn list_all(&self) -> AppResult<ApiResponse<Vec<Reservation>>>;

    /// `GET /reservas/habitacion/{id}`
    async fn list_by_room(&self, room_id: &RoomId) -> AppResult<ApiResponse<Vec<Reservation>>>;

    /// `GET /reservas/usuario/{id}`
    async fn list_by_student(
        &self,
        student_id: &UserId,
    ) -> AppResult<ApiResponse<Vec<Reservation>>>;

    /// `PUT /reservas/{id}` with the full representation.
    async fn update(
        &self,
        id: &ReservationId,
        reservation: &Reservation,
    ) -> AppResult<ApiResponse<ReservationReceipt>>;

    /// `DELETE /reservas/{id}`
    async fn delete(&self, id: &ReservationId) -> AppResult<ApiResponse<()>>;
}
