//! HTTP implementation of the booking workflow's gateway.

use async_trait::async_trait;
use reqwest::Method;

use alquiler_booking::gateway::ReservationGateway;
use alquiler_core::result::AppResult;
use alquiler_core::types::{ApiResponse, ReservationId, RoomId, UserId};
use alquiler_entity::reservation::{Reservation, ReservationReceipt, ReservationRequest};

use crate::http::ApiClient;

const RESERVATIONS: &str = "reservas";

/// Talks to the `/reservas` endpoints.
#[derive(Debug, Clone)]
pub struct HttpReservationGateway {
    api: ApiClient,
}

impl HttpReservationGateway {
    /// Create a gateway over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn list(&self, segments: &[&str]) -> AppResult<ApiResponse<Vec<Reservation>>> {
        let url = self.api.endpoint(segments)?;
        tracing::debug!(%url, "GET reservations");
        self.api.send_json(self.api.request(Method::GET, url)).await
    }
}

#[async_trait]
impl ReservationGateway for HttpReservationGateway {
    async fn create(
        &self,
        request: &ReservationRequest,
    ) -> AppResult<ApiResponse<ReservationReceipt>> {
        let url = self.api.endpoint(&[RESERVATIONS])?;
        tracing::debug!(%url, room_id = %request.habitacion.id, "POST reservation");
        self.api
            .send_json(self.api.request(Method::POST, url).json(request))
            .await
    }

    async fn list_all(&self) -> AppResult<ApiResponse<Vec<Reservation>>> {
        self.list(&[RESERVATIONS]).await
    }

    async fn list_by_room(&self, room_id: &RoomId) -> AppResult<ApiResponse<Vec<Reservation>>> {
        self.list(&[RESERVATIONS, "habitacion", room_id.as_str()])
            .await
    }

    async fn list_by_student(
        &self,
        student_id: &UserId,
    ) -> AppResult<ApiResponse<Vec<Reservation>>> {
        self.list(&[RESERVATIONS, "usuario", student_id.as_str()])
            .await
    }

    async fn update(
        &self,
        id: &ReservationId,
        reservation: &Reservation,
    ) -> AppResult<ApiResponse<ReservationReceipt>> {
        let url = self.api.endpoint(&[RESERVATIONS, id.as_str()])?;
        tracing::debug!(%url, "PUT reservation");
        self.api
            .send_json(self.api.request(Method::PUT, url).json(reservation))
            .await
    }

    async fn delete(&self, id: &ReservationId) -> AppResult<ApiResponse<()>> {
        let url = self.api.endpoint(&[RESERVATIONS, id.as_str()])?;
        tracing::debug!(%url, "DELETE reservation");
        self.api
            .send_empty(self.api.request(Method::DELETE, url))
            .await
    }
}
