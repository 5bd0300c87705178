//! Reservation submission and outcome classification.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use alquiler_core::config::BookingConfig;
use alquiler_core::error::ErrorKind;
use alquiler_core::traits::IdentityProvider;
use alquiler_core::types::{RoomId, UserId};
use alquiler_entity::reservation::{
    ReservationDraft, ReservationReceipt, ReservationRequest, ReservationStatus, RoomRef, UserRef,
};

use crate::gateway::ReservationGateway;

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx with a receipt in the body.
    Success(ReservationReceipt),
    /// The backend answered with a non-2xx status.
    ServerRejected(u16),
    /// 2xx with an empty or unreadable body.
    EmptyBody,
    /// The exchange never completed.
    NetworkError(String),
}

impl SubmitOutcome {
    /// Whether the reservation was created.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The backend's receipt, on success.
    pub fn receipt(&self) -> Option<&ReservationReceipt> {
        match self {
            Self::Success(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Whether the "all" list must be reloaded afterwards.
    ///
    /// Rejections reload too, since the server may have had side effects.
    /// Transport failures do not: nothing is known to have reached it.
    pub fn requires_reload(&self) -> bool {
        matches!(self, Self::Success(_) | Self::ServerRejected(_))
    }

    /// User-facing message for failures.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::ServerRejected(code) => Some(format!("reservation failed: HTTP {code}")),
            Self::EmptyBody => Some("reservation failed: empty response".to_string()),
            Self::NetworkError(message) => Some(format!("reservation failed: {message}")),
        }
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(receipt) => write!(f, "reservation {} created", receipt.id),
            _ => match self.error_message() {
                Some(message) => f.write_str(&message),
                None => Ok(()),
            },
        }
    }
}

/// Builds reservation requests and submits them.
#[derive(Debug)]
pub struct ReservationSubmitter {
    gateway: Arc<dyn ReservationGateway>,
    identity: Arc<dyn IdentityProvider>,
    include_student_id: bool,
}

impl ReservationSubmitter {
    /// Create a submitter.
    pub fn new(
        gateway: Arc<dyn ReservationGateway>,
        identity: Arc<dyn IdentityProvider>,
        config: &BookingConfig,
    ) -> Self {
        Self {
            gateway,
            identity,
            include_student_id: config.include_student_id,
        }
    }

    /// Build the request payload for `draft`.
    ///
    /// The student is left for the backend to derive from the bearer token
    /// unless `include_student_id` is set and the token carries a subject.
    pub fn build_request(&self, draft: &ReservationDraft) -> ReservationRequest {
        ReservationRequest::from_draft(draft, self.student_id())
    }

    /// Submit a validated draft.
    pub async fn submit(&self, draft: &ReservationDraft) -> SubmitOutcome {
        let request = self.build_request(draft);
        self.send(&request).await
    }

    /// Submit a reservation for `room_id` from `entry` to `exit`.
    ///
    /// Callers must hold a `Ready` selection; the ordering is not checked
    /// again here.
    pub async fn confirm(&self, room_id: RoomId, entry: NaiveDate, exit: NaiveDate) -> SubmitOutcome {
        debug_assert!(exit > entry, "confirm called with an unordered range");

        let request = ReservationRequest {
            habitacion: RoomRef { id: room_id },
            alumno: self.student_id().map(|id| UserRef { id }),
            entry_date: entry,
            exit_date: exit,
            status: ReservationStatus::Pending,
        };
        self.send(&request).await
    }

    async fn send(&self, request: &ReservationRequest) -> SubmitOutcome {
        tracing::debug!(
            room_id = %request.habitacion.id,
            entry = %request.entry_date,
            exit = %request.exit_date,
            "Submitting reservation"
        );

        let outcome = match self.gateway.create(request).await {
            Ok(response) if response.is_success() => match response.body {
                Some(receipt) => SubmitOutcome::Success(receipt),
                None => SubmitOutcome::EmptyBody,
            },
            Ok(response) => SubmitOutcome::ServerRejected(response.status),
            Err(e) if e.kind == ErrorKind::Serialization => {
                tracing::warn!("Created reservation but could not read the answer: {}", e.message);
                SubmitOutcome::EmptyBody
            }
            Err(e) => SubmitOutcome::NetworkError(e.message),
        };

        match &outcome {
            SubmitOutcome::Success(receipt) => {
                tracing::info!(reservation_id = %receipt.id, "Reservation created");
            }
            other => tracing::warn!(outcome = %other, "Reservation not created"),
        }
        outcome
    }

    fn student_id(&self) -> Option<UserId> {
        if !self.include_student_id {
            return None;
        }
        let subject = self.identity.subject()?;
        match UserId::new(subject) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Token subject is not a usable student id: {}", e.message);
                None
            }
        }
    }
}
