//! Per-scope reservation snapshots.
//!
//! Each scope holds one server snapshot that is replaced wholesale on
//! every load. The whole map lives in a `watch` channel, so observers
//! see every committed change and writers are serialized by
//! `send_modify`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use alquiler_core::config::BookingConfig;
use alquiler_core::error::ErrorKind;
use alquiler_core::result::AppResult;
use alquiler_core::types::{ApiResponse, ReservationId, RoomId, UserId};
use alquiler_entity::reservation::Reservation;

use crate::gateway::ReservationGateway;

const LOAD_ERROR: &str = "Error al cargar reservas";
const DELETE_ERROR: &str = "Error al eliminar";
const UPDATE_ERROR: &str = "Error al actualizar";

/// A query dimension for reservation lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Everything the current principal may see.
    All,
    /// Reservations of one room.
    Room(RoomId),
    /// Reservations of one student.
    Student(UserId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Room(id) => write!(f, "room:{id}"),
            Self::Student(id) => write!(f, "student:{id}"),
        }
    }
}

/// Lifecycle of one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopePhase {
    /// Never loaded.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Loaded,
    /// The last operation failed; see `error`.
    Error,
}

/// What is currently known for one scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeState {
    /// Latest snapshot, in server order.
    pub reservations: Vec<Reservation>,
    /// Whether a load is in flight.
    pub loading: bool,
    /// User-facing message of the last failure.
    pub error: Option<String>,
    /// Lifecycle phase.
    pub phase: ScopePhase,
    /// Generation of the most recently issued load.
    issued: u64,
}

/// The full scope map as observed through [`ReservationListState::subscribe`].
pub type Snapshot = HashMap<Scope, ScopeState>;

/// What a failed load does to the scope's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnFailure {
    KeepPrevious,
    Reset,
}

/// Reactive cache of reservation lists keyed by [`Scope`].
#[derive(Debug)]
pub struct ReservationListState {
    gateway: Arc<dyn ReservationGateway>,
    scopes: watch::Sender<Snapshot>,
    discard_stale: bool,
}

impl ReservationListState {
    /// Create an empty state over `gateway`.
    pub fn new(gateway: Arc<dyn ReservationGateway>, config: &BookingConfig) -> Self {
        let (scopes, _) = watch::channel(Snapshot::new());
        Self {
            gateway,
            scopes,
            discard_stale: config.discard_stale_responses,
        }
    }

    /// Observe every change to the scope map.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.scopes.subscribe()
    }

    /// Current state of `scope` (default when never touched).
    pub fn scope(&self, scope: &Scope) -> ScopeState {
        self.scopes.borrow().get(scope).cloned().unwrap_or_default()
    }

    /// Current snapshot of `scope`.
    pub fn reservations(&self, scope: &Scope) -> Vec<Reservation> {
        self.scopes
            .borrow()
            .get(scope)
            .map(|s| s.reservations.clone())
            .unwrap_or_default()
    }

    /// Current error message of `scope`.
    pub fn error(&self, scope: &Scope) -> Option<String> {
        self.scopes.borrow().get(scope).and_then(|s| s.error.clone())
    }

    /// Whether `scope` has a load in flight.
    pub fn is_loading(&self, scope: &Scope) -> bool {
        self.scopes.borrow().get(scope).is_some_and(|s| s.loading)
    }

    /// Look a reservation up in the "all" snapshot.
    pub fn find(&self, id: &ReservationId) -> Option<Reservation> {
        self.scopes
            .borrow()
            .get(&Scope::All)
            .and_then(|s| s.reservations.iter().find(|r| &r.id == id).cloned())
    }

    /// Set a user-facing error on `scope`, keeping its snapshot.
    pub fn report_error(&self, scope: Scope, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(scope = %scope, "{message}");
        self.scopes.send_modify(|map| {
            let state = map.entry(scope).or_default();
            state.error = Some(message);
            state.phase = ScopePhase::Error;
        });
    }

    /// Clear the error of `scope`.
    pub fn clear_error(&self, scope: &Scope) {
        self.scopes.send_if_modified(|map| match map.get_mut(scope) {
            Some(state) if state.error.is_some() => {
                state.error = None;
                if state.phase == ScopePhase::Error {
                    state.phase = ScopePhase::Loaded;
                }
                true
            }
            _ => false,
        });
    }

    /// Reload everything. A failure keeps the previous snapshot.
    pub async fn load_all(&self) {
        self.load(Scope::All, OnFailure::KeepPrevious, self.gateway.list_all())
            .await;
    }

    /// Reload one room's reservations. A failure empties the scope.
    pub async fn load_by_room(&self, room_id: &RoomId) {
        self.load(
            Scope::Room(room_id.clone()),
            OnFailure::Reset,
            self.gateway.list_by_room(room_id),
        )
        .await;
    }

    /// Reload one student's reservations. A failure empties the scope.
    pub async fn load_by_student(&self, student_id: &UserId) {
        self.load(
            Scope::Student(student_id.clone()),
            OnFailure::Reset,
            self.gateway.list_by_student(student_id),
        )
        .await;
    }

    /// Delete a reservation, then reload "all" whatever the result.
    ///
    /// Returns whether the backend accepted the delete. A failure is
    /// reported on the "all" scope after the reload.
    pub async fn delete(&self, id: &ReservationId) -> bool {
        tracing::debug!(reservation_id = %id, "Deleting reservation");
        let result = self.gateway.delete(id).await;
        self.load_all().await;
        self.settle_mutation(id, result, DELETE_ERROR)
    }

    /// Replace a reservation, then reload "all" whatever the result.
    ///
    /// Returns whether the backend accepted the update.
    pub async fn update(&self, id: &ReservationId, reservation: &Reservation) -> bool {
        tracing::debug!(reservation_id = %id, status = %reservation.status, "Updating reservation");
        let result = self.gateway.update(id, reservation).await;
        self.load_all().await;
        self.settle_mutation(id, result, UPDATE_ERROR)
    }

    fn settle_mutation<T>(
        &self,
        id: &ReservationId,
        result: AppResult<ApiResponse<T>>,
        prefix: &str,
    ) -> bool {
        let details = match result {
            Ok(response) if response.is_success() => {
                tracing::info!(reservation_id = %id, "Reservation change accepted");
                return true;
            }
            Ok(response) => format!("HTTP {}", response.status),
            Err(e) if e.kind == ErrorKind::Serialization => {
                tracing::warn!(reservation_id = %id, "Change accepted with an unreadable answer: {}", e.message);
                return true;
            }
            Err(e) => e.message,
        };
        self.report_error(Scope::All, format!("{prefix}: {details}"));
        false
    }

    async fn load<F>(&self, scope: Scope, on_failure: OnFailure, request: F)
    where
        F: std::future::Future<Output = AppResult<ApiResponse<Vec<Reservation>>>>,
    {
        let generation = self.begin(&scope);
        tracing::debug!(scope = %scope, generation, "Loading reservations");

        let result = request.await;

        self.scopes.send_modify(|map| {
            let state = map.entry(scope.clone()).or_default();
            if self.discard_stale && generation != state.issued {
                tracing::warn!(
                    scope = %scope,
                    generation,
                    latest = state.issued,
                    "Discarding stale reservation load"
                );
                return;
            }

            state.loading = false;
            match result {
                Ok(response) if response.is_success() => {
                    state.reservations = response.body.unwrap_or_default();
                    state.error = None;
                    state.phase = ScopePhase::Loaded;
                    tracing::debug!(scope = %scope, count = state.reservations.len(), "Reservations loaded");
                }
                failed => {
                    let details = match failed {
                        Ok(response) => response.status.to_string(),
                        Err(e) => e.message,
                    };
                    tracing::warn!(scope = %scope, "Failed to load reservations: {details}");
                    if on_failure == OnFailure::Reset {
                        state.reservations.clear();
                    }
                    state.error = Some(format!("{LOAD_ERROR}: {details}"));
                    state.phase = ScopePhase::Error;
                }
            }
        });
    }

    fn begin(&self, scope: &Scope) -> u64 {
        let mut generation = 0;
        self.scopes.send_modify(|map| {
            let state = map.entry(scope.clone()).or_default();
            state.issued += 1;
            state.loading = true;
            state.error = None;
            state.phase = ScopePhase::Loading;
            generation = state.issued;
        });
        generation
    }
}
