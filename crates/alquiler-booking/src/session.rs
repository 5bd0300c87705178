//! Booking session: ties the selection, the submitter, and the list
//! state to one owner and to the lifetime of the tasks it launches.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use tokio::sync::broadcast;
use tokio::task::{AbortHandle, JoinSet};

use alquiler_core::config::BookingConfig;
use alquiler_core::error::AppError;
use alquiler_core::types::{ReservationId, RoomId, UserId};
use alquiler_entity::reservation::Reservation;

use crate::list_state::{ReservationListState, Scope};
use crate::selection::{BookingSelection, SelectionState};
use crate::submitter::{ReservationSubmitter, SubmitOutcome};

/// Capacity of the event channel; slow subscribers lag past this.
const EVENT_BUFFER: usize = 64;

/// Completion notices for mutating operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    /// A submission finished, whatever its outcome.
    Submitted {
        /// Room the reservation was requested for.
        room_id: RoomId,
        /// Classified result.
        outcome: SubmitOutcome,
    },
    /// A delete finished and "all" was reloaded.
    Deleted {
        /// Target reservation.
        id: ReservationId,
        /// Whether the backend accepted it.
        accepted: bool,
    },
    /// An update finished and "all" was reloaded.
    Updated {
        /// Target reservation.
        id: ReservationId,
        /// Whether the backend accepted it.
        accepted: bool,
    },
}

/// The parts every spawned task needs.
#[derive(Debug, Clone)]
struct Workflow {
    list: Arc<ReservationListState>,
    submitter: Arc<ReservationSubmitter>,
    selection: Arc<Mutex<BookingSelection>>,
    events: broadcast::Sender<BookingEvent>,
}

impl Workflow {
    async fn confirm(&self, room_id: RoomId, entry: NaiveDate, exit: NaiveDate) -> SubmitOutcome {
        let outcome = self.submitter.confirm(room_id.clone(), entry, exit).await;

        if outcome.requires_reload() {
            self.list.load_all().await;
        }
        match outcome.error_message() {
            Some(message) => self.list.report_error(Scope::All, message),
            None => lock(&self.selection).clear(),
        }

        let _ = self.events.send(BookingEvent::Submitted {
            room_id,
            outcome: outcome.clone(),
        });
        outcome
    }

    async fn delete(&self, id: ReservationId) -> bool {
        let accepted = self.list.delete(&id).await;
        let _ = self.events.send(BookingEvent::Deleted { id, accepted });
        accepted
    }

    async fn update(&self, id: ReservationId, reservation: Reservation) -> bool {
        let accepted = self.list.update(&id, &reservation).await;
        let _ = self.events.send(BookingEvent::Updated { id, accepted });
        accepted
    }
}

/// One booking screen's worth of state and background work.
///
/// `spawn_*` methods launch operations as Tokio tasks owned by the
/// session and must be called from within a runtime. [`shutdown`]
/// aborts them; dropping the session does the same. An aborted task
/// makes no further state changes.
///
/// [`shutdown`]: Self::shutdown
#[derive(Debug)]
pub struct BookingSession {
    workflow: Workflow,
    tasks: Mutex<JoinSet<()>>,
}

impl BookingSession {
    /// Create a session over shared list state and submitter.
    pub fn new(
        list: Arc<ReservationListState>,
        submitter: Arc<ReservationSubmitter>,
        config: &BookingConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            workflow: Workflow {
                list,
                submitter,
                selection: Arc::new(Mutex::new(BookingSelection::new(
                    config.auto_reset_selection,
                ))),
                events,
            },
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// The reservation lists this session refreshes.
    pub fn list(&self) -> &Arc<ReservationListState> {
        &self.workflow.list
    }

    /// Receive completion events for mutating operations.
    pub fn subscribe_events(&self) -> broadcast::Receiver<BookingEvent> {
        self.workflow.events.subscribe()
    }

    /// Current selection state.
    pub fn selection(&self) -> SelectionState {
        lock(&self.workflow.selection).state()
    }

    /// Apply a date pick.
    pub fn select_date(&self, date: NaiveDate) -> SelectionState {
        lock(&self.workflow.selection).select_date(date)
    }

    /// Reset the selection.
    pub fn clear_selection(&self) {
        lock(&self.workflow.selection).clear();
    }

    /// Submit the current selection for `room_id`.
    ///
    /// Fails with a validation error, without touching the network, when
    /// the selection is not `Ready`.
    pub async fn confirm_selection(&self, room_id: RoomId) -> Result<SubmitOutcome, AppError> {
        let (entry, exit) = ready_dates(self.selection())?;
        Ok(self.workflow.confirm(room_id, entry, exit).await)
    }

    /// Submit, reload "all" when the outcome calls for it, and surface
    /// any failure message on the "all" scope.
    pub async fn confirm(&self, room_id: RoomId, entry: NaiveDate, exit: NaiveDate) -> SubmitOutcome {
        self.workflow.confirm(room_id, entry, exit).await
    }

    /// Delete a reservation and reload "all".
    pub async fn delete(&self, id: ReservationId) -> bool {
        self.workflow.delete(id).await
    }

    /// Update a reservation and reload "all".
    pub async fn update(&self, id: ReservationId, reservation: Reservation) -> bool {
        self.workflow.update(id, reservation).await
    }

    /// Launch `load_all` in the background.
    pub fn spawn_load_all(&self) -> AbortHandle {
        let list = self.workflow.list.clone();
        self.spawn(async move { list.load_all().await })
    }

    /// Launch `load_by_room` in the background.
    pub fn spawn_load_by_room(&self, room_id: RoomId) -> AbortHandle {
        let list = self.workflow.list.clone();
        self.spawn(async move { list.load_by_room(&room_id).await })
    }

    /// Launch `load_by_student` in the background.
    pub fn spawn_load_by_student(&self, student_id: UserId) -> AbortHandle {
        let list = self.workflow.list.clone();
        self.spawn(async move { list.load_by_student(&student_id).await })
    }

    /// Launch a delete in the background.
    pub fn spawn_delete(&self, id: ReservationId) -> AbortHandle {
        let workflow = self.workflow.clone();
        self.spawn(async move {
            workflow.delete(id).await;
        })
    }

    /// Launch an update in the background.
    pub fn spawn_update(&self, id: ReservationId, reservation: Reservation) -> AbortHandle {
        let workflow = self.workflow.clone();
        self.spawn(async move {
            workflow.update(id, reservation).await;
        })
    }

    /// Launch a submission of the current selection in the background.
    pub fn spawn_confirm(&self, room_id: RoomId) -> Result<AbortHandle, AppError> {
        let (entry, exit) = ready_dates(self.selection())?;
        let workflow = self.workflow.clone();
        Ok(self.spawn(async move {
            workflow.confirm(room_id, entry, exit).await;
        }))
    }

    /// Number of launched tasks not yet reaped.
    pub fn in_flight(&self) -> usize {
        let mut tasks = lock(&self.tasks);
        while tasks.try_join_next().is_some() {}
        tasks.len()
    }

    /// Wait for every task launched so far to finish.
    pub async fn wait_idle(&self) {
        let mut tasks = std::mem::take(&mut *lock(&self.tasks));
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                if e.is_panic() {
                    tracing::error!("Booking task panicked: {e}");
                }
            }
        }
    }

    /// Abort every outstanding task.
    pub fn shutdown(&self) {
        let mut tasks = lock(&self.tasks);
        if !tasks.is_empty() {
            tracing::debug!(tasks = tasks.len(), "Aborting booking tasks");
        }
        tasks.abort_all();
    }

    fn spawn<F>(&self, task: F) -> AbortHandle
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let mut tasks = lock(&self.tasks);
        while tasks.try_join_next().is_some() {}
        tasks.spawn(task)
    }
}

fn ready_dates(state: SelectionState) -> Result<(NaiveDate, NaiveDate), AppError> {
    match state {
        SelectionState::Ready { range } => Ok((range.entry(), range.exit())),
        SelectionState::Invalid { message, .. } => Err(AppError::validation(message)),
        _ => Err(AppError::validation("select both the entry and the exit date")),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
