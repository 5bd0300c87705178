//! # alquiler-booking
//!
//! The reservation booking workflow.
//!
//! - [`selection`]: two-pick date-range selection and its validation
//! - [`submitter`]: turning a draft into `POST /reservas` and classifying the result
//! - [`list_state`]: per-scope reservation snapshots, refreshed after mutations
//! - [`session`]: task lifetime and event fan-out for one booking screen
//! - [`gateway`]: the backend port the workflow talks through

pub mod gateway;
pub mod list_state;
pub mod selection;
pub mod session;
pub mod submitter;

#[cfg(test)]
pub(crate) mod fake;

pub use gateway::ReservationGateway;
pub use list_state::{ReservationListState, Scope, ScopePhase, ScopeState, Snapshot};
pub use selection::{BookingSelection, SelectionState};
pub use session::{BookingEvent, BookingSession};
pub use submitter::{ReservationSubmitter, SubmitOutcome};
