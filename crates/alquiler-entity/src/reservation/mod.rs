//! Reservation domain entities.

pub mod draft;
pub mod model;
pub mod receipt;
pub mod request;
pub mod status;

pub use draft::{DateRange, ReservationDraft, EXIT_NOT_AFTER_ENTRY};
pub use model::Reservation;
pub use receipt::ReservationReceipt;
pub use request::{ReservationRequest, RoomRef, UserRef};
pub use status::ReservationStatus;
