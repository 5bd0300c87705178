//! Client-side booking value objects.

use chrono::NaiveDate;
use serde::Serialize;

use alquiler_core::error::AppError;
use alquiler_core::types::RoomId;

use super::status::ReservationStatus;

/// Message shown when the exit date does not come after the entry date.
pub const EXIT_NOT_AFTER_ENTRY: &str = "the exit date must be after the entry date";

/// A stay from `entry` to `exit`, calendar dates only.
///
/// Invariant: `exit` is strictly after `entry`. Whether `entry` lies in
/// the past is the date picker's concern, not this type's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    entry: NaiveDate,
    exit: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `exit <= entry`.
    pub fn new(entry: NaiveDate, exit: NaiveDate) -> Result<Self, AppError> {
        if exit <= entry {
            return Err(AppError::validation(EXIT_NOT_AFTER_ENTRY));
        }
        Ok(Self { entry, exit })
    }

    /// First day of the stay.
    pub fn entry(&self) -> NaiveDate {
        self.entry
    }

    /// Day the room is handed back.
    pub fn exit(&self) -> NaiveDate {
        self.exit
    }

    /// Number of nights between entry and exit (always at least one).
    pub fn nights(&self) -> i64 {
        (self.exit - self.entry).num_days()
    }
}

/// A locally validated, not yet submitted reservation intent.
///
/// Immutable once built; retrying a submission means building a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationDraft {
    room_id: RoomId,
    range: DateRange,
    status: ReservationStatus,
}

impl ReservationDraft {
    /// Create a draft in the `Pending` status.
    pub fn new(room_id: RoomId, range: DateRange) -> Self {
        Self {
            room_id,
            range,
            status: ReservationStatus::Pending,
        }
    }

    /// Room being booked.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Requested stay.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Status the reservation is requested with.
    pub fn status(&self) -> &ReservationStatus {
        &self.status
    }
}
