//! Two-pick date-range selection for one room.
//!
//! The first pick sets the entry date, the second sets the exit date and
//! validates the ordering. Whether a date is in the past is the date
//! picker's business; this module only checks entry/exit ordering.

use chrono::NaiveDate;

use alquiler_core::types::RoomId;
use alquiler_entity::reservation::{DateRange, EXIT_NOT_AFTER_ENTRY, ReservationDraft};

/// Where a selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing picked yet.
    #[default]
    Empty,
    /// Entry picked, waiting for the exit.
    PartialEntry {
        /// Picked entry date.
        entry: NaiveDate,
    },
    /// Both dates picked and ordered.
    Ready {
        /// The validated stay.
        range: DateRange,
    },
    /// Both dates picked but the exit is not after the entry.
    Invalid {
        /// Picked entry date.
        entry: NaiveDate,
        /// Picked exit date, kept so it can still be shown.
        exit: NaiveDate,
        /// Message to show inline.
        message: &'static str,
    },
}

impl SelectionState {
    /// Picked entry date, if any.
    pub fn entry(&self) -> Option<NaiveDate> {
        match self {
            Self::Empty => None,
            Self::PartialEntry { entry } | Self::Invalid { entry, .. } => Some(*entry),
            Self::Ready { range } => Some(range.entry()),
        }
    }

    /// Picked exit date, if any.
    pub fn exit(&self) -> Option<NaiveDate> {
        match self {
            Self::Empty | Self::PartialEntry { .. } => None,
            Self::Invalid { exit, .. } => Some(*exit),
            Self::Ready { range } => Some(range.exit()),
        }
    }

    /// Validation message, only set when `Invalid`.
    pub fn error(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { message, .. } => Some(*message),
            _ => None,
        }
    }

    /// Whether the selection may be submitted.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Selection state machine.
///
/// After `Ready` or `Invalid`, a further pick replaces the exit date and
/// re-validates against the kept entry; a new selection starts only after
/// [`clear`](Self::clear). With `auto_reset` on, such a pick starts a new
/// selection instead, using the picked date as the entry.
#[derive(Debug, Clone, Default)]
pub struct BookingSelection {
    state: SelectionState,
    auto_reset: bool,
}

impl BookingSelection {
    /// Create an empty selection.
    pub fn new(auto_reset: bool) -> Self {
        Self {
            state: SelectionState::Empty,
            auto_reset,
        }
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Apply one date pick and return the resulting state.
    pub fn select_date(&mut self, candidate: NaiveDate) -> SelectionState {
        self.state = match self.state {
            SelectionState::Empty => SelectionState::PartialEntry { entry: candidate },
            SelectionState::PartialEntry { entry } => Self::validate(entry, candidate),
            SelectionState::Ready { .. } | SelectionState::Invalid { .. } if self.auto_reset => {
                SelectionState::PartialEntry { entry: candidate }
            }
            SelectionState::Ready { range } => Self::validate(range.entry(), candidate),
            SelectionState::Invalid { entry, .. } => Self::validate(entry, candidate),
        };

        tracing::trace!(state = ?self.state, "Date selected");
        self.state
    }

    /// Forget both dates and any error.
    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
    }

    /// Whether the selection may be submitted.
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    /// Build a draft for `room_id`; `None` unless the selection is `Ready`.
    pub fn draft(&self, room_id: RoomId) -> Option<ReservationDraft> {
        match self.state {
            SelectionState::Ready { range } => Some(ReservationDraft::new(room_id, range)),
            _ => None,
        }
    }

    fn validate(entry: NaiveDate, exit: NaiveDate) -> SelectionState {
        match DateRange::new(entry, exit) {
            Ok(range) => SelectionState::Ready { range },
            Err(_) => SelectionState::Invalid {
                entry,
                exit,
                message: EXIT_NOT_AFTER_ENTRY,
            },
        }
    }
}
