//! Date-picker contract.
//!
//! The picker hands out one calendar date per interaction and only offers
//! dates from today onward. The booking selection trusts that restriction
//! and does not re-check it.

use chrono::{Local, NaiveDate};

/// Source of "today" and the selectable-date rule.
pub trait DatePicker: Send + Sync + std::fmt::Debug {
    /// The current calendar date as seen by the user.
    fn today(&self) -> NaiveDate;

    /// Whether `date` may be offered to the user.
    fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.today()
    }
}

/// Picker backed by the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDatePicker;

impl DatePicker for SystemDatePicker {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Picker pinned to a fixed "today", for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedDatePicker {
    today: NaiveDate,
}

impl FixedDatePicker {
    /// Create a picker whose today is `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl DatePicker for FixedDatePicker {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
