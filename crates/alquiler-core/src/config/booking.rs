//! Booking workflow configuration.

use serde::{Deserialize, Serialize};

/// Switches for the reservation booking workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Send the student id from the token subject in the reservation payload.
    /// When off, the backend derives the student from the bearer token.
    #[serde(default)]
    pub include_student_id: bool,
    /// Drop list-load completions that were overtaken by a newer load of
    /// the same scope.
    #[serde(default = "default_true")]
    pub discard_stale_responses: bool,
    /// Start a new selection when a date is picked after the range is
    /// already complete, instead of replacing the exit date.
    #[serde(default)]
    pub auto_reset_selection: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            include_student_id: false,
            discard_stale_responses: true,
            auto_reset_selection: false,
        }
    }
}

fn default_true() -> bool {
    true
}
