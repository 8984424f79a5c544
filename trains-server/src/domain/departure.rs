//! Departure board entries.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One upcoming departure from a stop.
///
/// `arrival` is the coverage's local time as published upstream; it carries
/// no UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// Where the train is heading, as displayed on the board.
    pub direction: String,
    /// When the train reaches the stop.
    pub arrival: NaiveDateTime,
}

impl Departure {
    /// Create a departure.
    pub fn new(direction: impl Into<String>, arrival: NaiveDateTime) -> Self {
        Self {
            direction: direction.into(),
            arrival,
        }
    }
}
