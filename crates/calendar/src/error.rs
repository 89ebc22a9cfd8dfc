//! Error types for the tempest-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the tempest-calendar crate.
///
/// Covers invalid day-of-year and month values as well as simulation
/// windows that would produce no dates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a date string cannot be parsed as `YYYY-MM-DD`.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate {
        /// The text that failed to parse.
        input: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when the window end precedes its start.
    #[error("simulation window is inverted: end {end} is before start {start}")]
    InvertedWindow {
        /// First simulated date.
        start: NaiveDate,
        /// Last simulated date.
        end: NaiveDate,
    },
}
