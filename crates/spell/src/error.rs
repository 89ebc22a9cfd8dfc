//! Error types for the tempest-spell crate.

use tempest_params::WeatherState;

/// Error type for all fallible operations in the tempest-spell crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpellError {
    /// Returned when the mixing distribution cannot be constructed.
    #[error("cannot build spell distribution for {state} spells in month {month}: {reason}")]
    Distribution {
        /// 1-indexed month.
        month: u8,
        /// State of the spell being drawn.
        state: WeatherState,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a draw is non-finite or does not fit in a day count.
    #[error("spell length draw out of range for {state} spells in month {month}: {value}")]
    OutOfRange {
        /// 1-indexed month.
        month: u8,
        /// State of the spell being drawn.
        state: WeatherState,
        /// The offending draw.
        value: f64,
    },
}
