//! Error types for the tempest-precip crate.

/// Error type for all fallible operations in the tempest-precip crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PrecipError {
    /// Returned when the wet-day floor is invalid for the configured caps.
    #[error("invalid wet-day floor: {value} ({reason})")]
    InvalidFloor {
        /// The invalid value.
        value: f64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a sampling distribution cannot be constructed.
    #[error("cannot build depth distribution for month {month}: {reason}")]
    Distribution {
        /// 1-indexed month.
        month: u8,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a depth draw is NaN or infinite.
    #[error("non-finite depth draw for month {month}: {value}")]
    NonFiniteDepth {
        /// 1-indexed month.
        month: u8,
        /// The offending draw.
        value: f64,
    },

    /// Returned when an event's recurrence distribution cannot be constructed.
    #[error("cannot schedule extreme event '{name}': {reason}")]
    Schedule {
        /// Event name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a schedule does not match the catalog it is used with.
    #[error("event schedule has {got} entries but the catalog has {expected}")]
    ScheduleMismatch {
        /// Catalog length.
        expected: usize,
        /// Schedule length.
        got: usize,
    },
}
