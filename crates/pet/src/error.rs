//! Error types for the tempest-pet crate.

/// Error type for all fallible operations in the tempest-pet crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PetError {
    /// Returned when input series have different lengths.
    #[error("length mismatch: {name} has {got} elements, expected {expected}")]
    LengthMismatch {
        /// Name of the offending series.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when the latitude is outside -90..=90.
    #[error("invalid latitude: {value} (must be finite and within -90..=90)")]
    InvalidLatitude {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a coefficient is non-finite or negative.
    #[error("invalid {name}: {value} (must be finite and >= 0)")]
    InvalidCoefficient {
        /// Coefficient name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
}
