//! Error types for the tempest-params crate.

/// Error type for all fallible operations in the tempest-params crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParamsError {
    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a monthly table does not have exactly 12 entries.
    #[error("expected 12 monthly values, got {got}")]
    MonthCount {
        /// Number of values provided.
        got: usize,
    },

    /// Wraps an error raised while building the entry for one month.
    #[error("month {month}: {source}")]
    AtMonth {
        /// 1-indexed month.
        month: u8,
        /// The underlying error.
        #[source]
        source: Box<ParamsError>,
    },

    /// Returned when negative binomial spell parameters are degenerate.
    #[error("invalid spell parameters: {reason}")]
    InvalidSpell {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when generalized gamma depth parameters are degenerate.
    #[error("invalid depth parameters: {reason}")]
    InvalidDepth {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a monthly depth cap is non-finite or non-positive.
    #[error("invalid depth cap for month {month}: {value} (must be finite and > 0)")]
    InvalidDepthCap {
        /// 1-indexed month.
        month: u8,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a climatology table is malformed.
    #[error("invalid climatology table '{table}': {reason}")]
    InvalidClimatology {
        /// Name of the offending table.
        table: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a temperature offset is non-finite.
    #[error("invalid temperature offset '{name}': {value} (must be finite)")]
    InvalidOffset {
        /// Name of the offset.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a correlation matrix is malformed.
    #[error("invalid matrix {name}: {reason}")]
    InvalidMatrix {
        /// Matrix name (`A`, `B`, `M0` or `M1`).
        name: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an extreme-event specification is malformed.
    #[error("invalid extreme event '{name}': {reason}")]
    InvalidEvent {
        /// Event name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when two catalog entries share a name or return period.
    #[error("duplicate extreme event: {reason}")]
    DuplicateEvent {
        /// Description of the clash.
        reason: String,
    },

    /// Returned when the latitude is outside -90..=90.
    #[error("invalid latitude: {value} (must be finite and within -90..=90)")]
    InvalidLatitude {
        /// The invalid value.
        value: f64,
    },

    /// Returned when the crop coefficient is non-finite or negative.
    #[error("invalid crop coefficient: {value} (must be finite and >= 0)")]
    InvalidCropCoefficient {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a required component was never supplied to the builder.
    #[error("parameter set is missing {name}")]
    MissingComponent {
        /// Name of the missing component.
        name: &'static str,
    },

    /// Returned when a repository has no parameters for a basin.
    #[error("unknown basin: '{basin}'")]
    UnknownBasin {
        /// The requested basin identifier.
        basin: String,
    },

    /// Returned when a repository fails to read or decode its backing store.
    #[error("failed to load parameters for basin '{basin}': {reason}")]
    Repository {
        /// The requested basin identifier.
        basin: String,
        /// Description of the problem.
        reason: String,
    },
}

impl ParamsError {
    /// Attaches a month to an error raised while building a monthly entry.
    pub fn at_month(self, month: u8) -> Self {
        Self::AtMonth {
            month,
            source: Box::new(self),
        }
    }
}
