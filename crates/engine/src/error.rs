//! Error types for the tempest-engine crate.

use tempest_calendar::{CalendarError, NaiveDate};
use tempest_params::ParamsError;
use tempest_precip::PrecipError;
use tempest_temperature::TemperatureError;

/// Error type for all fallible operations in the tempest-engine crate.
///
/// Every variant aborts the run; no partial realisations are returned.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Malformed parameters, missing basin, inconsistent matrices or an
    /// invalid simulation setting.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Description of the problem.
        reason: String,
    },

    /// A sampled or derived value fell outside its domain.
    #[error("sampling domain error on {date}: {reason}")]
    SamplingDomain {
        /// Simulated date on which the value was produced.
        date: NaiveDate,
        /// Description of the problem.
        reason: String,
    },

    /// The simulation window is empty or invalid.
    #[error("coverage error: {reason}")]
    Coverage {
        /// Description of the problem.
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn configuration(reason: impl ToString) -> Self {
        Self::Configuration {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn sampling(date: NaiveDate, reason: impl ToString) -> Self {
        Self::SamplingDomain {
            date,
            reason: reason.to_string(),
        }
    }
}

impl From<ParamsError> for EngineError {
    fn from(e: ParamsError) -> Self {
        Self::configuration(e)
    }
}

impl From<CalendarError> for EngineError {
    fn from(e: CalendarError) -> Self {
        Self::Coverage {
            reason: e.to_string(),
        }
    }
}

impl From<PrecipError> for EngineError {
    fn from(e: PrecipError) -> Self {
        Self::configuration(e)
    }
}

impl From<TemperatureError> for EngineError {
    fn from(e: TemperatureError) -> Self {
        Self::configuration(e)
    }
}
