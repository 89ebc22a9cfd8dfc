//! Error types for the tempest-temperature crate.

/// Error type for all fallible operations in the tempest-temperature crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TemperatureError {
    /// Returned when a model setting is out of range.
    #[error("invalid temperature model setting: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a residual or temperature is NaN or infinite.
    #[error("non-finite {quantity}: {value}")]
    NonFinite {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when `A`, `B` disagree with `M0`, `M1` beyond tolerance.
    #[error(
        "residual matrices are inconsistent: |M1 - A·M0| = {lag1_error:.3e}, \
         |B·Bᵀ - (M0 - A·M0·Aᵀ)| = {covariance_error:.3e}, tolerance {tolerance:.3e}"
    )]
    Inconsistent {
        /// Max-abs error of the lag-1 relation.
        lag1_error: f64,
        /// Max-abs error of the covariance relation.
        covariance_error: f64,
        /// Tolerance in force.
        tolerance: f64,
    },

    /// Returned when coefficients cannot be derived from the correlation matrices.
    #[error("cannot derive residual coefficients: {reason}")]
    Derivation {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let e = TemperatureError::InvalidConfig {
            reason: "sigma clip must be > 0".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid temperature model setting: sigma clip must be > 0"
        );
    }

    #[test]
    fn error_non_finite() {
        let e = TemperatureError::NonFinite {
            quantity: "tmax",
            value: f64::INFINITY,
        };
        assert_eq!(e.to_string(), "non-finite tmax: inf");
    }

    #[test]
    fn error_inconsistent() {
        let e = TemperatureError::Inconsistent {
            lag1_error: 0.25,
            covariance_error: 0.001,
            tolerance: 0.01,
        };
        assert_eq!(
            e.to_string(),
            "residual matrices are inconsistent: |M1 - A·M0| = 2.500e-1, \
             |B·Bᵀ - (M0 - A·M0·Aᵀ)| = 1.000e-3, tolerance 1.000e-2"
        );
    }

    #[test]
    fn error_derivation() {
        let e = TemperatureError::Derivation {
            reason: "M0 is singular".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "cannot derive residual coefficients: M0 is singular"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<TemperatureError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TemperatureError>();
    }
}
