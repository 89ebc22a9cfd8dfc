//! Correlated temperature residual model for the tempest weather generator.
//!
//! Daily Tmax and Tmin deviate from the state-specific climatology by a
//! bivariate first-order autoregressive residual. The residual evolves every
//! day regardless of wet/dry state and carries across state transitions.
//!
//! ```text
//!  r[t−1] ──▶ A·r[t−1] + B·ε[t] ──▶ clip ±σ ──▶ mean + offset + r·std ──▶ Tmax, Tmin, Tave
//! ```
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`residual`] | [`ResidualModel`] |
//! | [`model`] | [`TemperatureModel`], [`DailyTemperature`] |
//! | [`consistency`] | [`check_consistency`], [`derive_coefficients`], [`ConsistencyPolicy`] |

pub mod consistency;
pub mod error;
pub mod model;
pub mod residual;

pub use consistency::{
    ConsistencyPolicy, ConsistencyReport, DEFAULT_CONSISTENCY_TOLERANCE, check_consistency,
    derive_coefficients, spectral_radius, stationary_moments,
};
pub use error::TemperatureError;
pub use model::{DEFAULT_MIN_DIURNAL_RANGE, DailyTemperature, TemperatureModel};
pub use residual::{DEFAULT_SIGMA_CLIP, ResidualModel};
