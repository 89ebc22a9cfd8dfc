//! Agreement between residual coefficients and correlation matrices.
//!
//! For the recursion `r[t] = A·r[t−1] + B·ε[t]` to reproduce lag-0 and
//! lag-1 correlations `M0`, `M1`:
//!
//! ```text
//! M1   = A·M0
//! B·Bᵀ = M0 − A·M0·Aᵀ
//! ```

use tempest_params::{CorrelationMatrices, Mat2};
use tracing::{debug, warn};

use crate::error::TemperatureError;

/// Default max-abs tolerance for [`ConsistencyPolicy`].
pub const DEFAULT_CONSISTENCY_TOLERANCE: f64 = 1e-3;

const MAX_LYAPUNOV_ITERATIONS: usize = 10_000;

/// Max-abs errors of the two consistency relations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyReport {
    /// `max |M1 − A·M0|`.
    pub lag1_error: f64,
    /// `max |B·Bᵀ − (M0 − A·M0·Aᵀ)|`.
    pub covariance_error: f64,
}

impl ConsistencyReport {
    /// The larger of the two errors.
    pub fn max_error(&self) -> f64 {
        self.lag1_error.max(self.covariance_error)
    }

    /// Returns `true` if both errors are within `tolerance`.
    pub fn within(&self, tolerance: f64) -> bool {
        self.max_error() <= tolerance
    }
}

/// What to do when the matrices disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsistencyPolicy {
    /// Fail with [`TemperatureError::Inconsistent`] beyond the tolerance.
    Enforce(f64),
    /// Log a warning beyond the tolerance.
    Warn(f64),
    /// Do not check.
    Skip,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self::Warn(DEFAULT_CONSISTENCY_TOLERANCE)
    }
}

impl ConsistencyPolicy {
    /// Checks the tolerance value, if any.
    pub fn validate(&self) -> Result<(), TemperatureError> {
        match self {
            Self::Enforce(tol) | Self::Warn(tol) if !tol.is_finite() || *tol < 0.0 => {
                Err(TemperatureError::InvalidConfig {
                    reason: format!("consistency tolerance must be finite and >= 0, got {tol}"),
                })
            }
            _ => Ok(()),
        }
    }

    /// Applies the policy to a set of matrices.
    ///
    /// Returns the report when a check was run.
    pub fn apply(
        &self,
        matrices: &CorrelationMatrices,
    ) -> Result<Option<ConsistencyReport>, TemperatureError> {
        let tolerance = match *self {
            Self::Skip => return Ok(None),
            Self::Enforce(tol) | Self::Warn(tol) => tol,
        };
        let report = check_consistency(matrices);
        debug!(
            lag1_error = report.lag1_error,
            covariance_error = report.covariance_error,
            "residual matrix consistency"
        );
        if !report.within(tolerance) {
            match self {
                Self::Enforce(_) => {
                    return Err(TemperatureError::Inconsistent {
                        lag1_error: report.lag1_error,
                        covariance_error: report.covariance_error,
                        tolerance,
                    });
                }
                _ => warn!(
                    lag1_error = report.lag1_error,
                    covariance_error = report.covariance_error,
                    tolerance,
                    "residual matrices A, B disagree with M0, M1"
                ),
            }
        }
        Ok(Some(report))
    }
}

/// Computes the max-abs errors of both consistency relations.
pub fn check_consistency(matrices: &CorrelationMatrices) -> ConsistencyReport {
    let (a, b, m0, m1) = (matrices.a(), matrices.b(), matrices.m0(), matrices.m1());
    let a_m0 = a.mul(m0);
    let target = m0.sub(&a_m0.mul(&a.transpose()));
    ConsistencyReport {
        lag1_error: m1.max_abs_diff(&a_m0),
        covariance_error: b.mul(&b.transpose()).max_abs_diff(&target),
    }
}

/// Derives `A = M1·M0⁻¹` and lower-triangular `B` with
/// `B·Bᵀ = M0 − A·M0·Aᵀ`.
///
/// # Errors
///
/// Returns [`TemperatureError::Derivation`] if `M0` is singular or the
/// innovation covariance is not positive-definite.
pub fn derive_coefficients(m0: &Mat2, m1: &Mat2) -> Result<(Mat2, Mat2), TemperatureError> {
    let m0_inv = m0.inverse().ok_or_else(|| TemperatureError::Derivation {
        reason: "M0 is singular".to_string(),
    })?;
    let a = m1.mul(&m0_inv);
    let innovation = m0.sub(&a.mul(m0).mul(&a.transpose()));
    // Symmetrize away rounding before factoring.
    let off = 0.5 * (innovation.get(0, 1) + innovation.get(1, 0));
    let innovation = Mat2::new([
        [innovation.get(0, 0), off],
        [off, innovation.get(1, 1)],
    ]);
    let b = innovation
        .cholesky()
        .ok_or_else(|| TemperatureError::Derivation {
            reason: "M0 - A·M0·Aᵀ is not positive-definite".to_string(),
        })?;
    Ok((a, b))
}

/// Spectral radius of a 2×2 matrix.
pub fn spectral_radius(m: &Mat2) -> f64 {
    let tr = m.get(0, 0) + m.get(1, 1);
    let det = m.det();
    let disc = tr * tr - 4.0 * det;
    if disc >= 0.0 {
        let s = disc.sqrt();
        ((tr + s) * 0.5).abs().max(((tr - s) * 0.5).abs())
    } else {
        det.sqrt()
    }
}

/// Stationary lag-0 and lag-1 covariance of the recursion for given `A`, `B`.
///
/// Solves `M0 = A·M0·Aᵀ + B·Bᵀ` by fixed-point iteration, then `M1 = A·M0`.
///
/// # Errors
///
/// Returns [`TemperatureError::Derivation`] if `A` is not stable (spectral
/// radius `>= 1`) or the iteration does not converge.
pub fn stationary_moments(a: &Mat2, b: &Mat2) -> Result<(Mat2, Mat2), TemperatureError> {
    let rho = spectral_radius(a);
    if !rho.is_finite() || rho >= 1.0 {
        return Err(TemperatureError::Derivation {
            reason: format!("A is not stable: spectral radius {rho}"),
        });
    }
    let q = b.mul(&b.transpose());
    let at = a.transpose();
    let mut m0 = q;
    for _ in 0..MAX_LYAPUNOV_ITERATIONS {
        let next = a.mul(&m0).mul(&at).add(&q);
        if next.max_abs_diff(&m0) < 1e-14 {
            return Ok((next, a.mul(&next)));
        }
        m0 = next;
    }
    Err(TemperatureError::Derivation {
        reason: "stationary covariance iteration did not converge".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempest_params::frio;

    fn frio_matrices() -> CorrelationMatrices {
        let (a, b) = (frio::residual_a(), frio::residual_b());
        let (m0, m1) = stationary_moments(&a, &b).unwrap();
        CorrelationMatrices::new(a, b, m0, m1).unwrap()
    }

    #[test]
    fn stationary_moments_are_consistent() {
        let report = check_consistency(&frio_matrices());
        assert!(report.within(1e-10), "{report:?}");
    }

    #[test]
    fn derive_recovers_frio_a() {
        let m = frio_matrices();
        let (a, b) = derive_coefficients(m.m0(), m.m1()).unwrap();
        assert!(a.max_abs_diff(&frio::residual_a()) < 1e-8);
        // B is only identified up to B·Bᵀ.
        let bbt = b.mul(&b.transpose());
        let expected = frio::residual_b().mul(&frio::residual_b().transpose());
        assert!(bbt.max_abs_diff(&expected) < 1e-8);
        assert_eq!(b.get(0, 1), 0.0);
    }

    #[test]
    fn derived_coefficients_satisfy_relations() {
        let m0 = Mat2::new([[1.0, 0.6], [0.6, 1.0]]);
        let m1 = Mat2::new([[0.6, 0.4], [0.35, 0.7]]);
        let (a, b) = derive_coefficients(&m0, &m1).unwrap();
        let report = check_consistency(&CorrelationMatrices::new(a, b, m0, m1).unwrap());
        assert!(report.within(1e-12), "{report:?}");
    }

    #[test]
    fn derive_rejects_singular_m0() {
        let m0 = Mat2::new([[1.0, 1.0], [1.0, 1.0]]);
        let err = derive_coefficients(&m0, &Mat2::zeros()).unwrap_err();
        assert!(err.to_string().contains("singular"));
    }

    #[test]
    fn derive_rejects_non_positive_innovation() {
        // Lag-1 correlation stronger than lag-0 leaves no room for noise.
        let m0 = Mat2::identity();
        let m1 = Mat2::new([[1.2, 0.0], [0.0, 0.5]]);
        let err = derive_coefficients(&m0, &m1).unwrap_err();
        assert!(err.to_string().contains("positive-definite"));
    }

    #[test]
    fn spectral_radius_known() {
        assert_abs_diff_eq!(spectral_radius(&Mat2::new([[0.5, 0.0], [0.0, -0.8]])), 0.8);
        // Rotation by 90° scaled by 0.5 has complex eigenvalues of modulus 0.5.
        assert_abs_diff_eq!(
            spectral_radius(&Mat2::new([[0.0, -0.5], [0.5, 0.0]])),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn unstable_a_rejected() {
        let a = Mat2::new([[1.1, 0.0], [0.0, 0.2]]);
        assert!(stationary_moments(&a, &Mat2::identity()).is_err());
    }

    #[test]
    fn policy_enforce_fails_on_mismatch() {
        let m = CorrelationMatrices::new(
            Mat2::new([[0.5, 0.0], [0.0, 0.5]]),
            Mat2::identity(),
            Mat2::identity(),
            Mat2::zeros(),
        )
        .unwrap();
        let err = ConsistencyPolicy::Enforce(1e-3).apply(&m).unwrap_err();
        assert!(matches!(err, TemperatureError::Inconsistent { .. }));
        let report = ConsistencyPolicy::Warn(1e-3).apply(&m).unwrap().unwrap();
        assert_abs_diff_eq!(report.lag1_error, 0.5);
        assert!(ConsistencyPolicy::Skip.apply(&m).unwrap().is_none());
    }

    #[test]
    fn policy_validate() {
        assert!(ConsistencyPolicy::Enforce(-1.0).validate().is_err());
        assert!(ConsistencyPolicy::Warn(f64::NAN).validate().is_err());
        assert!(ConsistencyPolicy::default().validate().is_ok());
        assert!(ConsistencyPolicy::Skip.validate().is_ok());
    }
}
