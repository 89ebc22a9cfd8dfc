//! Lag-0 / lag-1 correlation matrices and residual coefficients.

use crate::error::ParamsError;
use crate::matrix::Mat2;

/// Coefficients `A`, `B` of the residual recursion together with the
/// lag-0 (`M0`) and lag-1 (`M1`) correlation matrices they were fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationMatrices {
    a: Mat2,
    b: Mat2,
    m0: Mat2,
    m1: Mat2,
}

impl CorrelationMatrices {
    /// Validates and bundles the four matrices.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidMatrix`] if any matrix has a non-finite
    /// entry, or if `M0` is not symmetric with a positive diagonal.
    pub fn new(a: Mat2, b: Mat2, m0: Mat2, m1: Mat2) -> Result<Self, ParamsError> {
        for (name, m) in [("A", &a), ("B", &b), ("M0", &m0), ("M1", &m1)] {
            if !m.is_finite() {
                return Err(ParamsError::InvalidMatrix {
                    name,
                    reason: "contains non-finite entries".to_string(),
                });
            }
        }
        if !m0.is_symmetric(1e-9) {
            return Err(ParamsError::InvalidMatrix {
                name: "M0",
                reason: format!(
                    "not symmetric: off-diagonal entries {} and {}",
                    m0.get(0, 1),
                    m0.get(1, 0)
                ),
            });
        }
        if m0.get(0, 0) <= 0.0 || m0.get(1, 1) <= 0.0 {
            return Err(ParamsError::InvalidMatrix {
                name: "M0",
                reason: "diagonal entries must be > 0".to_string(),
            });
        }
        Ok(Self { a, b, m0, m1 })
    }

    /// Autoregressive coefficient matrix.
    pub fn a(&self) -> &Mat2 {
        &self.a
    }

    /// Noise loading matrix.
    pub fn b(&self) -> &Mat2 {
        &self.b
    }

    /// Lag-0 correlation matrix.
    pub fn m0(&self) -> &Mat2 {
        &self.m0
    }

    /// Lag-1 correlation matrix.
    pub fn m1(&self) -> &Mat2 {
        &self.m1
    }
}
