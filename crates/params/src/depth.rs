//! Generalized gamma wet-day depth parameters and statrs bridge.

use statrs::distribution::{ContinuousCDF, Gamma};

use crate::error::ParamsError;
use crate::monthly::Monthly;

/// Cumulative probability used to derive monthly depth caps.
pub const DEFAULT_CAP_PROBABILITY: f64 = 0.95;

/// Validated parameters of a four-parameter generalized gamma distribution.
///
/// A draw is `location + scale * y^(1 / shape_c)` with `y ~ Gamma(shape_a, 1)`.
/// `shape_c` may be negative, which inverts the tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaDepth {
    shape_a: f64,
    shape_c: f64,
    location: f64,
    scale: f64,
}

impl GammaDepth {
    /// Creates validated depth parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidDepth`] unless `shape_a > 0`,
    /// `shape_c != 0`, `scale > 0` and every value is finite.
    pub fn new(shape_a: f64, shape_c: f64, location: f64, scale: f64) -> Result<Self, ParamsError> {
        if !shape_a.is_finite() || shape_a <= 0.0 {
            return Err(ParamsError::InvalidDepth {
                reason: format!("shape a must be finite and > 0, got {shape_a}"),
            });
        }
        if !shape_c.is_finite() || shape_c == 0.0 {
            return Err(ParamsError::InvalidDepth {
                reason: format!("shape c must be finite and non-zero, got {shape_c}"),
            });
        }
        if !location.is_finite() {
            return Err(ParamsError::InvalidDepth {
                reason: format!("location must be finite, got {location}"),
            });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ParamsError::InvalidDepth {
                reason: format!("scale must be finite and > 0, got {scale}"),
            });
        }
        Ok(Self {
            shape_a,
            shape_c,
            location,
            scale,
        })
    }

    /// First shape parameter (`a`).
    pub fn shape_a(&self) -> f64 {
        self.shape_a
    }

    /// Second shape parameter (`c`).
    pub fn shape_c(&self) -> f64 {
        self.shape_c
    }

    /// Location shift.
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a standard gamma variate `y` onto the depth axis.
    pub fn transform(&self, y: f64) -> f64 {
        self.location + self.scale * y.powf(1.0 / self.shape_c)
    }

    /// Cumulative distribution function at depth `x`.
    pub fn cdf(&self, x: f64) -> Result<f64, ParamsError> {
        let z = (x - self.location) / self.scale;
        if z <= 0.0 {
            return Ok(0.0);
        }
        let g = unit_gamma(self.shape_a)?.cdf(z.powf(self.shape_c));
        Ok(if self.shape_c > 0.0 { g } else { 1.0 - g })
    }

    /// Depth with cumulative probability `p`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidDepth`] if `p` is outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Result<f64, ParamsError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(ParamsError::InvalidDepth {
                reason: format!("quantile probability must be in (0, 1), got {p}"),
            });
        }
        let target = if self.shape_c > 0.0 { p } else { 1.0 - p };
        let y = unit_gamma(self.shape_a)?.inverse_cdf(target);
        Ok(self.transform(y))
    }
}

/// Derives monthly depth caps as the depth at cumulative probability `p`.
pub fn depth_caps_from_quantile(
    depths: &Monthly<GammaDepth>,
    p: f64,
) -> Result<Monthly<f64>, ParamsError> {
    Monthly::try_from_fn(|month| depths.for_month(month).quantile(p))
}

/// Gamma with the given shape and unit scale. statrs takes `(shape, rate)`.
fn unit_gamma(shape: f64) -> Result<Gamma, ParamsError> {
    Gamma::new(shape, 1.0).map_err(|e| ParamsError::InvalidDepth {
        reason: format!("gamma construction failed for shape {shape}: {e}"),
    })
}
