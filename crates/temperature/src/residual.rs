//! First-order bivariate autoregressive residual process.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tempest_params::{Mat2, Vec2};

use crate::error::TemperatureError;

/// Default clip on standardized residuals, in standard deviations.
pub const DEFAULT_SIGMA_CLIP: f64 = 4.0;

/// Standardized `(Tmax, Tmin)` residuals following
/// `r[t] = A·r[t−1] + B·ε[t]`, with `ε` two independent standard normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualModel {
    a: Mat2,
    b: Mat2,
    sigma_clip: Option<f64>,
}

impl ResidualModel {
    /// Creates a model from its coefficient matrices.
    ///
    /// `sigma_clip` bounds each component to `±clip` after every step;
    /// `None` disables clipping.
    ///
    /// # Errors
    ///
    /// Returns [`TemperatureError::InvalidConfig`] if the clip is not finite
    /// and positive, or a matrix has non-finite entries.
    pub fn new(a: Mat2, b: Mat2, sigma_clip: Option<f64>) -> Result<Self, TemperatureError> {
        if let Some(clip) = sigma_clip
            && (!clip.is_finite() || clip <= 0.0)
        {
            return Err(TemperatureError::InvalidConfig {
                reason: format!("sigma clip must be finite and > 0, got {clip}"),
            });
        }
        if !a.is_finite() || !b.is_finite() {
            return Err(TemperatureError::InvalidConfig {
                reason: "residual coefficients contain non-finite entries".to_string(),
            });
        }
        Ok(Self { a, b, sigma_clip })
    }

    /// Autoregressive coefficient matrix.
    pub fn a(&self) -> &Mat2 {
        &self.a
    }

    /// Noise loading matrix.
    pub fn b(&self) -> &Mat2 {
        &self.b
    }

    /// Clip in force, if any.
    pub fn sigma_clip(&self) -> Option<f64> {
        self.sigma_clip
    }

    /// Advances the residual given explicit innovations `eps`.
    pub fn advance(&self, prev: &Vec2, eps: &Vec2) -> Result<Vec2, TemperatureError> {
        let next = self.a.mul_vec(prev).add(&self.b.mul_vec(eps));
        if !next.is_finite() {
            let value = if next[0].is_finite() { next[1] } else { next[0] };
            return Err(TemperatureError::NonFinite {
                quantity: "temperature residual",
                value,
            });
        }
        Ok(match self.sigma_clip {
            Some(clip) => next.clamp_abs(clip),
            None => next,
        })
    }

    /// Draws fresh innovations and advances the residual.
    pub fn step(&self, prev: &Vec2, rng: &mut impl Rng) -> Result<Vec2, TemperatureError> {
        let eps = Vec2::new(StandardNormal.sample(rng), StandardNormal.sample(rng));
        self.advance(prev, &eps)
    }
}
