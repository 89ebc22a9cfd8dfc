//! Ordinary wet-day depth draws.

use rand::Rng;
use rand_distr::{Distribution, Gamma};
use tempest_params::{GammaDepth, Monthly, ParameterSet};

use crate::error::PrecipError;

/// Default lower bound on wet-day depth (mm). Matches the wet/dry
/// classification threshold used when the depth distributions were fitted.
pub const DEFAULT_WET_FLOOR: f64 = 0.255;

/// Draws wet-day depths from the monthly generalized gamma, clamped to
/// `[wet_floor, cap(month)]`.
#[derive(Debug, Clone, Copy)]
pub struct DepthSampler<'a> {
    depth: &'a Monthly<GammaDepth>,
    caps: &'a Monthly<f64>,
    wet_floor: f64,
}

impl<'a> DepthSampler<'a> {
    /// Creates a sampler over explicit monthly tables.
    ///
    /// # Errors
    ///
    /// Returns [`PrecipError::InvalidFloor`] if `wet_floor` is negative,
    /// non-finite, or above the smallest monthly cap.
    pub fn new(
        depth: &'a Monthly<GammaDepth>,
        caps: &'a Monthly<f64>,
        wet_floor: f64,
    ) -> Result<Self, PrecipError> {
        if !wet_floor.is_finite() || wet_floor < 0.0 {
            return Err(PrecipError::InvalidFloor {
                value: wet_floor,
                reason: "must be finite and >= 0".to_string(),
            });
        }
        if let Some((month, cap)) = caps.iter().find(|(_, c)| **c < wet_floor) {
            return Err(PrecipError::InvalidFloor {
                value: wet_floor,
                reason: format!("exceeds the month {month} cap of {cap}"),
            });
        }
        Ok(Self {
            depth,
            caps,
            wet_floor,
        })
    }

    /// Creates a sampler over the depth tables of a parameter set.
    pub fn from_parameters(params: &'a ParameterSet, wet_floor: f64) -> Result<Self, PrecipError> {
        Self::new(params.depth(), params.depth_cap(), wet_floor)
    }

    /// Lower bound applied to every draw.
    pub fn wet_floor(&self) -> f64 {
        self.wet_floor
    }

    /// Upper bound applied to ordinary draws in `month`.
    pub fn cap(&self, month: u8) -> f64 {
        *self.caps.for_month(month)
    }

    /// Draws an ordinary wet-day depth (mm) for `month`.
    ///
    /// # Errors
    ///
    /// Returns [`PrecipError::NonFiniteDepth`] if the raw draw is NaN or
    /// infinite.
    pub fn sample(&self, month: u8, rng: &mut impl Rng) -> Result<f64, PrecipError> {
        let params = self.depth.for_month(month);
        let y = Gamma::new(params.shape_a(), 1.0)
            .map_err(|e| PrecipError::Distribution {
                month,
                reason: e.to_string(),
            })?
            .sample(rng);
        let raw = params.transform(y);
        if !raw.is_finite() {
            return Err(PrecipError::NonFiniteDepth { month, value: raw });
        }
        Ok(raw.clamp(self.wet_floor, self.cap(month)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tables(depth: GammaDepth, cap: f64) -> (Monthly<GammaDepth>, Monthly<f64>) {
        (Monthly::from_array([depth; 12]), Monthly::from_array([cap; 12]))
    }

    #[test]
    fn draws_within_floor_and_cap() {
        let (depth, caps) = tables(GammaDepth::new(0.8, 1.35, 0.255, 5.6).unwrap(), 23.5);
        let sampler = DepthSampler::new(&depth, &caps, DEFAULT_WET_FLOOR).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let x = sampler.sample(1, &mut rng).unwrap();
            assert!((DEFAULT_WET_FLOOR..=23.5).contains(&x), "depth {x}");
        }
    }

    #[test]
    fn negative_location_is_floored() {
        // Location far below zero: most raw draws are negative.
        let (depth, caps) = tables(GammaDepth::new(1.0, 1.0, -50.0, 1.0).unwrap(), 10.0);
        let sampler = DepthSampler::new(&depth, &caps, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            assert_eq!(sampler.sample(6, &mut rng).unwrap(), 0.0);
        }
    }

    #[test]
    fn heavy_tail_is_capped() {
        let (depth, caps) = tables(GammaDepth::new(1.0, 1.0, 100.0, 50.0).unwrap(), 35.0);
        let sampler = DepthSampler::new(&depth, &caps, DEFAULT_WET_FLOOR).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(sampler.sample(8, &mut rng).unwrap(), 35.0);
        }
    }

    #[test]
    fn rejects_bad_floor() {
        let (depth, caps) = tables(GammaDepth::new(1.0, 1.0, 0.0, 1.0).unwrap(), 5.0);
        assert!(DepthSampler::new(&depth, &caps, -0.1).is_err());
        assert!(DepthSampler::new(&depth, &caps, f64::NAN).is_err());
        assert!(DepthSampler::new(&depth, &caps, 6.0).is_err());
        assert!(DepthSampler::new(&depth, &caps, 0.0).is_ok());
    }

    #[test]
    fn deterministic_with_seed() {
        let (depth, caps) = tables(GammaDepth::new(1.1, 1.27, 0.255, 8.3).unwrap(), 33.4);
        let sampler = DepthSampler::new(&depth, &caps, DEFAULT_WET_FLOOR).unwrap();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| sampler.sample(3, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(11), draw(11));
    }
}
