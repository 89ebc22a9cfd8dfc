//! Daily Tmax/Tmin/Tave from climatology, offsets and residuals.

use rand::Rng;
use tempest_calendar::Doy;
use tempest_params::{Climatology, ParameterSet, TemperatureOffsets, Vec2, WeatherState};

use crate::error::TemperatureError;
use crate::residual::ResidualModel;

/// Default minimum `tmax − tmin` in °C.
pub const DEFAULT_MIN_DIURNAL_RANGE: f64 = 4.0;

/// One day's temperatures in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTemperature {
    /// Daily maximum.
    pub tmax: f64,
    /// Daily minimum.
    pub tmin: f64,
    /// Daily average, `(tmax + tmin) / 2`.
    pub tave: f64,
}

/// Converts standardized residuals to temperatures for a given state and day.
///
/// `T = mean(doy, state) + offset(state) + r · std(doy, state)` for Tmax
/// and Tmin; Tmax is then raised if needed so the diurnal range is at least
/// `min_diurnal_range`.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureModel<'a> {
    climatology: &'a Climatology,
    offsets: &'a TemperatureOffsets,
    residual: ResidualModel,
    min_diurnal_range: f64,
}

impl<'a> TemperatureModel<'a> {
    /// Creates a model.
    ///
    /// # Errors
    ///
    /// Returns [`TemperatureError::InvalidConfig`] if `min_diurnal_range` is
    /// negative or non-finite.
    pub fn new(
        climatology: &'a Climatology,
        offsets: &'a TemperatureOffsets,
        residual: ResidualModel,
        min_diurnal_range: f64,
    ) -> Result<Self, TemperatureError> {
        if !min_diurnal_range.is_finite() || min_diurnal_range < 0.0 {
            return Err(TemperatureError::InvalidConfig {
                reason: format!(
                    "minimum diurnal range must be finite and >= 0, got {min_diurnal_range}"
                ),
            });
        }
        Ok(Self {
            climatology,
            offsets,
            residual,
            min_diurnal_range,
        })
    }

    /// Creates a model from a parameter set using its `A` and `B` matrices.
    pub fn from_parameters(
        params: &'a ParameterSet,
        sigma_clip: Option<f64>,
        min_diurnal_range: f64,
    ) -> Result<Self, TemperatureError> {
        let corr = params.correlation();
        let residual = ResidualModel::new(*corr.a(), *corr.b(), sigma_clip)?;
        Self::new(
            params.climatology(),
            params.offsets(),
            residual,
            min_diurnal_range,
        )
    }

    /// The residual process.
    pub fn residual(&self) -> &ResidualModel {
        &self.residual
    }

    /// Temperatures implied by residual `r` on day `doy` in `state`.
    pub fn temperatures(
        &self,
        state: WeatherState,
        doy: Doy,
        r: &Vec2,
    ) -> Result<DailyTemperature, TemperatureError> {
        let mean = self.climatology.mean(state, doy);
        let std = self.climatology.std(state, doy);
        let tmin = mean.tmin + self.offsets.tmin(state) + r[1] * std.tmin;
        let mut tmax = mean.tmax + self.offsets.tmax(state) + r[0] * std.tmax;
        if tmax - tmin < self.min_diurnal_range {
            tmax = tmin + self.min_diurnal_range;
        }
        let tave = 0.5 * (tmax + tmin);
        for (quantity, value) in [("tmax", tmax), ("tmin", tmin), ("tave", tave)] {
            if !value.is_finite() {
                return Err(TemperatureError::NonFinite { quantity, value });
            }
        }
        Ok(DailyTemperature { tmax, tmin, tave })
    }

    /// Advances the residual one day and returns it with the day's temperatures.
    pub fn step(
        &self,
        state: WeatherState,
        doy: Doy,
        prev: &Vec2,
        rng: &mut impl Rng,
    ) -> Result<(Vec2, DailyTemperature), TemperatureError> {
        let r = self.residual.step(prev, rng)?;
        let t = self.temperatures(state, doy, &r)?;
        Ok((r, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempest_params::{ClimatologyTable, DailyClimate, Mat2};

    fn table(name: &str, tmax: f64, tmin: f64) -> ClimatologyTable {
        ClimatologyTable::new(name, vec![DailyClimate::new(tmax, tmin, 0.5 * (tmax + tmin)); 366])
            .unwrap()
    }

    fn climatology() -> Climatology {
        Climatology::new(
            table("wet_mean", 25.0, 15.0),
            table("wet_std", 2.0, 1.0),
            table("dry_mean", 30.0, 14.0),
            table("dry_std", 3.0, 2.0),
        )
    }

    fn residual() -> ResidualModel {
        ResidualModel::new(Mat2::zeros(), Mat2::identity(), None).unwrap()
    }

    #[test]
    fn zero_residual_gives_mean_plus_offset() {
        let clim = climatology();
        let offsets = TemperatureOffsets::new(1.0, 2.0, 0.5, 0.25).unwrap();
        let model = TemperatureModel::new(&clim, &offsets, residual(), 0.0).unwrap();
        let doy = Doy::new(100).unwrap();

        let wet = model.temperatures(WeatherState::Wet, doy, &Vec2::zeros()).unwrap();
        assert_abs_diff_eq!(wet.tmax, 26.0);
        assert_abs_diff_eq!(wet.tmin, 15.5);
        assert_abs_diff_eq!(wet.tave, 20.75);

        let dry = model.temperatures(WeatherState::Dry, doy, &Vec2::zeros()).unwrap();
        assert_abs_diff_eq!(dry.tmax, 32.0);
        assert_abs_diff_eq!(dry.tmin, 14.25);
    }

    #[test]
    fn residual_scales_by_std() {
        let clim = climatology();
        let offsets = TemperatureOffsets::default();
        let model = TemperatureModel::new(&clim, &offsets, residual(), 0.0).unwrap();
        let t = model
            .temperatures(WeatherState::Dry, Doy::new(1).unwrap(), &Vec2::new(1.0, -1.0))
            .unwrap();
        assert_abs_diff_eq!(t.tmax, 33.0);
        assert_abs_diff_eq!(t.tmin, 12.0);
    }

    #[test]
    fn diurnal_range_enforced() {
        let clim = climatology();
        let offsets = TemperatureOffsets::default();
        let model =
            TemperatureModel::new(&clim, &offsets, residual(), DEFAULT_MIN_DIURNAL_RANGE).unwrap();
        // Wet: tmax = 25 - 4*2 = 17, tmin = 15 + 4*1 = 19 → tmax raised to 23.
        let t = model
            .temperatures(WeatherState::Wet, Doy::new(1).unwrap(), &Vec2::new(-4.0, 4.0))
            .unwrap();
        assert_abs_diff_eq!(t.tmin, 19.0);
        assert_abs_diff_eq!(t.tmax, 23.0);
        assert_abs_diff_eq!(t.tave, 21.0);
    }

    #[test]
    fn rejects_negative_range() {
        let clim = climatology();
        let offsets = TemperatureOffsets::default();
        assert!(TemperatureModel::new(&clim, &offsets, residual(), -1.0).is_err());
    }
}
