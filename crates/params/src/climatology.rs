//! Day-of-year temperature climatology and additive offsets.

use tempest_calendar::{DAYS_IN_LEAP_YEAR, Doy};

use crate::error::ParamsError;
use crate::state::WeatherState;

/// Daily maximum, minimum and average temperature for one day of year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyClimate {
    /// Daily maximum temperature (°C).
    pub tmax: f64,
    /// Daily minimum temperature (°C).
    pub tmin: f64,
    /// Daily average temperature (°C).
    pub tave: f64,
}

impl DailyClimate {
    /// Creates a row from its three values.
    pub fn new(tmax: f64, tmin: f64, tave: f64) -> Self {
        Self { tmax, tmin, tave }
    }

    fn is_finite(&self) -> bool {
        self.tmax.is_finite() && self.tmin.is_finite() && self.tave.is_finite()
    }

    fn is_non_negative(&self) -> bool {
        self.tmax >= 0.0 && self.tmin >= 0.0 && self.tave >= 0.0
    }
}

/// Leap-aware table of [`DailyClimate`] rows indexed by day of year.
///
/// Always holds 366 rows. A 365-row input repeats its last row for day 366.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatologyTable {
    rows: Vec<DailyClimate>,
}

impl ClimatologyTable {
    /// Validates and stores a table.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidClimatology`] if the table does not have
    /// 365 or 366 rows, or contains non-finite values.
    pub fn new(name: &str, mut rows: Vec<DailyClimate>) -> Result<Self, ParamsError> {
        match rows.len() {
            n if n == DAYS_IN_LEAP_YEAR => {}
            n if n == DAYS_IN_LEAP_YEAR - 1 => {
                let last = rows[n - 1];
                rows.push(last);
            }
            n => {
                return Err(ParamsError::InvalidClimatology {
                    table: name.to_string(),
                    reason: format!("expected 365 or 366 rows, got {n}"),
                });
            }
        }
        if let Some(i) = rows.iter().position(|r| !r.is_finite()) {
            return Err(ParamsError::InvalidClimatology {
                table: name.to_string(),
                reason: format!("non-finite value on day {}", i + 1),
            });
        }
        Ok(Self { rows })
    }

    /// Validates a standard-deviation table: as [`ClimatologyTable::new`],
    /// and every value must also be `>= 0`.
    pub fn new_spread(name: &str, rows: Vec<DailyClimate>) -> Result<Self, ParamsError> {
        let table = Self::new(name, rows)?;
        if let Some(i) = table.rows.iter().position(|r| !r.is_non_negative()) {
            return Err(ParamsError::InvalidClimatology {
                table: name.to_string(),
                reason: format!("negative standard deviation on day {}", i + 1),
            });
        }
        Ok(table)
    }

    /// Row for a day of year.
    pub fn at(&self, doy: Doy) -> &DailyClimate {
        &self.rows[doy.index()]
    }

    /// All 366 rows.
    pub fn rows(&self) -> &[DailyClimate] {
        &self.rows
    }
}

/// Wet and dry mean and standard-deviation tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Climatology {
    wet_mean: ClimatologyTable,
    wet_std: ClimatologyTable,
    dry_mean: ClimatologyTable,
    dry_std: ClimatologyTable,
}

impl Climatology {
    /// Bundles the four tables.
    pub fn new(
        wet_mean: ClimatologyTable,
        wet_std: ClimatologyTable,
        dry_mean: ClimatologyTable,
        dry_std: ClimatologyTable,
    ) -> Self {
        Self {
            wet_mean,
            wet_std,
            dry_mean,
            dry_std,
        }
    }

    /// Climatological mean for a state and day of year.
    pub fn mean(&self, state: WeatherState, doy: Doy) -> &DailyClimate {
        match state {
            WeatherState::Wet => self.wet_mean.at(doy),
            WeatherState::Dry => self.dry_mean.at(doy),
        }
    }

    /// Climatological standard deviation for a state and day of year.
    pub fn std(&self, state: WeatherState, doy: Doy) -> &DailyClimate {
        match state {
            WeatherState::Wet => self.wet_std.at(doy),
            WeatherState::Dry => self.dry_std.at(doy),
        }
    }

    /// Full mean table of a state.
    pub fn mean_table(&self, state: WeatherState) -> &ClimatologyTable {
        match state {
            WeatherState::Wet => &self.wet_mean,
            WeatherState::Dry => &self.dry_mean,
        }
    }

    /// Full standard-deviation table of a state.
    pub fn std_table(&self, state: WeatherState) -> &ClimatologyTable {
        match state {
            WeatherState::Wet => &self.wet_std,
            WeatherState::Dry => &self.dry_std,
        }
    }
}

/// Additive adjustments to the climatological Tmax and Tmin means.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureOffsets {
    wet_tmax: f64,
    dry_tmax: f64,
    wet_tmin: f64,
    dry_tmin: f64,
}

impl TemperatureOffsets {
    /// Creates validated offsets.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidOffset`] if any value is non-finite.
    pub fn new(wet_tmax: f64, dry_tmax: f64, wet_tmin: f64, dry_tmin: f64) -> Result<Self, ParamsError> {
        for (name, value) in [
            ("wet_tmax", wet_tmax),
            ("dry_tmax", dry_tmax),
            ("wet_tmin", wet_tmin),
            ("dry_tmin", dry_tmin),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::InvalidOffset { name, value });
            }
        }
        Ok(Self {
            wet_tmax,
            dry_tmax,
            wet_tmin,
            dry_tmin,
        })
    }

    /// Offset added to the Tmax mean.
    pub fn tmax(&self, state: WeatherState) -> f64 {
        match state {
            WeatherState::Wet => self.wet_tmax,
            WeatherState::Dry => self.dry_tmax,
        }
    }

    /// Offset added to the Tmin mean.
    pub fn tmin(&self, state: WeatherState) -> f64 {
        match state {
            WeatherState::Wet => self.wet_tmin,
            WeatherState::Dry => self.dry_tmin,
        }
    }
}
