//! Hargreaves–Samani reference evapotranspiration.
//!
//! ```text
//! δ   = 0.4093 · sin(2π/365 · J − 1.405)
//! ωs  = acos(−tan φ · tan δ)
//! dr  = 1 + 0.033 · cos(2π/365 · J)
//! S0  = 15.392 · dr · (ωs · sin φ · sin δ + cos φ · cos δ · sin ωs)
//! ETo = 0.0023 · S0 · √ΔT · (Tave + 17.8)
//! ```
//!
//! `ΔT` is the mean monthly Tmax minus mean monthly Tmin of the series,
//! floored at 1 °C.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use chrono::Datelike;
use tempest_calendar::{Doy, NaiveDate};

use crate::error::PetError;

/// Lower bound on the monthly mean temperature range (°C).
pub const MIN_MONTHLY_RANGE: f64 = 1.0;

/// Extraterrestrial radiation in mm/day of evaporation equivalent.
pub fn extraterrestrial_radiation(doy: Doy, latitude_deg: f64) -> f64 {
    let j = doy.get() as f64;
    let phi = latitude_deg.to_radians();
    let declination = 0.4093 * (2.0 * PI / 365.0 * j - 1.405).sin();
    // Clamped for polar day and night.
    let sunset = (-phi.tan() * declination.tan()).clamp(-1.0, 1.0).acos();
    let dr = 1.0 + 0.033 * (2.0 * PI / 365.0 * j).cos();
    15.392
        * dr
        * (sunset * phi.sin() * declination.sin() + phi.cos() * declination.cos() * sunset.sin())
}

/// Per-day mean monthly temperature range, grouped by calendar year and month.
pub fn monthly_mean_range(
    dates: &[NaiveDate],
    tmax: &[f64],
    tmin: &[f64],
) -> Result<Vec<f64>, PetError> {
    check_len("tmax", dates.len(), tmax.len())?;
    check_len("tmin", dates.len(), tmin.len())?;

    let mut sums: BTreeMap<(i32, u32), (f64, f64, usize)> = BTreeMap::new();
    for ((date, &hi), &lo) in dates.iter().zip(tmax).zip(tmin) {
        let entry = sums.entry((date.year(), date.month())).or_default();
        entry.0 += hi;
        entry.1 += lo;
        entry.2 += 1;
    }
    Ok(dates
        .iter()
        .map(|d| {
            let (hi, lo, n) = sums[&(d.year(), d.month())];
            ((hi - lo) / n as f64).max(MIN_MONTHLY_RANGE)
        })
        .collect())
}

/// Daily reference evapotranspiration (mm/day).
///
/// Negative values, which only occur for `tave < −17.8 °C`, are reported
/// as zero.
///
/// # Errors
///
/// Returns [`PetError::LengthMismatch`] if the series differ in length, or
/// [`PetError::InvalidLatitude`] if the latitude is out of range.
pub fn hargreaves_samani(
    dates: &[NaiveDate],
    tmax: &[f64],
    tmin: &[f64],
    tave: &[f64],
    latitude_deg: f64,
) -> Result<Vec<f64>, PetError> {
    if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
        return Err(PetError::InvalidLatitude {
            value: latitude_deg,
        });
    }
    check_len("tave", dates.len(), tave.len())?;
    let delta_t = monthly_mean_range(dates, tmax, tmin)?;

    Ok(dates
        .iter()
        .zip(tave)
        .zip(&delta_t)
        .map(|((&date, &t), &dt)| {
            let s0 = extraterrestrial_radiation(Doy::of(date), latitude_deg);
            (0.0023 * s0 * dt.sqrt() * (t + 17.8)).max(0.0)
        })
        .collect())
}

pub(crate) fn check_len(name: &'static str, expected: usize, got: usize) -> Result<(), PetError> {
    if expected != got {
        return Err(PetError::LengthMismatch {
            name,
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn radiation_peaks_in_summer_north() {
        let summer = extraterrestrial_radiation(Doy::new(172).unwrap(), 29.678);
        let winter = extraterrestrial_radiation(Doy::new(355).unwrap(), 29.678);
        assert!(summer > winter);
        // Roughly 17 and 8 mm/day at 30°N.
        assert!((15.0..19.0).contains(&summer), "summer {summer}");
        assert!((7.0..9.5).contains(&winter), "winter {winter}");
    }

    #[test]
    fn radiation_is_zero_in_polar_night() {
        let s0 = extraterrestrial_radiation(Doy::new(355).unwrap(), 80.0);
        assert!(s0.abs() < 1e-9, "{s0}");
    }

    #[test]
    fn monthly_range_groups_by_month() {
        let dates = [ymd(2024, 1, 30), ymd(2024, 1, 31), ymd(2024, 2, 1)];
        let tmax = [20.0, 22.0, 10.0];
        let tmin = [10.0, 10.0, 9.5];
        let dt = monthly_mean_range(&dates, &tmax, &tmin).unwrap();
        assert_relative_eq!(dt[0], 11.0);
        assert_relative_eq!(dt[1], 11.0);
        // 0.5 floored to 1.0
        assert_relative_eq!(dt[2], 1.0);
    }

    #[test]
    fn known_value() {
        let date = ymd(2023, 7, 1);
        let s0 = extraterrestrial_radiation(Doy::of(date), 29.678);
        let eto = hargreaves_samani(&[date], &[35.0], &[23.0], &[29.0], 29.678).unwrap();
        assert_relative_eq!(eto[0], 0.0023 * s0 * 12.0f64.sqrt() * 46.8, epsilon = 1e-12);
    }

    #[test]
    fn very_cold_day_is_zero() {
        let eto = hargreaves_samani(&[ymd(2023, 1, 1)], &[-15.0], &[-25.0], &[-20.0], 60.0).unwrap();
        assert_eq!(eto[0], 0.0);
    }

    #[test]
    fn rejects_mismatch_and_latitude() {
        let dates = [ymd(2023, 1, 1), ymd(2023, 1, 2)];
        assert!(matches!(
            hargreaves_samani(&dates, &[1.0, 2.0], &[0.0], &[0.5, 1.0], 30.0),
            Err(PetError::LengthMismatch { name: "tmin", .. })
        ));
        assert!(matches!(
            hargreaves_samani(&dates, &[1.0, 2.0], &[0.0, 0.0], &[0.5, 1.0], 100.0),
            Err(PetError::InvalidLatitude { .. })
        ));
    }
}
