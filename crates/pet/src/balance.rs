//! Crop-adjusted PET and the precipitation deficit.

use crate::error::PetError;
use crate::hargreaves::check_len;

/// Scales reference ETo by a crop coefficient, and additionally by
/// `rainy_day_factor` on days with precipitation.
pub fn adjust_pet(
    eto: &[f64],
    precip: &[f64],
    crop_coefficient: f64,
    rainy_day_factor: f64,
) -> Result<Vec<f64>, PetError> {
    for (name, value) in [
        ("crop coefficient", crop_coefficient),
        ("rainy-day factor", rainy_day_factor),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(PetError::InvalidCoefficient { name, value });
        }
    }
    check_len("precip", eto.len(), precip.len())?;
    Ok(eto
        .iter()
        .zip(precip)
        .map(|(&e, &p)| {
            let pet = e * crop_coefficient;
            if p > 0.0 { pet * rainy_day_factor } else { pet }
        })
        .collect())
}

/// Daily deficit `precip − pet`; negative values are water shortfalls.
pub fn deficit(precip: &[f64], pet: &[f64]) -> Result<Vec<f64>, PetError> {
    check_len("pet", precip.len(), pet.len())?;
    Ok(precip.iter().zip(pet).map(|(p, e)| p - e).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_scales_by_crop_coefficient() {
        let pet = adjust_pet(&[4.0, 5.0], &[0.0, 0.0], 0.8, 1.0).unwrap();
        assert_eq!(pet, vec![3.2, 4.0]);
    }

    #[test]
    fn adjust_reduces_rainy_days() {
        let pet = adjust_pet(&[4.0, 4.0], &[0.0, 12.0], 1.0, 0.5).unwrap();
        assert_eq!(pet, vec![4.0, 2.0]);
    }

    #[test]
    fn adjust_rejects_negative_coefficient() {
        assert!(matches!(
            adjust_pet(&[1.0], &[0.0], -0.1, 1.0),
            Err(PetError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn deficit_is_precip_minus_pet() {
        let d = deficit(&[0.0, 10.0], &[4.0, 3.0]).unwrap();
        assert_eq!(d, vec![-4.0, 7.0]);
    }

    #[test]
    fn deficit_length_mismatch() {
        assert!(deficit(&[0.0], &[1.0, 2.0]).is_err());
    }
}
