//! Negative binomial spell-length parameters.

use crate::error::ParamsError;
use crate::state::WeatherState;

/// Minimum wet-spell length in days.
pub const WET_SPELL_LOCATION: f64 = 1.0;

/// Minimum dry-spell length in days.
pub const DRY_SPELL_LOCATION: f64 = 2.0;

/// Shifted negative binomial distribution of spell lengths.
///
/// A draw counts the failures before the `n`-th success (real-valued `n`,
/// success probability `p`) and adds `location`. Because `location` is a
/// whole number of at least one, every spell lasts at least one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegBinomialSpell {
    n: f64,
    p: f64,
    location: f64,
}

impl NegBinomialSpell {
    /// Creates validated spell parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidSpell`] if `n` is not finite and
    /// positive, `p` is outside `(0, 1]`, or `location` is not a whole
    /// number `>= 1`.
    pub fn new(n: f64, p: f64, location: f64) -> Result<Self, ParamsError> {
        if !n.is_finite() || n <= 0.0 {
            return Err(ParamsError::InvalidSpell {
                reason: format!("n must be finite and > 0, got {n}"),
            });
        }
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(ParamsError::InvalidSpell {
                reason: format!("p must be in (0, 1], got {p}"),
            });
        }
        if !location.is_finite() || location < 1.0 || location.fract() != 0.0 {
            return Err(ParamsError::InvalidSpell {
                reason: format!("location must be a whole number >= 1, got {location}"),
            });
        }
        Ok(Self { n, p, location })
    }

    /// Wet-spell parameters with the wet location of one day.
    pub fn wet(n: f64, p: f64) -> Result<Self, ParamsError> {
        Self::new(n, p, WET_SPELL_LOCATION)
    }

    /// Dry-spell parameters with the dry location of two days.
    pub fn dry(n: f64, p: f64) -> Result<Self, ParamsError> {
        Self::new(n, p, DRY_SPELL_LOCATION)
    }

    /// Default location for spells of the given state.
    pub fn default_location(state: WeatherState) -> f64 {
        match state {
            WeatherState::Wet => WET_SPELL_LOCATION,
            WeatherState::Dry => DRY_SPELL_LOCATION,
        }
    }

    /// Number of successes (may be fractional).
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Location shift in days.
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Shortest possible spell in days.
    pub fn min_length(&self) -> u32 {
        self.location as u32
    }

    /// Mean spell length: `location + n(1 - p) / p`.
    pub fn expected_length(&self) -> f64 {
        self.location + self.n * (1.0 - self.p) / self.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constructors_set_location() {
        assert_eq!(NegBinomialSpell::wet(2.0, 0.5).unwrap().location(), 1.0);
        assert_eq!(NegBinomialSpell::dry(3.0, 0.4).unwrap().location(), 2.0);
        assert_eq!(NegBinomialSpell::dry(3.0, 0.4).unwrap().min_length(), 2);
    }

    #[test]
    fn default_location_by_state() {
        assert_eq!(NegBinomialSpell::default_location(WeatherState::Wet), 1.0);
        assert_eq!(NegBinomialSpell::default_location(WeatherState::Dry), 2.0);
    }

    #[test]
    fn p_one_is_allowed() {
        let s = NegBinomialSpell::wet(1.0, 1.0).unwrap();
        assert_relative_eq!(s.expected_length(), 1.0);
    }

    #[test]
    fn rejects_degenerate() {
        assert!(NegBinomialSpell::wet(0.0, 0.5).is_err());
        assert!(NegBinomialSpell::wet(-1.0, 0.5).is_err());
        assert!(NegBinomialSpell::wet(f64::NAN, 0.5).is_err());
        assert!(NegBinomialSpell::wet(1.0, 0.0).is_err());
        assert!(NegBinomialSpell::wet(1.0, 1.5).is_err());
        assert!(NegBinomialSpell::new(1.0, 0.5, 0.0).is_err());
        assert!(NegBinomialSpell::new(1.0, 0.5, 1.5).is_err());
    }

    #[test]
    fn expected_length() {
        // 2 + 3 * 0.6 / 0.4
        let s = NegBinomialSpell::dry(3.0, 0.4).unwrap();
        assert_relative_eq!(s.expected_length(), 6.5, epsilon = 1e-12);
    }
}
