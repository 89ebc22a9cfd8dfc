//! Spell-length draws from the shifted negative binomial.

use rand::Rng;
use rand_distr::{Distribution, Gamma, Poisson};
use tempest_params::{Monthly, NegBinomialSpell, ParameterSet, WeatherState};

use crate::error::SpellError;

/// Longest spell accepted from a single draw, in days.
pub const MAX_SPELL_DAYS: u32 = 100_000;

/// Draws spell lengths for both states from monthly parameters.
///
/// Stateless: every call is an independent draw. Parameters are validated
/// upstream, so the only runtime failures are numerical.
#[derive(Debug, Clone, Copy)]
pub struct SpellSampler<'a> {
    dry: &'a Monthly<NegBinomialSpell>,
    wet: &'a Monthly<NegBinomialSpell>,
}

impl<'a> SpellSampler<'a> {
    /// Creates a sampler over explicit monthly tables.
    pub fn new(dry: &'a Monthly<NegBinomialSpell>, wet: &'a Monthly<NegBinomialSpell>) -> Self {
        Self { dry, wet }
    }

    /// Creates a sampler over the spell tables of a parameter set.
    pub fn from_parameters(params: &'a ParameterSet) -> Self {
        Self::new(params.spell(WeatherState::Dry), params.spell(WeatherState::Wet))
    }

    /// Parameters used for a spell of `state` starting in `month`.
    pub fn params(&self, month: u8, state: WeatherState) -> &'a NegBinomialSpell {
        match state {
            WeatherState::Dry => self.dry.for_month(month),
            WeatherState::Wet => self.wet.for_month(month),
        }
    }

    /// Draws the length in days of a new spell of `state` starting in `month`.
    ///
    /// The result is at least the spell location (one day for wet spells,
    /// two for dry spells).
    ///
    /// # Errors
    ///
    /// Returns [`SpellError`] if the draw is non-finite or exceeds
    /// [`MAX_SPELL_DAYS`].
    pub fn sample(&self, month: u8, state: WeatherState, rng: &mut impl Rng) -> Result<u32, SpellError> {
        let spell = self.params(month, state);
        let failures = draw_failures(spell, rng).map_err(|reason| SpellError::Distribution {
            month,
            state,
            reason,
        })?;
        let length = spell.location() + failures;
        if !length.is_finite() || length < 1.0 || length > MAX_SPELL_DAYS as f64 {
            return Err(SpellError::OutOfRange {
                month,
                state,
                value: length,
            });
        }
        Ok(length as u32)
    }
}

/// Failures before the `n`-th success, drawn as a Gamma–Poisson mixture.
///
/// `λ ~ Gamma(n, (1 − p) / p)` then `k ~ Poisson(λ)`, which supports a
/// real-valued `n`. When `p = 1` the count is always zero.
fn draw_failures(spell: &NegBinomialSpell, rng: &mut impl Rng) -> Result<f64, String> {
    let p = spell.p();
    if p >= 1.0 {
        return Ok(0.0);
    }
    let scale = (1.0 - p) / p;
    let lambda = Gamma::new(spell.n(), scale)
        .map_err(|e| e.to_string())?
        .sample(rng);
    if lambda <= 0.0 {
        return Ok(0.0);
    }
    let k: f64 = Poisson::new(lambda).map_err(|e| e.to_string())?.sample(rng);
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn uniform(spell: NegBinomialSpell) -> Monthly<NegBinomialSpell> {
        Monthly::from_array([spell; 12])
    }

    #[test]
    fn dry_spells_never_shorter_than_two() {
        let dry = uniform(NegBinomialSpell::dry(3.0, 0.4).unwrap());
        let wet = uniform(NegBinomialSpell::wet(3.0, 0.4).unwrap());
        let sampler = SpellSampler::new(&dry, &wet);
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..10_000 {
            let month = (i % 12) as u8 + 1;
            assert!(sampler.sample(month, WeatherState::Dry, &mut rng).unwrap() >= 2);
            assert!(sampler.sample(month, WeatherState::Wet, &mut rng).unwrap() >= 1);
        }
    }

    #[test]
    fn p_one_returns_location() {
        let dry = uniform(NegBinomialSpell::dry(2.0, 1.0).unwrap());
        let wet = uniform(NegBinomialSpell::wet(2.0, 1.0).unwrap());
        let sampler = SpellSampler::new(&dry, &wet);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sampler.sample(5, WeatherState::Dry, &mut rng).unwrap(), 2);
            assert_eq!(sampler.sample(5, WeatherState::Wet, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn deterministic_with_seed() {
        let dry = uniform(NegBinomialSpell::dry(3.0, 0.4).unwrap());
        let wet = uniform(NegBinomialSpell::wet(1.5, 0.6).unwrap());
        let sampler = SpellSampler::new(&dry, &wet);

        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| sampler.sample(1, WeatherState::Wet, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(123), draw(123));
    }

    #[test]
    fn selects_month_parameters() {
        let mut months = [NegBinomialSpell::wet(1.0, 1.0).unwrap(); 12];
        months[6] = NegBinomialSpell::new(1.0, 1.0, 9.0).unwrap();
        let wet = Monthly::from_array(months);
        let dry = uniform(NegBinomialSpell::dry(1.0, 1.0).unwrap());
        let sampler = SpellSampler::new(&dry, &wet);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sampler.sample(7, WeatherState::Wet, &mut rng).unwrap(), 9);
        assert_eq!(sampler.sample(6, WeatherState::Wet, &mut rng).unwrap(), 1);
    }
}
