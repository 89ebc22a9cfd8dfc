//! Wet/dry spell-length sampler for the tempest weather generator.
//!
//! Spell lengths follow a shifted negative binomial per calendar month and
//! state. A wet spell lasts at least one day and a dry spell at least two.
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tempest_params::{Monthly, NegBinomialSpell};
//! use tempest_spell::{SpellSampler, WeatherState};
//!
//! let dry = Monthly::from_array([NegBinomialSpell::dry(3.0, 0.4).unwrap(); 12]);
//! let wet = Monthly::from_array([NegBinomialSpell::wet(2.0, 0.6).unwrap(); 12]);
//! let sampler = SpellSampler::new(&dry, &wet);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let days = sampler.sample(1, WeatherState::Dry, &mut rng).unwrap();
//! assert!(days >= 2);
//! ```

pub mod error;
pub mod sampler;

pub use error::SpellError;
pub use sampler::{MAX_SPELL_DAYS, SpellSampler};
pub use tempest_params::WeatherState;
