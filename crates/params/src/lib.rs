//! Validated parameter store for the tempest weather generator.
//!
//! Holds everything the simulation engine reads for one basin: monthly
//! spell-length and depth distributions, depth caps, the day-of-year
//! temperature climatology with its additive offsets, the residual-model
//! matrices and the extreme-event catalog. Every type validates on
//! construction so the engine never sees a degenerate parameter.
//!
//! # Layout
//!
//! ```text
//!  ┌──────────────────────┐      ┌────────────────────┐
//!  │ ParameterRepository  │─────▶│   ParameterSet     │
//!  │ (InMemory, TOML, …)  │ load │                    │
//!  └──────────────────────┘      │ Monthly<Spell> ×2  │
//!                                │ Monthly<Depth>     │
//!                                │ Monthly<cap>       │
//!                                │ Climatology        │
//!                                │ TemperatureOffsets │
//!                                │ CorrelationMatrices│
//!                                │ EventCatalog       │
//!                                └────────────────────┘
//! ```
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`spell`] | Shifted negative binomial spell lengths |
//! | [`depth`] | Generalized gamma wet-day depths, quantile caps |
//! | [`climatology`] | Day-of-year temperature tables and offsets |
//! | [`matrix`] | 2×2 matrices for the residual model |
//! | [`correlation`] | `A`, `B`, `M0`, `M1` |
//! | [`events`] | Extreme-event catalog |
//! | [`set`] | [`ParameterSet`] and its builder |
//! | [`repository`] | [`ParameterRepository`] trait |
//! | [`frio`] | Bundled Frio River basin parameters |
//!
//! # Quick start
//!
//! ```rust
//! use tempest_params::{NegBinomialSpell, WeatherState};
//!
//! let dry = NegBinomialSpell::dry(3.0, 0.4).unwrap();
//! assert_eq!(dry.min_length(), 2);
//! assert_eq!(WeatherState::Dry.flip(), WeatherState::Wet);
//! ```

pub mod climatology;
pub mod correlation;
pub mod depth;
pub mod error;
pub mod events;
pub mod frio;
pub mod matrix;
pub mod monthly;
pub mod repository;
pub mod set;
pub mod spell;
pub mod state;

pub use climatology::{Climatology, ClimatologyTable, DailyClimate, TemperatureOffsets};
pub use correlation::CorrelationMatrices;
pub use depth::{DEFAULT_CAP_PROBABILITY, GammaDepth, depth_caps_from_quantile};
pub use error::ParamsError;
pub use events::{EventCatalog, ExtremeEventSpec};
pub use matrix::{Mat2, Vec2};
pub use monthly::Monthly;
pub use repository::{InMemoryRepository, ParameterRepository};
pub use set::{ParameterSet, ParameterSetBuilder};
pub use spell::{DRY_SPELL_LOCATION, NegBinomialSpell, WET_SPELL_LOCATION};
pub use state::WeatherState;
