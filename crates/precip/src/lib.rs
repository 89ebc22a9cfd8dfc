//! Precipitation depth for wet days: ordinary draws and extreme events.
//!
//! ```text
//!   wet day ──▶ ExtremeEventInjector::check ──▶ due event? ──yes──▶ event depth
//!                                                  │
//!                                                  no
//!                                                  ▼
//!                                   DepthSampler::sample (floor..=cap)
//! ```
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`depth`] | [`DepthSampler`]: generalized gamma draws clamped to the monthly cap |
//! | [`event`] | [`classify`], [`EventSchedule`], [`ExtremeEventInjector`] |
//! | [`error`] | [`PrecipError`] |

pub mod depth;
pub mod error;
pub mod event;

pub use depth::{DEFAULT_WET_FLOOR, DepthSampler};
pub use error::PrecipError;
pub use event::{
    DAYS_PER_YEAR, EventEligibility, EventSchedule, ExtremeEventInjector, InjectedEvent,
    PendingEvent, classify,
};
