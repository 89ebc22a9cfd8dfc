//! Daily state machine and ensemble driver for the tempest weather generator.
//!
//! The engine combines the spell sampler, the depth sampler, the
//! extreme-event injector and the temperature residual model into an
//! alternating wet/dry renewal process that emits one [`DailyRecord`] per
//! date of the simulation window.
//!
//! # Day cycle
//!
//! ```mermaid
//! flowchart TD
//!     A[DailyState] --> B{remaining == 0?}
//!     B -- yes --> C[flip state, draw spell]
//!     B -- no --> D
//!     C --> D{wet?}
//!     D -- yes --> E{event due?}
//!     E -- yes --> F[event depth]
//!     E -- no --> G[ordinary depth]
//!     D -- no --> H[depth 0]
//!     F --> I[residual step, temperatures]
//!     G --> I
//!     H --> I
//!     I --> J[validate, emit DailyRecord]
//!     J --> K[remaining -= 1, next date]
//!     K --> A
//! ```
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | [`SimulationConfig`], [`InitialCondition`] |
//! | [`state`] | [`DailyState`], [`DailyRecord`], [`Realisation`] |
//! | [`streams`] | [`Streams`]: one RNG per component |
//! | [`simulator`] | [`Simulator`]: initial state, pure step, run |
//! | [`ensemble`] | [`run_ensemble`] with rayon |

pub mod config;
pub mod ensemble;
pub mod error;
pub mod simulator;
pub mod state;
pub mod streams;

pub use config::{InitialCondition, SimulationConfig};
pub use ensemble::run_ensemble;
pub use error::EngineError;
pub use simulator::Simulator;
pub use state::{DailyRecord, DailyState, EventLabel, Realisation, TriggeredEvent};
pub use streams::Streams;
pub use tempest_precip::EventEligibility;
pub use tempest_temperature::ConsistencyPolicy;
