//! # tempest-calendar
//!
//! Date handling for the daily weather generator: the inclusive simulation
//! window, contiguous date sequences, and the day-of-year index used to look
//! up climatology tables.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["SimulationWindow::new(start, end)?"] -->|".dates()"| B["Vec of NaiveDate"]
//!     A -->|".n_days()"| C["usize"]
//!     B -->|"Doy::of(date)"| D["Doy (1..=366)"]
//!     D -->|".index()"| E["table row 0..=365"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tempest_calendar::{Doy, SimulationWindow};
//!
//! let window = SimulationWindow::parse("2024-01-01", "2024-01-31").unwrap();
//! assert_eq!(window.n_days(), 31);
//!
//! let last = *window.dates().last().unwrap();
//! assert_eq!(Doy::of(last).get(), 31);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype for leap-aware tables |
//! | `sequence` | Contiguous date sequence generation |
//! | `window` | Validated inclusive simulation window |
//! | `error` | Error types |

mod doy;
mod error;
mod sequence;
mod window;

pub use chrono::NaiveDate;
pub use doy::{DAYS_IN_LEAP_YEAR, Doy};
pub use error::CalendarError;
pub use sequence::date_sequence;
pub use window::SimulationWindow;
