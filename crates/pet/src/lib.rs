//! Potential evapotranspiration post-processing for simulated weather.
//!
//! Reference ETo follows Hargreaves–Samani from the simulated temperatures
//! and the site latitude. A crop coefficient turns it into PET, and the
//! daily deficit is precipitation minus PET.
//!
//! ```rust
//! use tempest_calendar::NaiveDate;
//! use tempest_pet::{deficit, hargreaves_samani};
//!
//! let dates = [NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()];
//! let eto = hargreaves_samani(&dates, &[35.0], &[23.0], &[29.0], 29.678).unwrap();
//! let d = deficit(&[0.0], &eto).unwrap();
//! assert!(d[0] < 0.0);
//! ```

pub mod balance;
pub mod error;
pub mod hargreaves;

pub use balance::{adjust_pet, deficit};
pub use error::PetError;
pub use hargreaves::{MIN_MONTHLY_RANGE, extraterrestrial_radiation, hargreaves_samani, monthly_mean_range};
