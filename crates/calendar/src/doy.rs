//! Day-of-year newtype for leap-aware climatology lookups.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Number of rows in a leap-aware day-of-year table.
pub const DAYS_IN_LEAP_YEAR: usize = 366;

/// Gregorian day-of-year (1..=366).
///
/// Day 366 only occurs on December 31 of leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_IN_LEAP_YEAR as u16).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Returns the day-of-year of a calendar date.
    ///
    /// Infallible because chrono ordinals are always in 1..=366.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.ordinal() as u16)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for table indexing (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}
