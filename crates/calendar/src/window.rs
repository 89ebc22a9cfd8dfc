//! Validated inclusive simulation window.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::sequence::date_sequence;

/// Inclusive `[start, end]` range of simulated dates.
///
/// A window always contains at least one date; construction fails when the
/// end precedes the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimulationWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl SimulationWindow {
    /// Creates a window from two dates.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvertedWindow`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if either string fails to
    /// parse, or [`CalendarError::InvertedWindow`] if the dates are inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, CalendarError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Returns the first simulated date.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last simulated date.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the number of simulated days (inclusive of both ends).
    pub fn n_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Returns `true` if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Returns every date of the window in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        date_sequence(self.start, self.n_days())
    }

    /// Returns the calendar month (1..=12) of the first simulated date.
    pub fn start_month(&self) -> u8 {
        self.start.month() as u8
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| CalendarError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
