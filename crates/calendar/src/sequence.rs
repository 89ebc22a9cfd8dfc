//! Date sequence generation.

use chrono::NaiveDate;

/// Generates a contiguous sequence of Gregorian dates.
///
/// Starting from `start`, produces `n_days` consecutive dates. Month, year
/// and leap-day boundaries are handled by chrono. The sequence is truncated
/// only if it would run past `NaiveDate::MAX`.
///
/// # Example
///
/// ```
/// use tempest_calendar::{NaiveDate, date_sequence};
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let dates = date_sequence(start, 3);
/// // Feb 28, Feb 29, Mar 1
/// assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn date_sequence(start: NaiveDate, n_days: usize) -> Vec<NaiveDate> {
    start.iter_days().take(n_days).collect()
}
