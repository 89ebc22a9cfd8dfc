//! Fixed twelve-entry tables keyed by calendar month.

use crate::error::ParamsError;

/// A value for each calendar month, January first.
#[derive(Debug, Clone, PartialEq)]
pub struct Monthly<T> {
    values: [T; 12],
}

impl<T> Monthly<T> {
    /// Wraps an array of twelve values, January first.
    pub fn from_array(values: [T; 12]) -> Self {
        Self { values }
    }

    /// Builds a table from a vector that must hold exactly twelve values.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::MonthCount`] if `values.len() != 12`.
    pub fn try_from_vec(values: Vec<T>) -> Result<Self, ParamsError> {
        let values: [T; 12] = values
            .try_into()
            .map_err(|v: Vec<T>| ParamsError::MonthCount { got: v.len() })?;
        Ok(Self { values })
    }

    /// Builds a table by calling `f` for months 1..=12.
    ///
    /// Errors returned by `f` are tagged with the month that produced them.
    pub fn try_from_fn<F>(mut f: F) -> Result<Self, ParamsError>
    where
        F: FnMut(u8) -> Result<T, ParamsError>,
    {
        let mut values = Vec::with_capacity(12);
        for month in 1..=12u8 {
            values.push(f(month).map_err(|e| e.at_month(month))?);
        }
        Self::try_from_vec(values)
    }

    /// Returns the entry for a 1-indexed month.
    ///
    /// # Panics
    ///
    /// Panics if `month` is not in 1..=12.
    pub fn for_month(&self, month: u8) -> &T {
        assert!(
            (1..=12).contains(&month),
            "month must be 1..=12, got {month}"
        );
        &self.values[(month - 1) as usize]
    }

    /// Returns the entry for a 1-indexed month, or an error if out of range.
    pub fn get(&self, month: u8) -> Result<&T, ParamsError> {
        if !(1..=12).contains(&month) {
            return Err(ParamsError::InvalidMonth { month });
        }
        Ok(&self.values[(month - 1) as usize])
    }

    /// Iterates `(month, value)` pairs, January first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &T)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u8 + 1, v))
    }

    /// Returns the underlying array.
    pub fn values(&self) -> &[T; 12] {
        &self.values
    }

    /// Applies `f` to every entry.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Monthly<U> {
        Monthly {
            values: self.values.each_ref().map(f),
        }
    }
}
