//! Extreme-event catalog.

use std::collections::HashSet;

use crate::error::ParamsError;

/// One class of extreme precipitation event.
///
/// The depth band `[min_depth, max_depth]` is the attribution-adjusted
/// magnitude range for the return period.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeEventSpec {
    name: String,
    return_period_years: u32,
    min_depth: f64,
    max_depth: f64,
}

impl ExtremeEventSpec {
    /// Creates a validated event class.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidEvent`] if the return period is zero or
    /// the depth band is not `0 <= min < max` with finite bounds.
    pub fn new(
        name: impl Into<String>,
        return_period_years: u32,
        min_depth: f64,
        max_depth: f64,
    ) -> Result<Self, ParamsError> {
        let name = name.into();
        if return_period_years == 0 {
            return Err(ParamsError::InvalidEvent {
                name,
                reason: "return period must be >= 1 year".to_string(),
            });
        }
        if !min_depth.is_finite() || !max_depth.is_finite() || min_depth < 0.0 || min_depth >= max_depth {
            return Err(ParamsError::InvalidEvent {
                name,
                reason: format!(
                    "depth band must satisfy 0 <= min < max, got [{min_depth}, {max_depth}]"
                ),
            });
        }
        Ok(Self {
            name,
            return_period_years,
            min_depth,
            max_depth,
        })
    }

    /// Event label, e.g. `"25-year"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return period in years.
    pub fn return_period_years(&self) -> u32 {
        self.return_period_years
    }

    /// Lower bound of the depth band (mm).
    pub fn min_depth(&self) -> f64 {
        self.min_depth
    }

    /// Upper bound of the depth band (mm).
    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Returns `true` if `depth` lies inside the closed band.
    pub fn contains(&self, depth: f64) -> bool {
        (self.min_depth..=self.max_depth).contains(&depth)
    }
}

/// Event classes sorted by increasing return period.
///
/// An empty catalog disables extreme-event injection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventCatalog {
    events: Vec<ExtremeEventSpec>,
}

impl EventCatalog {
    /// Sorts and validates a set of event classes.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::DuplicateEvent`] if two entries share a name or
    /// a return period.
    pub fn new(mut events: Vec<ExtremeEventSpec>) -> Result<Self, ParamsError> {
        events.sort_by_key(|e| e.return_period_years);
        let mut names = HashSet::new();
        for e in &events {
            if !names.insert(e.name.as_str()) {
                return Err(ParamsError::DuplicateEvent {
                    reason: format!("name '{}' used twice", e.name),
                });
            }
        }
        if let Some(pair) = events
            .windows(2)
            .find(|w| w[0].return_period_years == w[1].return_period_years)
        {
            return Err(ParamsError::DuplicateEvent {
                reason: format!("return period {} used twice", pair[0].return_period_years),
            });
        }
        Ok(Self { events })
    }

    /// Catalog with no events.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of event classes.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the catalog holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event classes in increasing return-period order.
    pub fn events(&self) -> &[ExtremeEventSpec] {
        &self.events
    }

    /// Looks up an event class by name.
    pub fn by_name(&self, name: &str) -> Option<&ExtremeEventSpec> {
        self.events.iter().find(|e| e.name == name)
    }
}
