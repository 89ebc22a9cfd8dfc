//! Parameter lookup by basin identifier.

use std::collections::BTreeMap;

use crate::error::ParamsError;
use crate::set::ParameterSet;

/// Source of per-basin parameter sets.
///
/// The storage format is the implementor's concern.
pub trait ParameterRepository {
    /// Loads the parameter set of `basin`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::UnknownBasin`] if the basin is not known, or a
    /// validation error if the stored parameters are malformed.
    fn load(&self, basin: &str) -> Result<ParameterSet, ParamsError>;
}

/// Repository backed by parameter sets held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    sets: BTreeMap<String, ParameterSet>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the set for its basin.
    pub fn insert(&mut self, set: ParameterSet) {
        self.sets.insert(set.basin().to_string(), set);
    }

    /// Builder-style [`InMemoryRepository::insert`].
    pub fn with(mut self, set: ParameterSet) -> Self {
        self.insert(set);
        self
    }

    /// Known basin identifiers in sorted order.
    pub fn basins(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

impl ParameterRepository for InMemoryRepository {
    fn load(&self, basin: &str) -> Result<ParameterSet, ParamsError> {
        self.sets
            .get(basin)
            .cloned()
            .ok_or_else(|| ParamsError::UnknownBasin {
                basin: basin.to_string(),
            })
    }
}
