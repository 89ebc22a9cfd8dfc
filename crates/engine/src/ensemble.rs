//! Parallel ensemble generation.

use std::ops::Range;

use rayon::prelude::*;
use tracing::info;

use crate::error::EngineError;
use crate::simulator::Simulator;
use crate::state::Realisation;

/// Simulates every member in `members` in parallel.
///
/// Each member owns independent streams seeded from the simulator's base
/// seed and its index, so member `k` is identical to
/// [`Simulator::run_member`]`(k)` whatever the thread count. Members are
/// returned in index order. The first failing member aborts the ensemble.
pub fn run_ensemble(
    simulator: &Simulator<'_>,
    members: Range<u32>,
) -> Result<Vec<Realisation>, EngineError> {
    if members.is_empty() {
        return Err(EngineError::Configuration {
            reason: "ensemble has no members".to_string(),
        });
    }
    info!(
        basin = simulator.params().basin(),
        first = members.start,
        n_members = members.len(),
        seed = simulator.seed(),
        "generating ensemble"
    );
    let realisations = members
        .into_par_iter()
        .map(|member| simulator.run_member(member))
        .collect::<Result<Vec<_>, _>>()?;
    info!(n_members = realisations.len(), "ensemble complete");
    Ok(realisations)
}
