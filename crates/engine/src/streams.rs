//! Independent random streams, one per stochastic component.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Component tag of the initial-state stream.
pub const START_SEED_BASE: u64 = 21_341;
/// Component tag of the spell-length stream.
pub const SPELL_SEED_BASE: u64 = 41_446;
/// Component tag of the wet-day depth stream.
pub const DEPTH_SEED_BASE: u64 = 21_342;
/// Component tag of the extreme-event stream.
pub const EVENT_SEED_BASE: u64 = 62_379;
/// Component tag of the temperature innovation stream.
pub const NOISE_SEED_BASE: u64 = 31_344;

/// One random number generator per stochastic component.
///
/// Keeping components on separate streams means that changing, say, the
/// event catalog leaves the spell and temperature sequences untouched.
#[derive(Debug, Clone)]
pub struct Streams<R> {
    /// Initial wet/dry draw and initial spell.
    pub start: R,
    /// Spell lengths.
    pub spell: R,
    /// Ordinary wet-day depths.
    pub depth: R,
    /// Extreme-event recurrence and magnitude.
    pub event: R,
    /// Temperature innovations.
    pub noise: R,
}

impl<R: Rng> Streams<R> {
    /// Bundles externally created generators.
    pub fn from_rngs(start: R, spell: R, depth: R, event: R, noise: R) -> Self {
        Self {
            start,
            spell,
            depth,
            event,
            noise,
        }
    }
}

impl Streams<StdRng> {
    /// Seeds every stream from the key `(component, seed, member)`.
    ///
    /// Distinct keys give distinct generator seeds, so no two members or
    /// components share a sequence.
    pub fn seeded(seed: u64, member: u32) -> Self {
        Self {
            start: component_rng(START_SEED_BASE, seed, member),
            spell: component_rng(SPELL_SEED_BASE, seed, member),
            depth: component_rng(DEPTH_SEED_BASE, seed, member),
            event: component_rng(EVENT_SEED_BASE, seed, member),
            noise: component_rng(NOISE_SEED_BASE, seed, member),
        }
    }
}

/// Packs the key little-endian into the 32-byte generator seed.
fn component_rng(component: u64, seed: u64, member: u32) -> StdRng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&component.to_le_bytes());
    key[8..16].copy_from_slice(&seed.to_le_bytes());
    key[16..20].copy_from_slice(&member.to_le_bytes());
    StdRng::from_seed(key)
}
