//! Deterministic RNG for scenario generation.
//!
//! Random placement is only used to build test and demo scenarios; replay
//! itself is fully deterministic and never draws random numbers.  A scenario
//! seed always reproduces the same grid.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG wrapper used by scenario scattering.
pub struct ScenarioRng(SmallRng);

impl ScenarioRng {
    pub fn new(seed: u64) -> Self {
        ScenarioRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child RNG with a different seed offset, so independent
    /// scenario parts (positions, goals) do not disturb each other's stream.
    pub fn child(&mut self, offset: u64) -> ScenarioRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        ScenarioRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice, `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
