//! RNG module - injectable random source
//!
//! Everything random in the game (piece kind, spawn column, tile values) is
//! drawn from a [`RandomSource`] passed in by the caller, so a session is fully
//! reproducible from its seed. [`SimpleRng`] is the default implementation.

use crate::types::PieceKind;

/// Source of uniformly distributed `u32` values.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Value in `[0, max)`. `max` must be non-zero.
    ///
    /// Uses the high bits: the low bits of an LCG cycle with a short period.
    fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "next_range called with max == 0");
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seed 0 behaves like seed 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current state; seeding a new `SimpleRng` with it continues the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

/// Uniformly pick one of the seven kinds.
pub fn random_kind(rng: &mut impl RandomSource) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}
