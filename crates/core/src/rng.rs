//! RNG module - explicit, seeded randomness for grid generation
//!
//! The grid is never filled from a global or time-seeded source. Callers pass
//! a `SimpleRng` seeded however they like, so a seed reproduces a whole run.

use crate::types::{Block, MAX_BLOCK_KINDS, MIN_RANDOM_BLOCK_KINDS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Draw a block whose kind is uniform in `[0, kinds)`
    pub fn next_block(&mut self, kinds: u8) -> Block {
        Block::new(self.next_range(kinds as u32) as u8)
    }

    /// Draw a palette size for a randomized game, uniform in `[3, 5]`
    pub fn next_palette_size(&mut self) -> u8 {
        let span = (MAX_BLOCK_KINDS - MIN_RANDOM_BLOCK_KINDS + 1) as u32;
        MIN_RANDOM_BLOCK_KINDS + self.next_range(span) as u8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
