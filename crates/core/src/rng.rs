//! RNG module - seedable shape randomizer
//!
//! Shapes are drawn independently and uniformly from the catalog. A simple LCG
//! keeps games reproducible from a seed (replays, tests).

/// 32-bit linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 runs from state 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the state: `state * 1664525 + 1013904223 (mod 2^32)`.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `0..max`, 0 when `max` is 0.
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG have
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }
}
