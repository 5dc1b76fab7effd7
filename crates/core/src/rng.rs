//! RNG module - deterministic randomness for apple placement
//!
//! A small LCG is enough here: placement only needs to look random to a
//! player, while tests and replays need the same seed to give the same game.

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() >> 8) as u64 * max as u64 >> 24) as u32
    }

    /// Derive an independent generator (one per game run)
    pub fn fork(&mut self) -> SimpleRng {
        SimpleRng::new(self.next_u32())
    }

    /// Current internal state, usable as a seed to replay from here
    pub fn state(&self) -> u32 {
        self.state
    }
}
