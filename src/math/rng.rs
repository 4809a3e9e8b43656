//! Small linear congruential generator for visual jitter
//!
//! The simulation only needs cheap, repeatable randomness for spawn
//! directions and decorative effects, so a 32-bit LCG with an explicit
//! seed keeps every system deterministic under test.

/// Seeded pseudo-random generator
#[derive(Debug, Clone)]
pub struct Lcg {
    seed: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    fn step(&mut self) -> u32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        self.seed
    }

    /// Uniform value in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.step() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in [lo, hi)
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform index in [0, n)
    pub fn index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        (self.next_f32() * n as f32) as usize % n
    }

    /// Coin flip with the given probability of `true`
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }
}
