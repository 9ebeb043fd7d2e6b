//! RNG module - deterministic shape dealing
//!
//! A simple LCG drives every random choice (shapes dealt to the rack, bomb
//! cells in blast mode) so that a game replays identically from its seed.

use crate::shapes::ShapeKind;

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Low bits of an LCG cycle with short periods.
        (self.next_u32() >> 16) % max
    }

    /// Pick a random element of a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx)
    }
}

/// Seeded shape dealer
#[derive(Debug, Clone)]
pub struct ShapePicker {
    seed: u32,
    rng: SimpleRng,
}

impl ShapePicker {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Deal the next shape from the full catalog
    pub fn draw(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }

    /// Shared RNG for other random game decisions
    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }
}
