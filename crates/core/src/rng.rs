//! RNG module - uniform random piece generation
//!
//! Every piece draws its shape and color independently and uniformly:
//! 5 shapes, 8 colors. The generator is a small seedable LCG so games,
//! tests and benchmarks are reproducible from a seed.

use blockfall_types::{COLOR_COUNT, SHAPE_COUNT};

use crate::pieces::Piece;

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
    /// The low bits of an LCG cycle with short periods, so only the high
    /// half of the state is used.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws random pieces for a board with a fixed spawn column
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    spawn_col: i16,
}

impl PieceFactory {
    pub fn new(seed: u32, spawn_col: i16) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            spawn_col,
        }
    }

    /// A piece with a uniformly random shape and color at the spawn position
    pub fn random(&mut self) -> Piece {
        let shape_id = self.rng.next_range(SHAPE_COUNT as u32) as u8;
        let color = self.rng.next_range(COLOR_COUNT as u32) as u8 + 1;
        Piece::new(shape_id, color, self.spawn_col)
    }

    /// A fresh spawn-position piece with the same shape and color as `template`
    pub fn respawn(&self, template: &Piece) -> Piece {
        Piece::new(template.shape_id(), template.color(), self.spawn_col)
    }

    pub fn spawn_col(&self) -> i16 {
        self.spawn_col
    }
}
