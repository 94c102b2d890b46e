//! Seeded random source
//!
//! The simulation never touches thread-local or OS randomness. Every draw
//! goes through a `RandomSource` owned by the game state, so a seed plus an
//! input sequence fully determines a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Uniform randomness consumed by the simulation
pub trait RandomSource {
    /// Uniform real in [0, 1)
    fn unit(&mut self) -> f32;

    /// Uniform integer in [lo, hi] (inclusive)
    fn range_u32(&mut self, lo: u32, hi: u32) -> u32;

    /// Uniform pick among the four field edges
    fn edge(&mut self) -> Edge {
        Edge::ALL[self.range_u32(0, 3) as usize]
    }

    /// Uniform real in [lo, hi)
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }
}

/// PCG-backed random source
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }
}

/// Replays a fixed list of unit draws, for tests that need exact outcomes
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    pub units: std::collections::VecDeque<f32>,
    /// Returned once the script runs dry
    pub fallback: f32,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(units: &[f32], fallback: f32) -> Self {
        Self {
            units: units.iter().copied().collect(),
            fallback,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn unit(&mut self) -> f32 {
        self.units.pop_front().unwrap_or(self.fallback)
    }

    fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        let span = (hi - lo + 1) as f32;
        lo + ((self.unit() * span) as u32).min(hi - lo)
    }
}
