//! Pluggable random draws for the stochastic decision points.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`, independent per call.
    fn next_unit(&mut self) -> f32;
}

#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeds from process entropy so production runs never repeat a sequence.
    pub fn from_entropy() -> Self {
        Self::from_seed(entropy_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly, so the result never rounds up to 1.0.
        (self.rng.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Replays a fixed list of samples, cycling when exhausted. An empty list always yields 0.
#[derive(Clone, Debug)]
pub struct FixedSource {
    samples: Vec<f32>,
    cursor: usize,
}

impl FixedSource {
    pub fn new(samples: impl Into<Vec<f32>>) -> Self {
        Self { samples: samples.into(), cursor: 0 }
    }

    pub fn constant(sample: f32) -> Self {
        Self::new(vec![sample])
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f32 {
        let sample = self.samples.get(self.cursor % self.samples.len().max(1)).copied();
        self.cursor += 1;
        sample.unwrap_or(0.0)
    }
}

fn entropy_seed() -> u64 {
    let mut hasher = RandomState::new().build_hasher();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    hasher.write_u128(nanos);
    hasher.write_u32(process::id());
    hasher.finish()
}
