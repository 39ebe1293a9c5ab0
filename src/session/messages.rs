//! Motivation messages for the appreciation card.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const FALLBACK: &str = "Well done. Stay steady.";

/// Picks a message uniformly at random from a fixed pool.
#[derive(Debug, Clone)]
pub struct MotivationMessages {
    pool: Vec<String>,
    rng: StdRng,
}

impl MotivationMessages {
    /// Create a picker seeded from system entropy.
    #[must_use]
    pub fn new(pool: Vec<String>) -> Self {
        Self {
            pool,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a picker with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(pool: Vec<String>, seed: u64) -> Self {
        Self {
            pool,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one message.
    pub fn pick(&mut self) -> String {
        self.pool
            .choose(&mut self.rng)
            .map_or_else(|| FALLBACK.to_string(), Clone::clone)
    }

    /// Number of messages in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

impl Default for MotivationMessages {
    fn default() -> Self {
        Self::new(vec![FALLBACK.to_string()])
    }
}
