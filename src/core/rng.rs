//! Deterministic random number generation for stochastic generative models.
//!
//! The planner itself is deterministic; randomness only enters through the
//! model's `step`. Models that sample their transitions hold a `ModelRng` so
//! that a run is reproducible from its seed.
//!
//! ```
//! use trailblazer::core::ModelRng;
//!
//! let mut rng = ModelRng::new(42);
//! let mut branch = rng.fork();
//!
//! // Forks are deterministic: same parent seed and fork count, same stream.
//! let mut rng2 = ModelRng::new(42);
//! let mut branch2 = rng2.fork();
//! assert_eq!(branch.gen_f64(), branch2.gen_f64());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 stream with forking and O(1) checkpointing.
#[derive(Clone, Debug)]
pub struct ModelRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl ModelRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Bernoulli draw.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Choose an index with probability proportional to its weight.
    ///
    /// Weights do not need to sum to 1.0. Returns `None` if weights are
    /// empty or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        let mut threshold = self.gen_f64() * total;
        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold < 0.0 {
                return Some(i);
            }
        }

        // Rounding left a sliver past the last bucket.
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> RngState {
        RngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume a stream from a captured position.
    #[must_use]
    pub fn from_state(state: &RngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    pub fork_counter: u64,
}
