use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, StandardNormal};

pub type Seed = u64;

/// Seeded random stream owned by a single simulator or evaluator.
#[derive(Clone, Debug)]
pub struct TrialRng {
    rng: ChaCha20Rng,
}

impl TrialRng {
    pub fn new(seed: Seed) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_stream_id(global_seed: Seed, stream_id: u64) -> Self {
        // Combine seeds deterministically
        let seed = global_seed.wrapping_add(stream_id.wrapping_mul(0x9e3779b97f4a7c15));
        Self::new(seed)
    }

    pub fn reseed(&mut self, seed: Seed) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Fresh seed for a child stream.
    pub fn next_seed(&mut self) -> Seed {
        self.rng.gen::<u64>()
    }

    pub fn gaussian(&mut self, mean: f64, sigma: f64) -> f64 {
        let z: f64 = StandardNormal.sample(&mut self.rng);
        mean + sigma * z
    }
}
