use crate::reward::Reward;
use bim_core::{Seed, TrialRng};

/// Arms paying Gaussian rewards with a shared standard deviation.
///
/// Not a diffusion oracle: used to exercise the engine against arms with
/// known means.
#[derive(Clone, Debug)]
pub struct GaussianArms {
    means: Vec<f64>,
    sigma: f64,
    rng: TrialRng,
    samples: usize,
}

impl GaussianArms {
    pub fn new(means: Vec<f64>, sigma: f64, seed: Seed) -> Self {
        Self {
            means,
            sigma,
            rng: TrialRng::new(seed),
            samples: 0,
        }
    }

    /// Means `0, 1/n, ..., (n-1)/n`; the last arm is best.
    pub fn evenly_spaced(n: usize, sigma: f64, seed: Seed) -> Self {
        let means = (0..n).map(|i| i as f64 / n as f64).collect();
        Self::new(means, sigma, seed)
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn best(&self) -> usize {
        crate::best_arm::argmax(&self.means)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl Reward for GaussianArms {
    fn sample(&mut self, arm: usize) -> f64 {
        self.samples += 1;
        self.rng.gaussian(self.means[arm], self.sigma)
    }
}
