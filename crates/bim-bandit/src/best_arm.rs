use crate::confidence::Confidence;
use crate::error::{BanditError, Result};
use crate::reward::Reward;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the engine decides it has found the best arm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StoppingPolicy {
    /// Also stop once an arm has absorbed a `1 + alpha` share of the pulls
    /// relative to everyone else.
    Eager { alpha: f64 },
    /// Only the interval-separation certificate and the `eps` fallback stop
    /// the search. Used when the engine is reused across greedy rounds.
    Lazy,
}

/// Why `best_arm` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    SingleArm,
    PullShare,
    Separated,
    RadiusBelowEps,
}

/// Adaptive best-arm identification with LIL-style confidence bounds.
///
/// Means and pull counts are rebuilt at the start of every `best_arm` call;
/// upper bounds persist until `reset` or `exclude`.
pub struct BestArm<C, R> {
    n: usize,
    beta: f64,
    eps: f64,
    policy: StoppingPolicy,
    conf: C,
    reward: R,
    upper_bounds: Vec<f64>,
    sum_rewards: Vec<f64>,
    num_pulls: Vec<usize>,
    mean_rewards: Vec<f64>,
    last_decision: Option<Decision>,
}

impl<C, R> BestArm<C, R>
where
    C: Confidence,
    R: Reward,
{
    pub fn new(
        n: usize,
        policy: StoppingPolicy,
        beta: f64,
        eps: f64,
        conf: C,
        reward: R,
    ) -> Result<Self> {
        if n == 0 {
            return Err(BanditError::NoArms);
        }
        Ok(Self {
            n,
            beta,
            eps,
            policy,
            conf,
            reward,
            upper_bounds: vec![f64::INFINITY; n],
            sum_rewards: vec![0.0; n],
            num_pulls: vec![0; n],
            mean_rewards: vec![0.0; n],
            last_decision: None,
        })
    }

    pub fn eager(n: usize, alpha: f64, beta: f64, eps: f64, conf: C, reward: R) -> Result<Self> {
        Self::new(n, StoppingPolicy::Eager { alpha }, beta, eps, conf, reward)
    }

    pub fn lazy(n: usize, beta: f64, eps: f64, conf: C, reward: R) -> Result<Self> {
        Self::new(n, StoppingPolicy::Lazy, beta, eps, conf, reward)
    }

    /// Seed the upper bounds carried over from an earlier round. An empty
    /// vector leaves every bound at +∞.
    pub fn with_upper_bounds(mut self, prior: Vec<f64>) -> Result<Self> {
        if prior.is_empty() {
            return Ok(self);
        }
        if prior.len() != self.n {
            return Err(BanditError::PriorLength { expected: self.n, got: prior.len() });
        }
        self.upper_bounds = prior;
        Ok(self)
    }

    pub fn n_arms(&self) -> usize {
        self.n
    }

    pub fn policy(&self) -> StoppingPolicy {
        self.policy
    }

    pub fn n_pulls(&self) -> usize {
        self.num_pulls.iter().sum()
    }

    pub fn pulls(&self) -> &[usize] {
        &self.num_pulls
    }

    pub fn means(&self) -> &[f64] {
        &self.mean_rewards
    }

    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    pub fn reward(&self) -> &R {
        &self.reward
    }

    pub fn reward_mut(&mut self) -> &mut R {
        &mut self.reward
    }

    pub fn into_reward(self) -> R {
        self.reward
    }

    /// Forget all upper bounds; accumulated means and counts are kept.
    pub fn reset(&mut self) {
        self.upper_bounds.fill(f64::INFINITY);
    }

    /// Remove `arm` from contention until the next `reset`.
    pub fn exclude(&mut self, arm: usize) {
        self.upper_bounds[arm] = f64::NEG_INFINITY;
    }

    pub fn best_arm(&mut self) -> usize {
        for i in 0..self.n {
            let r = self.reward.sample(i);
            self.num_pulls[i] = 1;
            self.sum_rewards[i] = r;
            self.mean_rewards[i] = r;
            self.tighten(i);
        }
        let mut round = self.n;
        if self.n == 1 {
            // certifying pull; there is no rival to separate from
            self.pull(0, round);
            return self.decide(0, round, Decision::SingleArm);
        }

        loop {
            let j = argmax(&self.mean_rewards);
            if let Some(decision) = self.pull(j, round) {
                return self.decide(j, round, decision);
            }

            let saved = self.upper_bounds[j];
            self.upper_bounds[j] = f64::NEG_INFINITY;
            let mut i = argmax(&self.upper_bounds);
            self.upper_bounds[j] = saved;

            if let Some(decision) = self.pull(i, round) {
                return self.decide(i, round, decision);
            }

            if self.upper_bounds[j] > self.upper_bounds[i] {
                i = j;
            }
            if self.conf.radius(self.num_pulls[i]) < self.eps {
                return self.decide(i, round, Decision::RadiusBelowEps);
            }
            round += 1;
        }
    }

    fn decide(&mut self, arm: usize, round: usize, decision: Decision) -> usize {
        debug!(round, arm, ?decision, pulls = self.n_pulls(), "best arm identified");
        self.last_decision = Some(decision);
        arm
    }

    fn tighten(&mut self, arm: usize) {
        let radius = self.conf.radius(self.num_pulls[arm]);
        let fresh = self.mean_rewards[arm] + (1.0 + self.beta) * radius;
        self.upper_bounds[arm] = self.upper_bounds[arm].min(fresh);
    }

    fn pull(&mut self, arm: usize, round: usize) -> Option<Decision> {
        let r = self.reward.sample(arm);
        self.sum_rewards[arm] += r;
        self.num_pulls[arm] += 1;
        let count = self.num_pulls[arm];
        self.mean_rewards[arm] = self.sum_rewards[arm] / count as f64;
        self.tighten(arm);

        if let StoppingPolicy::Eager { alpha } = self.policy {
            if count as f64 >= 1.0 + alpha * round.saturating_sub(count) as f64 {
                return Some(Decision::PullShare);
            }
        }

        let lower = self.mean_rewards[arm] - self.conf.radius(count);
        let rival = (0..self.n)
            .filter(|&other| other != arm)
            .map(|other| {
                let optimistic = self.mean_rewards[other] + self.conf.radius(self.num_pulls[other]);
                self.upper_bounds[other].min(optimistic)
            })
            .fold(f64::NEG_INFINITY, f64::max);

        if lower > rival {
            Some(Decision::Separated)
        } else {
            None
        }
    }
}

/// Index of the first maximal element.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
