use crate::oracle::FixedSetReward;
use bim_bandit::{BestArm, LilConfidence, Result, StoppingPolicy};
use bim_core::VertexId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning of the best-arm search used by the confidence-bound strategies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaiParams {
    /// Stopping policy of the per-round engine in `greedy_cb`.
    /// `greedy_cb_lazy` always runs lazily.
    pub policy: StoppingPolicy,
    /// Inflation of the confidence radius in tracked upper bounds.
    pub beta: f64,
    /// Model-mismatch slack of the LIL bound.
    pub kappa: f64,
}

impl Default for BaiParams {
    fn default() -> Self {
        Self {
            policy: StoppingPolicy::Lazy,
            beta: 0.5,
            kappa: 0.03,
        }
    }
}

impl BaiParams {
    /// LIL bound for `n` arms with rewards in `[0, n]`, splitting `delta`
    /// evenly across arms.
    pub fn confidence(&self, n: usize, delta: f64) -> Result<LilConfidence> {
        LilConfidence::new(self.kappa, delta / n as f64, n as f64 / 2.0)
    }
}

/// Greedy where each round's argmax is certified by a fresh best-arm search.
pub fn greedy_cb<R>(
    reward: &mut R,
    n: usize,
    k: usize,
    eps: f64,
    delta: f64,
    params: &BaiParams,
) -> Result<Vec<VertexId>>
where
    R: FixedSetReward + ?Sized,
{
    if k.min(n) == 0 {
        return Ok(Vec::new());
    }
    let lil = params.confidence(n, delta)?;
    let mut selected = vec![false; n];
    let mut result = Vec::with_capacity(k);

    for round in 1..=k.min(n) {
        let prior = selected
            .iter()
            .map(|&s| if s { f64::NEG_INFINITY } else { f64::INFINITY })
            .collect();
        let mut bai = BestArm::new(n, params.policy, params.beta, eps, lil, &mut *reward)?
            .with_upper_bounds(prior)?;
        let x = bai.best_arm();
        debug!(round, vertex = x, pulls = bai.n_pulls(), "confidence-bound greedy pick");

        selected[x] = true;
        result.push(x);
        reward.add_fixed(x);
        reward.checkpoint();
    }
    Ok(result)
}

/// Confidence-bound CELF: one engine lives across all rounds, so upper bounds
/// learned earlier keep pruning candidates later; only the pick is excluded.
pub fn greedy_cb_lazy<R>(
    reward: &mut R,
    n: usize,
    k: usize,
    eps: f64,
    delta: f64,
    params: &BaiParams,
) -> Result<Vec<VertexId>>
where
    R: FixedSetReward + ?Sized,
{
    if k.min(n) == 0 {
        return Ok(Vec::new());
    }
    let lil = params.confidence(n, delta)?;
    let mut bai = BestArm::lazy(n, params.beta, eps, lil, &mut *reward)?;
    let mut result = Vec::with_capacity(k);

    for round in 1..=k.min(n) {
        let x = bai.best_arm();
        debug!(round, vertex = x, pulls = bai.n_pulls(), "confidence-bound lazy forward pick");

        result.push(x);
        let arms = bai.reward_mut();
        arms.add_fixed(x);
        arms.checkpoint();
        bai.exclude(x);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_bandit::{BanditError, Reward};

    /// Coverage over disjoint groups: an arm pays its group's weight unless
    /// the group is already covered.
    struct Groups {
        group: Vec<usize>,
        weight: Vec<f64>,
        covered: Vec<bool>,
        samples: usize,
        checkpoints: Vec<usize>,
    }

    impl Groups {
        fn new(group: Vec<usize>, weight: Vec<f64>) -> Self {
            let covered = vec![false; weight.len()];
            Self { group, weight, covered, samples: 0, checkpoints: Vec::new() }
        }
    }

    impl Reward for Groups {
        fn sample(&mut self, arm: usize) -> f64 {
            self.samples += 1;
            let g = self.group[arm];
            if self.covered[g] { 0.0 } else { self.weight[g] }
        }

        fn checkpoint(&mut self) {
            self.checkpoints.push(self.samples);
        }
    }

    impl FixedSetReward for Groups {
        fn add_fixed(&mut self, vertex: VertexId) {
            let g = self.group[vertex];
            self.covered[g] = true;
        }
    }

    fn groups() -> Groups {
        // arms 0,1 -> group 0 (3.0); arms 2,3 -> group 1 (2.0); arm 4 -> group 2 (0.5)
        Groups::new(vec![0, 0, 1, 1, 2], vec![3.0, 2.0, 0.5])
    }

    #[test]
    fn test_greedy_cb_covers_groups() {
        let mut reward = groups();
        let picks = greedy_cb(&mut reward, 5, 3, 0.05, 0.01, &BaiParams::default()).unwrap();
        assert_eq!(reward.group[picks[0]], 0);
        assert_eq!(reward.group[picks[1]], 1);
        assert_eq!(picks[2], 4);
        assert_eq!(reward.checkpoints.len(), 3);
        assert!(reward.checkpoints.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_greedy_cb_lazy_covers_groups() {
        let mut reward = groups();
        let picks = greedy_cb_lazy(&mut reward, 5, 3, 0.05, 0.01, &BaiParams::default()).unwrap();
        assert_eq!(reward.group[picks[0]], 0);
        assert_eq!(reward.group[picks[1]], 1);
        assert_eq!(picks[2], 4);
        assert_eq!(*reward.checkpoints.last().unwrap(), reward.samples);
    }

    #[test]
    fn test_nothing_to_select() {
        let mut reward = groups();
        let params = BaiParams::default();
        assert_eq!(greedy_cb(&mut reward, 0, 3, 0.05, 0.01, &params), Ok(vec![]));
        assert_eq!(greedy_cb_lazy(&mut reward, 5, 0, 0.05, 0.01, &params), Ok(vec![]));
        assert_eq!(reward.samples, 0);
        assert!(reward.checkpoints.is_empty());
    }

    #[test]
    fn test_bad_risk_budget() {
        let mut reward = groups();
        let err = greedy_cb(&mut reward, 5, 1, 0.05, 0.9, &BaiParams::default()).unwrap_err();
        assert!(matches!(err, BanditError::RiskBudgetTooLarge { .. }));
    }
}
