use bim_bandit::Result;
use bim_core::{DiffusionModel, Graph, Seed, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

pub mod set_function;
pub mod greedy;
pub mod cb_greedy;
pub mod oracle;

pub use set_function::SetFunction;
pub use greedy::{greedy_lazy_forward, greedy_submodular};
pub use cb_greedy::{greedy_cb, greedy_cb_lazy, BaiParams};
pub use oracle::{DiffusionEvaluate, DiffusionReward, FixedSetReward};
pub use bim_bandit::BanditError;

/// Seed-selection strategy
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Naive greedy over the averaged oracle
    Greedy,
    /// Lazy-forward greedy over the averaged oracle
    Celf,
    /// Greedy with a best-arm search per round
    GreedyCb,
    /// Lazy-forward greedy with one persistent best-arm search
    CelfCb,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::GreedyCb,
        Strategy::CelfCb,
        Strategy::Celf,
        Strategy::Greedy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Celf => "celf",
            Strategy::GreedyCb => "greedy-cb",
            Strategy::CelfCb => "celf-cb",
        }
    }

    pub fn uses_bandit(self) -> bool {
        matches!(self, Strategy::GreedyCb | Strategy::CelfCb)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or_else(|| format!("unknown strategy '{}'", s))
    }
}

/// Everything a selection run needs besides the graph and the seed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    pub model: DiffusionModel,
    pub k: usize,
    pub eps: f64,
    pub delta: f64,
    #[serde(default)]
    pub bai: BaiParams,
}

impl SelectionParams {
    pub fn new(model: DiffusionModel, k: usize, eps: f64, delta: f64) -> Self {
        Self { model, k, eps, delta, bai: BaiParams::default() }
    }

    pub fn with_bai(mut self, bai: BaiParams) -> Self {
        self.bai = bai;
        self
    }

    /// `eps` must be finite and positive, `delta` must lie in (0, 1).
    pub fn validate(&self) -> Result<()> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(BanditError::InvalidParameter { name: "eps", value: self.eps });
        }
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(BanditError::InvalidProbability { name: "delta", value: self.delta });
        }
        Ok(())
    }
}

/// Ordered seed set with its sample-cost trace
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedSelection {
    pub strategy: Strategy,
    pub seeds: Vec<VertexId>,
    /// Cumulative oracle samples right after each pick
    pub checkpoints: Vec<usize>,
    pub samples: usize,
}

impl SeedSelection {
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Seeds with their checkpoints, in selection order
    pub fn steps(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.seeds.iter().copied().zip(self.checkpoints.iter().copied())
    }
}

/// Trials per averaged evaluation such that, by a union bound over the n²
/// evaluations of a run, every estimate is within `eps` with probability
/// at least `1 - delta`.
pub fn averaging_repeats(n: usize, eps: f64, delta: f64) -> usize {
    let n2 = (n * n) as f64;
    let repeats = n2 / (eps * eps) * (n2 / delta).ln();
    (repeats as usize).max(1)
}

/// Select up to `params.k` seeds from `graph` with the given strategy.
pub fn select(
    graph: &Graph,
    strategy: Strategy,
    params: &SelectionParams,
    seed: Seed,
) -> Result<SeedSelection> {
    params.validate()?;
    let n = graph.num_vertices();
    let k = params.k.min(n);
    info!(
        strategy = strategy.name(),
        n,
        k,
        model = %params.model,
        eps = params.eps,
        delta = params.delta,
        "selecting seeds"
    );

    if k == 0 {
        return Ok(SeedSelection {
            strategy,
            seeds: Vec::new(),
            checkpoints: Vec::new(),
            samples: 0,
        });
    }

    let selection = match strategy {
        Strategy::Greedy | Strategy::Celf => {
            let repeats = averaging_repeats(n, params.eps, params.delta);
            info!(repeats, "averaged oracle");
            let mut eval = DiffusionEvaluate::new(graph, params.model, repeats, seed);
            let seeds = if strategy == Strategy::Greedy {
                greedy_submodular(&mut eval, n, k)
            } else {
                greedy_lazy_forward(&mut eval, n, k)
            };
            SeedSelection {
                strategy,
                seeds,
                checkpoints: eval.used_samples(),
                samples: eval.samples(),
            }
        }
        Strategy::GreedyCb | Strategy::CelfCb => {
            let mut reward = DiffusionReward::new(graph, params.model, seed);
            let seeds = if strategy == Strategy::GreedyCb {
                greedy_cb(&mut reward, n, k, params.eps, params.delta, &params.bai)?
            } else {
                greedy_cb_lazy(&mut reward, n, k, params.eps, params.delta, &params.bai)?
            };
            SeedSelection {
                strategy,
                seeds,
                checkpoints: reward.used_samples().to_vec(),
                samples: reward.samples(),
            }
        }
    };

    info!(
        strategy = strategy.name(),
        seeds = ?selection.seeds,
        samples = selection.samples,
        "selection finished"
    );
    Ok(selection)
}
