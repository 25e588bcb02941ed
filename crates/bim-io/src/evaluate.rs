use bim_core::{CascadeSimulator, DiffusionModel, VertexId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewer samples than this never stop an estimate.
pub const MIN_SAMPLES: usize = 100;

/// z-score of a two-sided 95% normal interval
const Z_95: f64 = 1.96;

/// Monte-Carlo spread estimate of one seed set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpreadEstimate {
    pub mean: f64,
    pub half_width: f64,
    pub samples: usize,
}

/// Sample the spread of `seeds` until the 95% half-width drops below `eps`
/// in absolute terms or relative to the running mean.
///
/// `eps` must be positive: a non-positive target never stops on a
/// stochastic spread.
pub fn estimate_spread(
    sim: &mut CascadeSimulator<'_>,
    model: DiffusionModel,
    seeds: &[VertexId],
    eps: f64,
) -> SpreadEstimate {
    let mut total = 0.0;
    let mut total_sq = 0.0;
    let mut cnt = 0usize;

    loop {
        let x = sim.run(model, seeds, &[]) as f64;
        total += x;
        total_sq += x * x;
        cnt += 1;

        if cnt > MIN_SAMPLES {
            let c = cnt as f64;
            let mean = total / c;
            let var = (total_sq / c - mean * mean).max(0.0) * c / (c - 1.0);
            let half_width = Z_95 * var.sqrt() / c.sqrt();
            if half_width < eps || half_width < eps * mean {
                return SpreadEstimate { mean, half_width, samples: cnt };
            }
        }
    }
}

/// Spread of every prefix `seeds[..1], seeds[..2], ...`. The simulator is
/// shared, so consecutive calls continue one random stream.
pub fn evaluate_prefixes(
    sim: &mut CascadeSimulator<'_>,
    model: DiffusionModel,
    seeds: &[VertexId],
    eps: f64,
) -> Vec<SpreadEstimate> {
    (1..=seeds.len())
        .map(|len| {
            let estimate = estimate_spread(sim, model, &seeds[..len], eps);
            debug!(len, mean = estimate.mean, samples = estimate.samples, "prefix evaluated");
            estimate
        })
        .collect()
}
