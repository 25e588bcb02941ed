use crate::set_function::SetFunction;
use bim_bandit::argmax;
use bim_core::VertexId;
use tracing::debug;

/// Plain greedy: every round re-evaluates `f(S ∪ {x})` for all unselected x.
pub fn greedy_submodular<F>(f: &mut F, n: usize, k: usize) -> Vec<VertexId>
where
    F: SetFunction + ?Sized,
{
    let mut selected = vec![false; n];
    let mut result: Vec<VertexId> = Vec::with_capacity(k);
    let mut trial: Vec<VertexId> = Vec::with_capacity(k);

    for round in 1..=k.min(n) {
        debug!(round, "greedy round");
        let mut best: Option<(VertexId, f64)> = None;
        for j in (0..n).filter(|&j| !selected[j]) {
            trial.clear();
            trial.extend_from_slice(&result);
            trial.push(j);
            let value = f.value(&trial);
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((j, value));
            }
        }

        let Some((x, value)) = best else { break };
        debug!(round, vertex = x, value, "greedy pick");
        selected[x] = true;
        result.push(x);
        f.checkpoint();
    }
    result
}

/// Lazy-forward greedy (CELF).
///
/// Each candidate keeps an upper bound on its marginal gain and the round in
/// which that bound was last refreshed. By submodularity gains only shrink as
/// the set grows, so a candidate whose bound is both the largest and fresh
/// this round is the true best.
pub fn greedy_lazy_forward<F>(f: &mut F, n: usize, k: usize) -> Vec<VertexId>
where
    F: SetFunction + ?Sized,
{
    let mut refreshed = vec![0usize; n];
    let mut upper_bounds = vec![f64::INFINITY; n];
    let mut result: Vec<VertexId> = Vec::with_capacity(k);

    for round in 1..=k.min(n) {
        let mut evaluations = 0;
        let next = loop {
            let top = argmax(&upper_bounds);
            if refreshed[top] == round {
                break top;
            }
            upper_bounds[top] = f.marginal(top, &result);
            refreshed[top] = round;
            evaluations += 1;
        };

        debug!(round, vertex = next, gain = upper_bounds[next], evaluations, "lazy forward pick");
        result.push(next);
        upper_bounds[next] = f64::NEG_INFINITY;
        f.checkpoint();
    }
    result
}
