use crate::diffusion::DiffusionModel;
use crate::graph::Graph;
use crate::noise::{Seed, TrialRng};
use crate::VertexId;

/// Incremental cascade simulator.
///
/// Per-vertex state is stamped with a logical clock instead of being cleared
/// between trials: a vertex is active in the current trial iff its stamp is at
/// least the trial's start tick. Every trial advances the clock, so no O(n)
/// reset is ever needed.
pub struct CascadeSimulator<'g> {
    graph: &'g Graph,
    rng: TrialRng,
    clock: u64,
    stamps: Vec<u64>,
    queue: Vec<VertexId>,
    // remaining threshold of vertices touched in the current LT trial
    residual: Vec<f64>,
}

impl<'g> CascadeSimulator<'g> {
    pub fn new(graph: &'g Graph, seed: Seed) -> Self {
        let n = graph.num_vertices();
        Self {
            graph,
            rng: TrialRng::new(seed),
            clock: 0,
            stamps: vec![0; n],
            queue: Vec::with_capacity(n),
            residual: vec![0.0; n],
        }
    }

    pub fn reseed(&mut self, seed: Seed) {
        self.rng.reseed(seed);
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Current logical time; strictly increases with every trial.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Run one trial and return how many vertices the `origin` set activates
    /// on top of the cascade already triggered by `prepare`.
    #[inline]
    pub fn run(
        &mut self,
        model: DiffusionModel,
        origin: &[VertexId],
        prepare: &[VertexId],
    ) -> usize {
        match model {
            DiffusionModel::IndependentCascade => self.run_independent_cascade(origin, prepare),
            DiffusionModel::LinearThreshold => self.run_linear_threshold(origin, prepare),
        }
    }

    pub fn run_independent_cascade(&mut self, origin: &[VertexId], prepare: &[VertexId]) -> usize {
        self.clock += 1;
        let now = self.clock;
        self.queue.clear();

        let mut head = 0;
        if !prepare.is_empty() {
            self.activate(prepare, now);
            self.spread_independent(head, now);
            head = self.queue.len();
        }

        self.activate(origin, now);
        self.spread_independent(head, now);

        self.queue.len() - head
    }

    pub fn run_linear_threshold(&mut self, origin: &[VertexId], prepare: &[VertexId]) -> usize {
        // `arrival` marks first contact (threshold drawn), `commit` marks activation
        let arrival = self.clock + 1;
        let commit = self.clock + 2;
        self.clock = commit;
        self.queue.clear();

        let mut head = 0;
        if !prepare.is_empty() {
            self.activate(prepare, commit);
            self.spread_threshold(head, arrival, commit);
            head = self.queue.len();
        }

        self.activate(origin, commit);
        self.spread_threshold(head, arrival, commit);

        self.queue.len() - head
    }

    fn activate(&mut self, vertices: &[VertexId], now: u64) {
        for &u in vertices {
            if self.stamps[u] < now {
                self.stamps[u] = now;
                self.queue.push(u);
            }
        }
    }

    fn spread_independent(&mut self, mut head: usize, now: u64) {
        let graph = self.graph;
        while head < self.queue.len() {
            let u = self.queue[head];
            head += 1;
            for e in graph.neighbors(u) {
                let v = e.to;
                if self.stamps[v] < now && self.rng.uniform() < e.weight {
                    self.stamps[v] = now;
                    self.queue.push(v);
                }
            }
        }
    }

    fn spread_threshold(&mut self, mut head: usize, arrival: u64, commit: u64) {
        let graph = self.graph;
        while head < self.queue.len() {
            let u = self.queue[head];
            head += 1;
            for e in graph.neighbors(u) {
                let v = e.to;
                if self.stamps[v] < arrival {
                    self.stamps[v] = arrival;
                    self.residual[v] = self.rng.uniform();
                }
                if self.stamps[v] < commit {
                    self.residual[v] -= e.weight;
                    if self.residual[v] <= 0.0 {
                        self.stamps[v] = commit;
                        self.queue.push(v);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_per_model() {
        let g = Graph::path(3, 1.0);
        let mut sim = CascadeSimulator::new(&g, 0);
        sim.run(DiffusionModel::IndependentCascade, &[0], &[]);
        assert_eq!(sim.clock(), 1);
        sim.run(DiffusionModel::LinearThreshold, &[0], &[]);
        assert_eq!(sim.clock(), 3);
    }

    #[test]
    fn duplicate_origin_counted_once() {
        let g = Graph::new(3);
        let mut sim = CascadeSimulator::new(&g, 0);
        assert_eq!(sim.run_independent_cascade(&[1, 1, 2], &[]), 2);
        assert_eq!(sim.run_linear_threshold(&[1, 1, 2], &[]), 2);
    }

    #[test]
    fn empty_origin_activates_nothing() {
        let g = Graph::path(2, 1.0);
        let mut sim = CascadeSimulator::new(&g, 0);
        assert_eq!(sim.run_independent_cascade(&[], &[0]), 0);
        assert_eq!(sim.run_linear_threshold(&[], &[]), 0);
    }
}
