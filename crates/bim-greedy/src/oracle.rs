use crate::set_function::SetFunction;
use bim_bandit::Reward;
use bim_core::{CascadeSimulator, DiffusionModel, Graph, Seed, TrialRng, VertexId};

/// Averaged spread oracle.
///
/// Each evaluation builds a fresh simulator seeded from the oracle's own
/// stream and averages `repeats` trials.
pub struct DiffusionEvaluate<'g> {
    graph: &'g Graph,
    model: DiffusionModel,
    repeats: usize,
    rng: TrialRng,
    evaluations: usize,
    checkpoints: Vec<usize>,
}

impl<'g> DiffusionEvaluate<'g> {
    pub fn new(graph: &'g Graph, model: DiffusionModel, repeats: usize, seed: Seed) -> Self {
        Self {
            graph,
            model,
            repeats: repeats.max(1),
            rng: TrialRng::new(seed),
            evaluations: 0,
            checkpoints: Vec::new(),
        }
    }

    pub fn reseed(&mut self, seed: Seed) {
        self.rng.reseed(seed);
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Mean number of vertices `origin` activates beyond `prepare`.
    pub fn average(&mut self, origin: &[VertexId], prepare: &[VertexId]) -> f64 {
        self.evaluations += 1;
        let mut sim = CascadeSimulator::new(self.graph, self.rng.next_seed());
        let total: usize = (0..self.repeats)
            .map(|_| sim.run(self.model, origin, prepare))
            .sum();
        total as f64 / self.repeats as f64
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Cascade trials consumed so far.
    pub fn samples(&self) -> usize {
        self.evaluations * self.repeats
    }

    /// Cumulative trials after each selection step.
    pub fn used_samples(&self) -> Vec<usize> {
        self.checkpoints.iter().map(|&c| c * self.repeats).collect()
    }
}

impl SetFunction for DiffusionEvaluate<'_> {
    fn value(&mut self, set: &[VertexId]) -> f64 {
        self.average(set, &[])
    }

    fn marginal(&mut self, candidate: VertexId, base: &[VertexId]) -> f64 {
        self.average(&[candidate], base)
    }

    fn checkpoint(&mut self) {
        self.checkpoints.push(self.evaluations);
    }
}

/// Arms whose reward can be conditioned on an already chosen seed set.
pub trait FixedSetReward: Reward {
    fn add_fixed(&mut self, vertex: VertexId);
}

impl<R: FixedSetReward + ?Sized> FixedSetReward for &mut R {
    fn add_fixed(&mut self, vertex: VertexId) {
        (**self).add_fixed(vertex)
    }
}

/// Single-trial marginal spread of one candidate given the fixed seed set.
pub struct DiffusionReward<'g> {
    simulator: CascadeSimulator<'g>,
    model: DiffusionModel,
    fixed: Vec<VertexId>,
    samples: usize,
    checkpoints: Vec<usize>,
}

impl<'g> DiffusionReward<'g> {
    pub fn new(graph: &'g Graph, model: DiffusionModel, seed: Seed) -> Self {
        Self {
            simulator: CascadeSimulator::new(graph, seed),
            model,
            fixed: Vec::new(),
            samples: 0,
            checkpoints: Vec::new(),
        }
    }

    pub fn fixed(&self) -> &[VertexId] {
        &self.fixed
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn used_samples(&self) -> &[usize] {
        &self.checkpoints
    }
}

impl Reward for DiffusionReward<'_> {
    fn sample(&mut self, arm: usize) -> f64 {
        self.samples += 1;
        self.simulator.run(self.model, &[arm], &self.fixed) as f64
    }

    fn checkpoint(&mut self) {
        self.checkpoints.push(self.samples);
    }
}

impl FixedSetReward for DiffusionReward<'_> {
    fn add_fixed(&mut self, vertex: VertexId) {
        self.fixed.push(vertex);
    }
}
