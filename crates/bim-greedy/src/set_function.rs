use bim_core::VertexId;

/// Set function driven by the greedy strategies.
///
/// Greedy selection is only near-optimal for monotone submodular functions;
/// nothing here checks that property.
pub trait SetFunction {
    /// Value of the whole set.
    fn value(&mut self, set: &[VertexId]) -> f64;

    /// Gain of adding `candidate` on top of `base`.
    fn marginal(&mut self, candidate: VertexId, base: &[VertexId]) -> f64 {
        let mut with = Vec::with_capacity(base.len() + 1);
        with.extend_from_slice(base);
        with.push(candidate);
        self.value(&with) - self.value(base)
    }

    /// Record the evaluation count after a selection step.
    fn checkpoint(&mut self) {}
}

impl<F> SetFunction for F
where
    F: FnMut(&[VertexId]) -> f64,
{
    fn value(&mut self, set: &[VertexId]) -> f64 {
        self(set)
    }
}
