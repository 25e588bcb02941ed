/// Stochastic reward oracle over arms `0..n`.
pub trait Reward {
    /// Draw one fresh reward sample for `arm`.
    fn sample(&mut self, arm: usize) -> f64;

    /// Record the current sample count. Default: nothing to record.
    fn checkpoint(&mut self) {}
}

impl<R: Reward + ?Sized> Reward for &mut R {
    fn sample(&mut self, arm: usize) -> f64 {
        (**self).sample(arm)
    }

    fn checkpoint(&mut self) {
        (**self).checkpoint()
    }
}
