use crate::error::{BanditError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::E;

/// Confidence radius as a function of the number of pulls.
pub trait Confidence {
    /// Radius after `t >= 1` pulls.
    fn radius(&self, t: usize) -> f64;
}

impl<C: Confidence + ?Sized> Confidence for &C {
    fn radius(&self, t: usize) -> f64 {
        (**self).radius(t)
    }
}

/// Anytime confidence bound from the law of the iterated logarithm:
///
/// U(t) = (1 + √κ) · √( 2σ²(1 + κ) / t · ln( ln((1 + κ) t) / δ ) )
///
/// valid for σ-sub-Gaussian rewards with failure probability δ.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LilConfidence {
    kappa: f64,
    delta: f64,
    sigma: f64,
    mult: f64,
    log_kappa_p1: f64,
    log_delta: f64,
}

impl LilConfidence {
    pub fn new(kappa: f64, delta: f64, sigma: f64) -> Result<Self> {
        for (name, value) in [("kappa", kappa), ("delta", delta), ("sigma", sigma)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BanditError::InvalidParameter { name, value });
            }
        }
        let log_kappa_p1 = kappa.ln_1p();
        if delta * E >= log_kappa_p1 {
            return Err(BanditError::RiskBudgetTooLarge { kappa, delta });
        }

        Ok(Self {
            kappa,
            delta,
            sigma,
            mult: (1.0 + kappa.sqrt()) * sigma * (2.0 * (1.0 + kappa)).sqrt(),
            log_kappa_p1,
            log_delta: delta.ln(),
        })
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Confidence for LilConfidence {
    #[inline]
    fn radius(&self, t: usize) -> f64 {
        debug_assert!(t >= 1, "confidence radius is undefined for zero pulls");
        let t = t as f64;
        self.mult * (((self.log_kappa_p1 + t.ln()).ln() - self.log_delta) / t).sqrt()
    }
}
