use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stochastic propagation rule used by the cascade simulator
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffusionModel {
    IndependentCascade,
    LinearThreshold,
}

impl DiffusionModel {
    /// Logical ticks one trial consumes.
    pub fn ticks_per_trial(self) -> u64 {
        match self {
            DiffusionModel::IndependentCascade => 1,
            DiffusionModel::LinearThreshold => 2,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            DiffusionModel::IndependentCascade => "ic",
            DiffusionModel::LinearThreshold => "lt",
        }
    }
}

impl fmt::Display for DiffusionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown diffusion model '{0}' (expected 'ic' or 'lt')")]
pub struct UnknownModel(pub String);

impl FromStr for DiffusionModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ic" | "independent_cascade" => Ok(DiffusionModel::IndependentCascade),
            "lt" | "linear_threshold" => Ok(DiffusionModel::LinearThreshold),
            _ => Err(UnknownModel(s.to_string())),
        }
    }
}
