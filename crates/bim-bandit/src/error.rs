use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BanditError {
    #[error("confidence parameters require delta * e < ln(1 + kappa), \
             got kappa = {kappa}, delta = {delta}")]
    RiskBudgetTooLarge { kappa: f64, delta: f64 },

    #[error("invalid parameter {name} = {value}: must be finite and positive")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{name} = {value} must be a probability in (0, 1)")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("best-arm identification needs at least one arm")]
    NoArms,

    #[error("prior upper bounds cover {got} arms, expected {expected}")]
    PriorLength { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, BanditError>;
