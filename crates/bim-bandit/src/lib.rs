pub mod error;
pub mod confidence;
pub mod reward;
pub mod best_arm;
pub mod synthetic;

pub use error::{BanditError, Result};
pub use confidence::{Confidence, LilConfidence};
pub use reward::Reward;
pub use best_arm::{argmax, BestArm, Decision, StoppingPolicy};
pub use synthetic::GaussianArms;
