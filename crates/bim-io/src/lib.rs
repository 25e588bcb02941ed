pub mod loader;
pub mod results;
pub mod evaluate;
pub mod cli;

pub use loader::{load_graph, parse_graph, LoadError};
pub use results::{load_result, save_eval, save_result, RunManifest};
pub use evaluate::{estimate_spread, evaluate_prefixes, SpreadEstimate};
pub use cli::*;
