pub mod graph;
pub mod diffusion;
pub mod cascade;
pub mod noise;

// Core types
pub type VertexId = usize;
pub type Weight = f64;

pub use graph::{Graph, Edge};
pub use diffusion::{DiffusionModel, UnknownModel};
pub use cascade::CascadeSimulator;
pub use noise::{Seed, TrialRng};
