//! Compute module - Population dynamics on a chain of patches.

mod convergence;
mod experiment;
mod individual;
mod kinship;
mod mutation;
mod patch;
mod sampler;
mod spatial;
mod world;

pub use convergence::*;
pub use experiment::*;
pub use individual::*;
pub use kinship::*;
pub use mutation::*;
pub use patch::*;
pub use sampler::*;
pub use spatial::*;
pub use world::*;
