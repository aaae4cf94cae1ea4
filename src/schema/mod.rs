//! Schema module - Configuration types for selfing/dispersal simulations.

mod config;
mod experiment;

pub use config::*;
pub use experiment::*;
