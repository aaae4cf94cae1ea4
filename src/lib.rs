//! Selfing and dispersal - Joint evolution of two life-history traits.
//!
//! This crate simulates a one-dimensional chain of plant patches. Each
//! individual carries a selfing rate `s` and a dispersal rate `d`; seeds
//! either stay home or disperse to a neighbouring patch, outcrossing needs
//! pollinators that may fail, dispersal is costly and selfed offspring
//! suffer inbreeding depression. Traits mutate and are inherited, so the
//! chain evolves towards the combinations that pay off locally.
//!
//! # Architecture
//!
//! - `schema`: Configuration types and validation
//! - `compute`: Individuals, patches, the kinship matrix and the world loop
//! - `report`: Trait reports, pollination logs, kinship dumps and progress bars
//!
//! # Example
//!
//! ```rust,no_run
//! use selfing_dispersal::{
//!     compute::World,
//!     report::Reporter,
//!     schema::WorldConfig,
//! };
//!
//! let config = WorldConfig {
//!     generations: 500,
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//! let mut world = World::new(0, config).unwrap();
//! let mut reporter = Reporter::create("out", &world).unwrap();
//! let summary = world.run(&mut reporter).unwrap();
//!
//! println!(
//!     "mean s = {:.3}, mean d = {:.3}",
//!     summary.mean_selfing, summary.mean_dispersal
//! );
//! ```

pub mod compute;
pub mod report;
pub mod schema;

// Re-export commonly used types
pub use compute::{Experiment, RunSummary, StopReason, World, WorldError};
pub use report::Reporter;
pub use schema::{ExperimentConfig, WorldConfig};
