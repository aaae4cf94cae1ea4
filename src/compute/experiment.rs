//! Independent replicate worlds run in parallel.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::{MultiProgress, ProgressDrawTarget};
use log::info;
use rand::prelude::*;
use rayon::prelude::*;

use super::world::{RunSummary, World, WorldError};
use crate::report::{Reporter, world_bar};
use crate::schema::ExperimentConfig;

/// A batch of worlds sharing one parameter set.
///
/// Every world gets its own seed drawn from the master seed, so a batch is
/// reproducible as a whole and its worlds never share a random stream.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
    output_dir: Option<PathBuf>,
}

impl Experiment {
    /// Validate `config` and build an experiment that writes no files.
    pub fn new(config: ExperimentConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self {
            config,
            output_dir: None,
        })
    }

    /// Write each world's reports into `dir`, creating it if needed.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> io::Result<Self> {
        let path = dir.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;
        self.output_dir = Some(path);
        Ok(self)
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Seeds of worlds `0..worlds`.
    ///
    /// A world-level `random_seed` pins every world to the same seed.
    pub fn world_seeds(&self) -> Vec<u64> {
        if let Some(seed) = self.config.world.random_seed {
            return vec![seed; self.config.worlds];
        }
        let master = self.config.random_seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(master);
        (0..self.config.worlds).map(|_| rng.r#gen()).collect()
    }

    /// Run every world to completion. Summaries are ordered by world id.
    pub fn run(&self) -> Result<Vec<RunSummary>, WorldError> {
        let seeds = self.world_seeds();
        let report = &self.config.world.report;
        let multi = if report.progress {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        info!(
            "Running {} world(s) of {} generations",
            self.config.worlds, self.config.world.generations
        );

        seeds
            .into_par_iter()
            .enumerate()
            .map(|(id, seed)| {
                let mut config = self.config.world.clone();
                config.random_seed = Some(seed);
                let mut world = World::new(id, config)?;

                let mut reporter = match &self.output_dir {
                    Some(dir) => Reporter::create(dir, &world)?,
                    None => Reporter::disabled(),
                };
                if report.progress {
                    let bar = multi.add(world_bar(id, world.config().generations));
                    reporter = reporter.with_progress(bar);
                }

                world.run(&mut reporter)
            })
            .collect()
    }
}
