//! Report files and progress display for running worlds.
//!
//! A world writes up to three files in its output directory:
//!
//! ```text
//! report_<id>.txt        parameter header, then Gen/Patch/Ind/s/d rows
//! pollination_<id>.txt   Gen/Patch/Pollinated rows (optional)
//! relationship_<id>.txt  lower-triangular kinship matrix (optional)
//! ```

mod pollination;
mod progress;
mod relationship;
mod traits;

use std::io;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::compute::{Patch, StopReason, World};

pub use pollination::{PollinationLog, write_states};
pub use progress::world_bar;
pub use relationship::{dump_relationship, write_relationship};
pub use traits::{TraitReport, write_header, write_rows};

/// Sink for everything a world emits while running.
pub struct Reporter {
    traits: Option<TraitReport>,
    pollination: Option<PollinationLog>,
    relationship_path: Option<PathBuf>,
    progress: ProgressBar,
}

impl Reporter {
    /// A reporter that writes nothing.
    pub fn disabled() -> Self {
        Self {
            traits: None,
            pollination: None,
            relationship_path: None,
            progress: ProgressBar::hidden(),
        }
    }

    /// Open the report files of `world` inside `dir`.
    pub fn create<P: AsRef<Path>>(dir: P, world: &World) -> io::Result<Self> {
        let dir = dir.as_ref();
        let id = world.id();
        let report = &world.config().report;

        let traits = TraitReport::create(dir.join(format!("report_{}.txt", id)), world)?;

        let pollination = if report.pollination_log {
            Some(PollinationLog::create(
                dir.join(format!("pollination_{}.txt", id)),
            )?)
        } else {
            None
        };

        let relationship_path = if report.relationship_dump {
            if world.kinship().is_none() {
                warn!(
                    "World {}: relationship dump requested but kinship is not tracked",
                    id
                );
                None
            } else {
                Some(dir.join(format!("relationship_{}.txt", id)))
            }
        } else {
            None
        };

        Ok(Self {
            traits: Some(traits),
            pollination,
            relationship_path,
            progress: ProgressBar::hidden(),
        })
    }

    /// Use `bar` to display progress.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Called once before the first generation.
    pub fn begin(&mut self, world: &World) -> io::Result<()> {
        self.progress.set_length(world.config().generations as u64);
        self.progress.set_position(world.generation() as u64);
        if world.generation() % world.config().report.every == 0 {
            self.record_traits(world)?;
        }
        Ok(())
    }

    /// Write a trait snapshot of the current generation.
    pub fn record_traits(&mut self, world: &World) -> io::Result<()> {
        let Some(traits) = self.traits.as_mut() else {
            return Ok(());
        };
        if traits.write_generation(world)? {
            debug!(
                "World {}: trait snapshot at generation {}",
                world.id(),
                world.generation()
            );
        }
        Ok(())
    }

    /// Log the pollination states drawn for `generation`.
    pub fn record_pollination(&mut self, generation: usize, patches: &[Patch]) -> io::Result<()> {
        if let Some(log) = self.pollination.as_mut() {
            log.record(generation, patches)?;
        }
        Ok(())
    }

    /// Advance the progress bar by one generation.
    pub fn tick(&self) {
        self.progress.inc(1);
    }

    /// Flush everything once the run has stopped.
    ///
    /// A run ended by convergence gets a final snapshot of its last
    /// generation if that one was not already written.
    pub fn finish(&mut self, world: &World, reason: StopReason) -> io::Result<()> {
        if let Some(mut traits) = self.traits.take() {
            if reason == StopReason::Converged
                && traits.last_written() != Some(world.generation())
            {
                traits.write_generation(world)?;
            }
            traits.close()?;
        }

        if let Some(log) = self.pollination.take() {
            log.finish()?;
        }

        if let (Some(path), Some(kinship)) = (self.relationship_path.take(), world.kinship()) {
            dump_relationship(&path, kinship, world.slots())?;
            debug!("World {}: kinship written to {}", world.id(), path.display());
        }

        match reason {
            StopReason::MaxGenerations => self.progress.finish(),
            StopReason::Converged => self.progress.abandon_with_message("converged"),
        }
        Ok(())
    }
}
