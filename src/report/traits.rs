//! Tab-separated trait report.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::compute::{Patch, World};

/// Trait snapshots of one world, written every `report.every` generations.
///
/// The file is flushed and closed as soon as fewer than `every` generations
/// remain, so no later snapshot can be due.
pub struct TraitReport {
    writer: Option<BufWriter<File>>,
    generations: usize,
    every: usize,
    last_written: Option<usize>,
}

impl TraitReport {
    /// Create the report file and write its parameter header.
    pub fn create<P: AsRef<Path>>(path: P, world: &World) -> io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_header(&mut writer, world)?;
        Ok(Self {
            writer: Some(writer),
            generations: world.config().generations,
            every: world.config().report.every,
            last_written: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Generation of the last snapshot written.
    pub fn last_written(&self) -> Option<usize> {
        self.last_written
    }

    /// Write the world's current generation. Returns false once closed.
    pub fn write_generation(&mut self, world: &World) -> io::Result<bool> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(false);
        };

        let generation = world.generation();
        write_rows(writer, generation, world.patches())?;
        self.last_written = Some(generation);

        if self.generations.saturating_sub(generation) < self.every {
            self.close()?;
        }
        Ok(true)
    }

    /// Flush and close the file; later writes are ignored.
    pub fn close(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Effective parameters, one `key=value` per line, then the column names.
pub fn write_header<W: Write>(w: &mut W, world: &World) -> io::Result<()> {
    let config = world.config();
    let mutation = &config.mutation;

    writeln!(w, "world={}", world.id())?;
    writeln!(w, "seed={}", world.seed())?;
    writeln!(w, "patches={}", config.patches)?;
    writeln!(w, "inbreeding_depression={}", config.inbreeding_depression)?;
    writeln!(w, "dispersal_cost={}", config.dispersal_cost)?;
    writeln!(w, "kinship={}", config.kinship.enabled)?;
    writeln!(w, "kinship_mitigation={}", config.kinship.mitigation)?;
    writeln!(w, "mutation_model={:?}", mutation.model)?;
    writeln!(w, "mutation_probability={}", mutation.probability)?;
    writeln!(w, "mutation_magnitude={}", mutation.magnitude)?;
    writeln!(w, "mutation_dispersal_share={}", mutation.dispersal_share)?;
    writeln!(w, "mutation_target={:?}", mutation.target)?;
    for (name, gradient) in [("capacity", &config.capacity), ("pollination", &config.pollination)] {
        writeln!(
            w,
            "{}_min={} {}_max={} {}_sigma={} {}_profile={:?}",
            name, gradient.min, name, gradient.max, name, gradient.sigma, name, gradient.profile
        )?;
    }
    writeln!(w, "initial_selfing={}", config.initial_selfing)?;
    writeln!(w, "initial_dispersal={}", config.initial_dispersal)?;
    writeln!(w, "generations={}", config.generations)?;
    writeln!(w, "report_every={}", config.report.every)?;

    let capacities: Vec<String> = world
        .patches()
        .iter()
        .map(|p| p.capacity().to_string())
        .collect();
    writeln!(w, "capacities={}", capacities.join(","))?;
    let probabilities: Vec<String> = world
        .patches()
        .iter()
        .map(|p| format!("{:.3}", p.pollination_probability()))
        .collect();
    writeln!(w, "pollination_probabilities={}", probabilities.join(","))?;

    writeln!(w, "Gen\tPatch\tInd\ts\td")
}

/// One row per individual: generation, patch, index, s and d to 3 decimals.
pub fn write_rows<W: Write>(w: &mut W, generation: usize, patches: &[Patch]) -> io::Result<()> {
    for (p, patch) in patches.iter().enumerate() {
        for (i, ind) in patch.population().iter().enumerate() {
            writeln!(w, "{}\t{}\t{}\t{:.3}\t{:.3}", generation, p, i, ind.s, ind.d)?;
        }
    }
    Ok(())
}
