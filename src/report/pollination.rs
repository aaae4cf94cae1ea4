//! Per-generation pollination log.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::compute::Patch;

/// `Gen\tPatch\tPollinated` rows, one per patch per generation.
pub struct PollinationLog {
    writer: BufWriter<File>,
}

impl PollinationLog {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "Gen\tPatch\tPollinated")?;
        Ok(Self { writer })
    }

    /// Log the pollination states used to produce generation `generation + 1`.
    pub fn record(&mut self, generation: usize, patches: &[Patch]) -> io::Result<()> {
        write_states(&mut self.writer, generation, patches)
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub fn write_states<W: Write>(w: &mut W, generation: usize, patches: &[Patch]) -> io::Result<()> {
    for (p, patch) in patches.iter().enumerate() {
        writeln!(w, "{}\t{}\t{}", generation, p, u8::from(patch.is_pollinated()))?;
    }
    Ok(())
}
