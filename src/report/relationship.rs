//! Lower-triangular dump of the kinship matrix.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::compute::{KinshipMatrix, SlotPosition};

/// Write the matrix to `path`.
pub fn dump_relationship<P: AsRef<Path>>(
    path: P,
    kinship: &KinshipMatrix,
    slots: &[SlotPosition],
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_relationship(&mut writer, kinship, slots)?;
    writer.flush()
}

/// Header row of within-patch indices, then row `i` as its index followed by
/// `k(i, 0)` through `k(i, i)`.
pub fn write_relationship<W: Write>(
    w: &mut W,
    kinship: &KinshipMatrix,
    slots: &[SlotPosition],
) -> io::Result<()> {
    for slot in slots {
        write!(w, "\t{}", slot.index)?;
    }
    writeln!(w)?;

    for (i, slot) in slots.iter().enumerate() {
        write!(w, "{}", slot.index)?;
        for j in 0..=i {
            write!(w, "\t{:.6}", kinship.get(i, j))?;
        }
        writeln!(w)?;
    }
    Ok(())
}
