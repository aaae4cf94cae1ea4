//! Pairwise kinship over global slots, double-buffered by generation.
//!
//! Entries are indexed by *slot*, not by lineage: slot `k` always means the
//! k-th position of the fixed patch layout, and the individual occupying it
//! changes every generation. Only the lower triangle is stored; lookups order
//! the pair so that the larger slot selects the row.

/// Kinship matrix with a readable and a writable generation.
#[derive(Debug, Clone)]
pub struct KinshipMatrix {
    size: usize,
    buffers: [Vec<f64>; 2],
    current: usize,
}

impl KinshipMatrix {
    /// Baseline of an unrelated population: 0.5 on the diagonal, 0 elsewhere.
    pub fn unrelated(size: usize) -> Self {
        let mut initial = vec![0.0; triangle_len(size)];
        for i in 0..size {
            initial[offset(i, i)] = 0.5;
        }
        let spare = initial.clone();
        Self {
            size,
            buffers: [initial, spare],
            current: 0,
        }
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Kinship of slots `i` and `j` in the current generation.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.buffers[self.current][offset(i, j)]
    }

    /// Compute the next generation and make it current.
    ///
    /// `mothers[i]` and `fathers[i]` are the parent slots of the individual
    /// now in slot `i` (equal under selfing), `inbreeding[i]` its inbreeding
    /// coefficient. Every value is scaled by `1 - mitigation`.
    pub fn advance(&mut self, mothers: &[usize], fathers: &[usize], inbreeding: &[f64], mitigation: f64) {
        debug_assert_eq!(mothers.len(), self.size);
        debug_assert_eq!(fathers.len(), self.size);
        debug_assert_eq!(inbreeding.len(), self.size);

        let keep = 1.0 - mitigation;
        let [first, second] = &mut self.buffers;
        let (read, write) = if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };

        for i in 0..self.size {
            let row = offset(i, 0);
            let (mi, fi) = (mothers[i], fathers[i]);
            for j in 0..i {
                let (mj, fj) = (mothers[j], fathers[j]);
                let sum = read[offset(mi, mj)]
                    + read[offset(fi, fj)]
                    + read[offset(fi, mj)]
                    + read[offset(mi, fj)];
                write[row + j] = keep * 0.25 * sum;
            }
            write[row + i] = keep * (0.5 + 0.5 * inbreeding[i]);
        }

        self.current = 1 - self.current;
    }
}

#[inline]
fn triangle_len(size: usize) -> usize {
    size * (size + 1) / 2
}

#[inline]
fn offset(i: usize, j: usize) -> usize {
    let (row, col) = if i >= j { (i, j) } else { (j, i) };
    row * (row + 1) / 2 + col
}
