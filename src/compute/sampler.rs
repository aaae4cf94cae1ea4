//! Weighted draw of mothers and fertilization mode.

use rand::Rng;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};

/// One sampled propagule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagule {
    /// Global slot of the mother.
    pub mother: usize,
    /// Selfed (true) or outcrossed (false).
    pub selfed: bool,
}

/// Categorical sampler over a candidate-mother pressure sequence.
///
/// The sequence holds two bins per candidate mother, selfed then outcrossed,
/// for consecutive global slots starting at `first_slot`.
#[derive(Debug, Clone)]
pub struct MotherSampler {
    first_slot: usize,
    weights: WeightedIndex<f64>,
}

impl MotherSampler {
    /// Build a sampler. Fails when no bin has positive weight.
    pub fn new(first_slot: usize, pressures: &[f64]) -> Result<Self, WeightedError> {
        debug_assert!(pressures.len() % 2 == 0);
        Ok(Self {
            first_slot,
            weights: WeightedIndex::new(pressures)?,
        })
    }

    /// Draw one propagule. Zero-weight bins are never returned.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Propagule {
        let bin = self.weights.sample(rng);
        Propagule {
            mother: self.first_slot + bin / 2,
            selfed: bin % 2 == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_weight_branches_never_drawn() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampler = MotherSampler::new(0, &[4.0, 0.0, 0.0, 0.0]).unwrap();
        for _ in 0..1000 {
            assert_eq!(
                sampler.draw(&mut rng),
                Propagule {
                    mother: 0,
                    selfed: true
                }
            );
        }
    }

    #[test]
    fn test_offset_and_parity() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampler = MotherSampler::new(20, &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        for _ in 0..100 {
            assert_eq!(
                sampler.draw(&mut rng),
                Propagule {
                    mother: 22,
                    selfed: false
                }
            );
        }
    }

    #[test]
    fn test_all_zero_rejected() {
        assert!(matches!(
            MotherSampler::new(0, &[0.0, 0.0]),
            Err(WeightedError::AllWeightsZero)
        ));
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut rng = StdRng::seed_from_u64(9);
        let sampler = MotherSampler::new(0, &[1.0, 3.0]).unwrap();
        let outcrossed = (0..10_000)
            .filter(|_| !sampler.draw(&mut rng).selfed)
            .count();
        assert!((7_000..8_000).contains(&outcrossed));
    }
}
