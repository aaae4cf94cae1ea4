//! Mutation noise models for bounded traits.
//!
//! Both traits live in [0, 1]. The gaussian model perturbs a trait on the
//! logit scale, so it never leaves the open interval unless it starts on a
//! bound; the uniform model redraws inside a window clipped to [0, 1].

use rand::Rng;
use rand_distr::StandardNormal;

use crate::schema::MutationModel;

impl MutationModel {
    /// Perturb a trait value `t` with magnitude `sigma`.
    pub fn perturb<R: Rng>(self, t: f64, sigma: f64, rng: &mut R) -> f64 {
        match self {
            MutationModel::Gaussian => {
                let noise: f64 = rng.sample(StandardNormal);
                logit_shift(t, noise * sigma)
            }
            MutationModel::Uniform => {
                let lower = (t - sigma).max(0.0);
                let upper = (t + sigma).min(1.0);
                rng.gen_range(lower..=upper)
            }
        }
    }
}

/// Shift `t` by `delta` on the logit scale: `t·e^δ / ((e^δ − 1)·t + 1)`.
///
/// Bounds are absorbing.
#[inline]
pub fn logit_shift(t: f64, delta: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t.clamp(0.0, 1.0);
    }
    let x = (t / (1.0 - t)).ln() + delta;
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_logit_shift_identity() {
        assert!((logit_shift(0.3, 0.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_logit_shift_direction() {
        assert!(logit_shift(0.3, 0.5) > 0.3);
        assert!(logit_shift(0.3, -0.5) < 0.3);
    }

    #[test]
    fn test_logit_shift_fixes_bounds() {
        assert_eq!(logit_shift(0.0, 2.0), 0.0);
        assert_eq!(logit_shift(1.0, -2.0), 1.0);
        assert!(logit_shift(0.5, 1e6) <= 1.0);
        assert!(logit_shift(0.5, -1e6) >= 0.0);
    }

    #[test]
    fn test_uniform_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = MutationModel::Uniform.perturb(0.05, 0.1, &mut rng);
            assert!((0.0..=0.15).contains(&v));
        }
    }

    #[test]
    fn test_zero_magnitude_is_noop() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(MutationModel::Uniform.perturb(0.4, 0.0, &mut rng), 0.4);
        assert!((MutationModel::Gaussian.perturb(0.4, 0.0, &mut rng) - 0.4).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_perturb_stays_in_unit_interval(
            t in 0.0f64..=1.0,
            sigma in 0.0f64..5.0,
            seed in any::<u64>(),
            uniform in any::<bool>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let model = if uniform { MutationModel::Uniform } else { MutationModel::Gaussian };
            let v = model.perturb(t, sigma, &mut rng);
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}
