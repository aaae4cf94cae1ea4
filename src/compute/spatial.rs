//! Spatial profiles for per-patch parameters.
//!
//! Capacity and pollination probability vary along the chain following one of
//! three shapes between a configured minimum and maximum.

use serde::{Deserialize, Serialize};

use crate::schema::GradientConfig;

/// Shape of a parameter along the chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpatialProfile {
    /// Peaks at the middle patch, falls off with width `sigma`.
    #[default]
    Gaussian,
    /// Rises linearly from `min` (leftmost) to `max` (rightmost).
    Increasing,
    /// Falls linearly from `max` (leftmost) to `min` (rightmost).
    Decreasing,
}

/// Compute the value of a gradient at patch `pos` of `patches`.
///
/// The gaussian centre is `patches / 2` (integer division), so an even chain
/// peaks on the right of its two central patches.
pub fn resolve_gradient(gradient: &GradientConfig, pos: usize, patches: usize) -> f64 {
    let span = gradient.max - gradient.min;
    match gradient.profile {
        SpatialProfile::Gaussian => {
            let offset = pos as f64 - (patches / 2) as f64;
            let sigma_sq_2 = 2.0 * gradient.sigma * gradient.sigma;
            gradient.min + span * (-offset * offset / sigma_sq_2).exp()
        }
        SpatialProfile::Increasing => gradient.min + span * linear_position(pos, patches),
        SpatialProfile::Decreasing => gradient.max - span * linear_position(pos, patches),
    }
}

/// Relative position in [0, 1]; a single patch sits at 0.
#[inline]
fn linear_position(pos: usize, patches: usize) -> f64 {
    if patches > 1 {
        pos as f64 / (patches - 1) as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(profile: SpatialProfile) -> GradientConfig {
        GradientConfig {
            min: 0.2,
            max: 1.0,
            sigma: 2.0,
            profile,
        }
    }

    #[test]
    fn test_gaussian_peak_at_centre() {
        let g = gradient(SpatialProfile::Gaussian);
        assert!((resolve_gradient(&g, 5, 11) - 1.0).abs() < 1e-12);
        assert!(resolve_gradient(&g, 0, 11) < resolve_gradient(&g, 3, 11));
        assert!(resolve_gradient(&g, 0, 11) >= 0.2);
    }

    #[test]
    fn test_gaussian_symmetric() {
        let g = gradient(SpatialProfile::Gaussian);
        let left = resolve_gradient(&g, 3, 11);
        let right = resolve_gradient(&g, 7, 11);
        assert!((left - right).abs() < 1e-12);
    }

    #[test]
    fn test_linear_endpoints() {
        let inc = gradient(SpatialProfile::Increasing);
        let dec = gradient(SpatialProfile::Decreasing);
        assert!((resolve_gradient(&inc, 0, 5) - 0.2).abs() < 1e-12);
        assert!((resolve_gradient(&inc, 4, 5) - 1.0).abs() < 1e-12);
        assert!((resolve_gradient(&dec, 0, 5) - 1.0).abs() < 1e-12);
        assert!((resolve_gradient(&dec, 4, 5) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_single_patch_linear() {
        assert!((resolve_gradient(&gradient(SpatialProfile::Increasing), 0, 1) - 0.2).abs() < 1e-12);
        assert!((resolve_gradient(&gradient(SpatialProfile::Decreasing), 0, 1) - 1.0).abs() < 1e-12);
    }
}
