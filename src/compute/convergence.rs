//! Trailing-window convergence detection for patch trait means.

use std::collections::VecDeque;

use crate::schema::ConvergenceConfig;

/// Mean traits of a patch at one check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitMeans {
    pub s: f64,
    pub d: f64,
}

/// The last `window` trait-mean samples of one patch.
#[derive(Debug, Clone)]
pub struct ConvergenceWindow {
    samples: VecDeque<TraitMeans>,
    window: usize,
}

impl ConvergenceWindow {
    pub fn new(window: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(window),
            window: window.max(1),
        }
    }

    /// Push a sample, dropping the oldest once the window is full.
    pub fn record(&mut self, means: TraitMeans) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(means);
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.window
    }

    /// Full window whose spread stays within tolerance for both traits.
    pub fn is_converged(&self, config: &ConvergenceConfig) -> bool {
        self.is_full()
            && within_tolerance(self.samples.iter().map(|m| m.s), config)
            && within_tolerance(self.samples.iter().map(|m| m.d), config)
    }
}

fn within_tolerance(values: impl Iterator<Item = f64>, config: &ConvergenceConfig) -> bool {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }
    if count == 0 {
        return false;
    }
    let mean = sum / count as f64;
    max - min <= config.absolute_tolerance + config.relative_tolerance * mean.abs()
}

/// Whether `converged` out of `patches` meets the configured quorum.
pub fn quorum_reached(converged: usize, patches: usize, quorum: f64) -> bool {
    // Guard against 0.3 * 10 rounding up to 4.
    let needed = (quorum * patches as f64 - 1e-9).ceil().max(1.0) as usize;
    converged >= needed
}
