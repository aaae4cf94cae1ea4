//! Configuration types for a single simulated world.

use serde::{Deserialize, Serialize};

use crate::compute::{Individual, SpatialProfile, resolve_gradient};

/// Top-level configuration of one world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Number of patches in the chain.
    pub patches: usize,
    /// Inbreeding depression (delta), penalty on selfed propagules.
    pub inbreeding_depression: f64,
    /// Dispersal cost (c), penalty on propagules leaving their patch.
    pub dispersal_cost: f64,
    /// Kinship tracking.
    #[serde(default)]
    pub kinship: KinshipConfig,
    /// Mutation model and rates.
    #[serde(default)]
    pub mutation: MutationConfig,
    /// Carrying capacity across the chain.
    pub capacity: GradientConfig,
    /// Pollination probability across the chain.
    pub pollination: GradientConfig,
    /// Starting selfing rate of every individual.
    pub initial_selfing: f64,
    /// Starting dispersal rate of every individual.
    pub initial_dispersal: f64,
    /// Generation budget.
    pub generations: usize,
    /// Early termination on convergence.
    #[serde(default)]
    pub convergence: ConvergenceConfig,
    /// Output cadence and optional outputs.
    #[serde(default)]
    pub report: ReportConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            patches: 20,
            inbreeding_depression: 0.3,
            dispersal_cost: 0.2,
            kinship: KinshipConfig::default(),
            mutation: MutationConfig::default(),
            capacity: GradientConfig {
                min: 20.0,
                max: 100.0,
                sigma: 5.0,
                profile: SpatialProfile::Gaussian,
            },
            pollination: GradientConfig {
                min: 0.2,
                max: 1.0,
                sigma: 5.0,
                profile: SpatialProfile::Gaussian,
            },
            initial_selfing: 0.5,
            initial_dispersal: 0.5,
            generations: 1000,
            convergence: ConvergenceConfig::default(),
            report: ReportConfig::default(),
            random_seed: None,
        }
    }
}

/// Kinship (relationship matrix) tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinshipConfig {
    /// Whether the pairwise kinship matrix is maintained.
    #[serde(default)]
    pub enabled: bool,
    /// Fraction of kinship eroded each generation by mutation (0.0-1.0).
    #[serde(default)]
    pub mitigation: f64,
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mitigation: 0.0,
        }
    }
}

/// Noise model applied to a mutating trait.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MutationModel {
    /// Logit-preserving perturbation with normal noise.
    #[default]
    Gaussian,
    /// Uniform redraw in a window around the current value.
    Uniform,
}

/// Which traits are eligible per mutation trial.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MutationTarget {
    /// A single trial; the dispersal share picks which trait mutates.
    #[default]
    OneTrait,
    /// Independent trials for `d` (rate share) and `s` (remaining share).
    EachTrait,
}

/// Mutation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Noise model.
    #[serde(default)]
    pub model: MutationModel,
    /// Mutation probability per offspring (mu).
    #[serde(default = "default_mutation_probability")]
    pub probability: f64,
    /// Mutation magnitude (sigma): standard deviation or half-window.
    #[serde(default = "default_mutation_magnitude")]
    pub magnitude: f64,
    /// Share of mutations hitting dispersal rather than selfing.
    #[serde(default = "default_dispersal_share")]
    pub dispersal_share: f64,
    /// Trial scheme.
    #[serde(default)]
    pub target: MutationTarget,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            model: MutationModel::default(),
            probability: default_mutation_probability(),
            magnitude: default_mutation_magnitude(),
            dispersal_share: default_dispersal_share(),
            target: MutationTarget::default(),
        }
    }
}

fn default_mutation_probability() -> f64 {
    0.01
}
fn default_mutation_magnitude() -> f64 {
    0.1
}
fn default_dispersal_share() -> f64 {
    0.5
}

/// A per-patch parameter varying along the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientConfig {
    /// Lowest value.
    pub min: f64,
    /// Highest value.
    pub max: f64,
    /// Spread of the gaussian profile, in patches.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Shape of the gradient.
    #[serde(default)]
    pub profile: SpatialProfile,
}

fn default_sigma() -> f64 {
    1.0
}

impl GradientConfig {
    /// A flat gradient with the same value in every patch.
    pub fn constant(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            sigma: 1.0,
            profile: SpatialProfile::Gaussian,
        }
    }

    /// Value for patch `pos` in a chain of `patches`.
    pub fn value_at(&self, pos: usize, patches: usize) -> f64 {
        resolve_gradient(self, pos, patches)
    }
}

/// Convergence detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    /// Whether convergence may end the run early.
    #[serde(default)]
    pub enabled: bool,
    /// Generations between checks.
    #[serde(default = "default_check_every")]
    pub every: usize,
    /// Number of trailing checks a patch must be stable over.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Absolute spread tolerated over the window.
    #[serde(default = "default_absolute_tolerance")]
    pub absolute_tolerance: f64,
    /// Spread tolerated relative to the window mean.
    #[serde(default)]
    pub relative_tolerance: f64,
    /// Fraction of patches that must be converged (0.0-1.0].
    #[serde(default = "default_quorum")]
    pub quorum: f64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            every: default_check_every(),
            window: default_window(),
            absolute_tolerance: default_absolute_tolerance(),
            relative_tolerance: 0.0,
            quorum: default_quorum(),
        }
    }
}

fn default_check_every() -> usize {
    100
}
fn default_window() -> usize {
    10
}
fn default_absolute_tolerance() -> f64 {
    0.01
}
fn default_quorum() -> f64 {
    1.0
}

/// Report cadence and optional outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Generations between trait snapshots.
    #[serde(default = "default_report_every")]
    pub every: usize,
    /// Write the per-generation pollination log.
    #[serde(default)]
    pub pollination_log: bool,
    /// Dump the kinship matrix at the end of the run.
    #[serde(default)]
    pub relationship_dump: bool,
    /// Show a progress bar.
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            every: default_report_every(),
            pollination_log: false,
            relationship_dump: false,
            progress: default_progress(),
        }
    }
}

fn default_report_every() -> usize {
    100
}
fn default_progress() -> bool {
    true
}

impl WorldConfig {
    /// Carrying capacity of every patch, left to right.
    pub fn capacities(&self) -> Vec<usize> {
        (0..self.patches)
            .map(|i| self.capacity.value_at(i, self.patches).max(0.0) as usize)
            .collect()
    }

    /// Pollination probability of every patch, left to right.
    pub fn pollination_probabilities(&self) -> Vec<f64> {
        (0..self.patches)
            .map(|i| self.pollination.value_at(i, self.patches))
            .collect()
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patches == 0 {
            return Err(ConfigError::NoPatches);
        }

        check_unit(self.inbreeding_depression, "inbreeding_depression")?;
        check_unit(self.dispersal_cost, "dispersal_cost")?;
        check_unit(self.kinship.mitigation, "kinship.mitigation")?;
        check_unit(self.mutation.probability, "mutation.probability")?;
        check_unit(self.mutation.dispersal_share, "mutation.dispersal_share")?;
        check_unit(self.initial_selfing, "initial_selfing")?;
        check_unit(self.initial_dispersal, "initial_dispersal")?;

        if !self.mutation.magnitude.is_finite() || self.mutation.magnitude < 0.0 {
            return Err(ConfigError::InvalidMagnitude(self.mutation.magnitude));
        }

        check_gradient(&self.capacity, "capacity")?;
        check_gradient(&self.pollination, "pollination")?;
        check_unit(self.pollination.min, "pollination.min")?;
        check_unit(self.pollination.max, "pollination.max")?;
        if self.capacity.min < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "capacity.min",
                value: self.capacity.min,
            });
        }

        // A lone mother can never find a father.
        let capacities = self.capacities();
        for (patch, &capacity) in capacities.iter().enumerate() {
            if capacity < 2 {
                return Err(ConfigError::CapacityTooSmall { patch, capacity });
            }
        }
        check_slots(&capacities, self.kinship.enabled)?;

        if self.report.every == 0 {
            return Err(ConfigError::ZeroInterval("report.every"));
        }

        let conv = &self.convergence;
        if conv.every == 0 {
            return Err(ConfigError::ZeroInterval("convergence.every"));
        }
        if conv.window == 0 {
            return Err(ConfigError::ZeroInterval("convergence.window"));
        }
        if conv.quorum.is_nan() || conv.quorum <= 0.0 || conv.quorum > 1.0 {
            return Err(ConfigError::InvalidQuorum(conv.quorum));
        }
        for (name, value) in [
            ("convergence.absolute_tolerance", conv.absolute_tolerance),
            ("convergence.relative_tolerance", conv.relative_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        Ok(())
    }
}

fn check_unit(value: f64, name: &'static str) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

/// Total slots must be addressable, and so must the kinship triangle.
fn check_slots(capacities: &[usize], kinship: bool) -> Result<(), ConfigError> {
    let limit = |size: usize| isize::MAX as usize / size;
    let total = capacities
        .iter()
        .try_fold(0usize, |acc, &c| acc.checked_add(c))
        .filter(|&t| t <= limit(std::mem::size_of::<Individual>()))
        .ok_or(ConfigError::TooManySlots)?;

    if kinship {
        total
            .checked_add(1)
            .and_then(|n| n.checked_mul(total))
            .map(|n| n / 2)
            .filter(|&n| n <= limit(2 * std::mem::size_of::<f64>()))
            .ok_or(ConfigError::KinshipTooLarge(total))?;
    }
    Ok(())
}

fn check_gradient(gradient: &GradientConfig, name: &'static str) -> Result<(), ConfigError> {
    if !gradient.min.is_finite() || !gradient.max.is_finite() {
        return Err(ConfigError::InvalidBounds(format!(
            "{} bounds must be finite",
            name
        )));
    }
    if gradient.min > gradient.max {
        return Err(ConfigError::InvalidBounds(format!(
            "{} min ({}) > max ({})",
            name, gradient.min, gradient.max
        )));
    }
    if gradient.profile == SpatialProfile::Gaussian
        && (gradient.sigma.is_nan() || gradient.sigma <= 0.0)
    {
        return Err(ConfigError::InvalidSigma {
            name,
            sigma: gradient.sigma,
        });
    }
    Ok(())
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("A world needs at least one patch")]
    NoPatches,
    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("Mutation magnitude must be finite and non-negative, got {0}")]
    InvalidMagnitude(f64),
    #[error("Invalid parameter bounds: {0}")]
    InvalidBounds(String),
    #[error("{name}.sigma must be positive for a gaussian profile, got {sigma}")]
    InvalidSigma { name: &'static str, sigma: f64 },
    #[error("Patch {patch} has capacity {capacity}; outcrossing needs at least 2 individuals")]
    CapacityTooSmall { patch: usize, capacity: usize },
    #[error("Total capacity overflows the slot index space")]
    TooManySlots,
    #[error("Kinship matrix over {0} slots does not fit in memory")]
    KinshipTooLarge(usize),
    #[error("{0} must be non-zero")]
    ZeroInterval(&'static str),
    #[error("Convergence quorum must lie in (0, 1], got {0}")]
    InvalidQuorum(f64),
    #[error("An experiment needs at least one world")]
    NoWorlds,
}
