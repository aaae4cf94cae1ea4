//! Individuals and their propagule output.

use rand::Rng;

use crate::schema::{MutationConfig, MutationTarget};

/// Which neighbourhood a propagule pressure is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropaguleMode {
    /// Seeds that stay in the mother's patch.
    Resident,
    /// Seeds that leave for one adjacent patch.
    Dispersing,
}

/// Penalties applied to propagules.
#[derive(Debug, Clone, Copy)]
pub struct PressureParams {
    /// Inbreeding depression on selfed seeds.
    pub inbreeding_depression: f64,
    /// Dispersal cost on seeds leaving the patch.
    pub dispersal_cost: f64,
}

/// A plant with two heritable traits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Individual {
    /// Selfing rate.
    pub s: f64,
    /// Dispersal rate.
    pub d: f64,
    /// Inbreeding coefficient; stays zero unless kinship is tracked.
    pub f: f64,
}

impl Individual {
    pub fn new(s: f64, d: f64) -> Self {
        Self { s, d, f: 0.0 }
    }

    /// Offspring of a selfed mother: traits copied.
    pub fn selfed(mother: &Individual) -> Self {
        Self::new(mother.s, mother.d)
    }

    /// Offspring of two parents: traits averaged.
    pub fn outcrossed(mother: &Individual, father: &Individual) -> Self {
        Self::new((mother.s + father.s) / 2.0, (mother.d + father.d) / 2.0)
    }

    /// Apply a random mutation to the traits.
    ///
    /// Under [`MutationTarget::OneTrait`] a single trial with probability
    /// `probability` decides whether anything mutates, then `d` is chosen
    /// with probability `dispersal_share` and `s` otherwise. Under
    /// [`MutationTarget::EachTrait`] each trait runs its own trial with its
    /// share of the mutation probability.
    pub fn mutate<R: Rng>(&mut self, config: &MutationConfig, rng: &mut R) {
        let mu = config.probability;
        let share = config.dispersal_share;

        match config.target {
            MutationTarget::OneTrait => {
                if rng.r#gen::<f64>() < mu {
                    if rng.r#gen::<f64>() < share {
                        self.d = config.model.perturb(self.d, config.magnitude, rng);
                    } else {
                        self.s = config.model.perturb(self.s, config.magnitude, rng);
                    }
                }
            }
            MutationTarget::EachTrait => {
                if rng.r#gen::<f64>() < mu * share {
                    self.d = config.model.perturb(self.d, config.magnitude, rng);
                }
                if rng.r#gen::<f64>() < mu * (1.0 - share) {
                    self.s = config.model.perturb(self.s, config.magnitude, rng);
                }
            }
        }
    }

    /// Append this individual's selfed and outcrossed pressures to `press`.
    ///
    /// Always pushes exactly two values, selfed first. Dispersing pressures
    /// are per neighbour: half of the dispersers go each way. Without
    /// pollination the patch produces no outcrossed seed.
    pub fn push_pressures(
        &self,
        params: PressureParams,
        pollinated: bool,
        mode: PropaguleMode,
        press: &mut Vec<f64>,
    ) {
        let leaving = match mode {
            PropaguleMode::Resident => 1.0 - self.d,
            PropaguleMode::Dispersing => self.d / 2.0 * (1.0 - params.dispersal_cost),
        };

        let selfed = leaving * self.s * (1.0 - params.inbreeding_depression);
        let outcrossed = if pollinated {
            leaving * (1.0 - self.s)
        } else {
            0.0
        };

        press.push(selfed);
        press.push(outcrossed);
    }
}
