//! Patches: fixed-capacity demes along the chain.

use rand::Rng;

use super::convergence::{ConvergenceWindow, TraitMeans};
use super::individual::{Individual, PressureParams, PropaguleMode};
use crate::schema::ConvergenceConfig;

/// One deme of the chain.
///
/// The population always holds exactly `capacity` individuals. Its slots are
/// numbered globally from `first_slot` to `first_slot + capacity - 1`.
#[derive(Debug, Clone)]
pub struct Patch {
    capacity: usize,
    pollination_probability: f64,
    pollinated: bool,
    population: Vec<Individual>,
    first_slot: usize,
    /// Dispersing pressures of the current population. Read by the left
    /// neighbour, then by the right neighbour, then released.
    disp_seeds: Option<Vec<f64>>,
    convergence: ConvergenceWindow,
}

impl Patch {
    pub fn new(
        capacity: usize,
        pollination_probability: f64,
        founder: Individual,
        first_slot: usize,
        window: usize,
    ) -> Self {
        Self {
            capacity,
            pollination_probability,
            pollinated: false,
            population: vec![founder; capacity],
            first_slot,
            disp_seeds: None,
            convergence: ConvergenceWindow::new(window),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn first_slot(&self) -> usize {
        self.first_slot
    }

    #[inline]
    pub fn pollination_probability(&self) -> f64 {
        self.pollination_probability
    }

    /// Pollination state drawn for the current generation.
    #[inline]
    pub fn is_pollinated(&self) -> bool {
        self.pollinated
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    #[cfg(test)]
    pub(crate) fn population_mut(&mut self) -> &mut [Individual] {
        &mut self.population
    }

    /// Redraw the pollination state.
    pub fn refresh_pollination<R: Rng>(&mut self, rng: &mut R) {
        self.pollinated = rng.gen_bool(self.pollination_probability);
    }

    /// Append the resident pressures of every individual, in population order.
    pub fn resident_pressure(&self, params: PressureParams, press: &mut Vec<f64>) {
        for ind in &self.population {
            ind.push_pressures(params, self.pollinated, PropaguleMode::Resident, press);
        }
    }

    /// Append the dispersing pressures of every individual.
    ///
    /// The first call of a generation fills the cache; later calls reuse it
    /// until [`Patch::release_dispersing_cache`].
    pub fn dispersing_pressure(&mut self, params: PressureParams, press: &mut Vec<f64>) {
        let pollinated = self.pollinated;
        let population = &self.population;
        let seeds = self.disp_seeds.get_or_insert_with(|| {
            let mut seeds = Vec::with_capacity(2 * population.len());
            for ind in population {
                ind.push_pressures(params, pollinated, PropaguleMode::Dispersing, &mut seeds);
            }
            seeds
        });
        press.extend_from_slice(seeds);
    }

    /// Drop the dispersing cache once its last reader is done.
    pub fn release_dispersing_cache(&mut self) {
        self.disp_seeds = None;
    }

    #[cfg(test)]
    pub(crate) fn has_dispersing_cache(&self) -> bool {
        self.disp_seeds.is_some()
    }

    /// Swap a staged generation in; `juveniles` comes back empty.
    pub(crate) fn replace_population(&mut self, juveniles: &mut Vec<Individual>) {
        debug_assert_eq!(juveniles.len(), self.capacity);
        std::mem::swap(&mut self.population, juveniles);
        juveniles.clear();
    }

    /// Mean selfing and dispersal rates.
    pub fn trait_means(&self) -> TraitMeans {
        let n = self.population.len() as f64;
        let (s, d) = self
            .population
            .iter()
            .fold((0.0, 0.0), |(s, d), ind| (s + ind.s, d + ind.d));
        TraitMeans { s: s / n, d: d / n }
    }

    /// Record the current means and evaluate the local convergence predicate.
    pub fn check_convergence(&mut self, config: &ConvergenceConfig) -> bool {
        let means = self.trait_means();
        self.convergence.record(means);
        self.convergence.is_converged(config)
    }
}
