//! The world: a chain of patches stepped generation by generation.
//!
//! Each generation runs, strictly in order:
//!
//! 1. every patch redraws its pollination state;
//! 2. patches reproduce left to right. Patch `i` samples mothers from its
//!    left neighbour's dispersing seeds, its own resident seeds and its right
//!    neighbour's dispersing seeds. Offspring are staged in one of two
//!    buffers chosen by the parity of `i`, and patch `i - 1` is only replaced
//!    once patch `i` is done, since `i` still reads `i - 1`'s old population;
//! 3. the kinship matrix, if tracked, advances one generation.
//!
//! Convergence checks and reporting are driven by [`World::run`].

use log::{debug, info, warn};
use rand::distributions::WeightedError;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::convergence::{TraitMeans, quorum_reached};
use super::individual::{Individual, PressureParams};
use super::kinship::KinshipMatrix;
use super::patch::Patch;
use super::sampler::{MotherSampler, Propagule};
use crate::report::Reporter;
use crate::schema::{ConfigError, WorldConfig};

/// Where a global slot lives in the fixed patch layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    pub patch: usize,
    pub index: usize,
}

/// Errors raised while building or running a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Generation {generation}: no propagule can reach patch {patch} (all pressures are zero)")]
    NoPropagules { generation: usize, patch: usize },
    #[error("Invalid propagule weights: {0}")]
    Sampling(#[from] WeightedError),
    #[error("World halted at generation {generation} by an earlier error")]
    Halted { generation: usize },
}

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Generation budget exhausted.
    MaxGenerations,
    /// Enough patches converged.
    Converged,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// World identifier.
    pub world: usize,
    /// Seed the world's generator was built from.
    pub seed: u64,
    /// Generations completed.
    pub generations: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Patches converged at the last check.
    pub converged_patches: usize,
    /// Mean selfing rate over all individuals.
    pub mean_selfing: f64,
    /// Mean dispersal rate over all individuals.
    pub mean_dispersal: f64,
}

/// A simulated world.
pub struct World {
    id: usize,
    config: WorldConfig,
    seed: u64,
    rng: StdRng,
    generation: usize,
    patches: Vec<Patch>,
    /// Global slot -> (patch, index). Fixed for the world's lifetime.
    slots: Vec<SlotPosition>,
    /// Next generation of the patch being built, by patch parity.
    juveniles: [Vec<Individual>; 2],
    kinship: Option<KinshipMatrix>,
    /// Parent slots of every offspring of the generation under construction.
    mothers: Vec<usize>,
    fathers: Vec<usize>,
    /// Set once a generation failed part-way; the chain is then mixed.
    halted: bool,
}

impl World {
    /// Build a world from a validated configuration.
    pub fn new(id: usize, config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let capacities = config.capacities();
        let probabilities = config.pollination_probabilities();
        let founder = Individual::new(config.initial_selfing, config.initial_dispersal);
        let max_capacity = capacities.iter().copied().max().unwrap_or(0);

        let mut patches = Vec::with_capacity(config.patches);
        let mut slots = Vec::new();
        for (patch, (&capacity, &p)) in capacities.iter().zip(&probabilities).enumerate() {
            patches.push(Patch::new(
                capacity,
                p,
                founder,
                slots.len(),
                config.convergence.window,
            ));
            slots.extend((0..capacity).map(|index| SlotPosition { patch, index }));
        }

        let total = slots.len();
        let kinship = config
            .kinship
            .enabled
            .then(|| KinshipMatrix::unrelated(total));
        let parent_capacity = if kinship.is_some() { total } else { 0 };

        debug!(
            "World {}: {} patches, {} slots, seed {}",
            id, config.patches, total, seed
        );

        Ok(Self {
            id,
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            patches,
            slots,
            juveniles: [
                Vec::with_capacity(max_capacity),
                Vec::with_capacity(max_capacity),
            ],
            kinship,
            mothers: Vec::with_capacity(parent_capacity),
            fathers: Vec::with_capacity(parent_capacity),
            halted: false,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn slots(&self) -> &[SlotPosition] {
        &self.slots
    }

    /// Total number of individuals (and kinship slots).
    pub fn total_individuals(&self) -> usize {
        self.slots.len()
    }

    pub fn kinship(&self) -> Option<&KinshipMatrix> {
        self.kinship.as_ref()
    }

    /// Individual currently occupying a global slot.
    pub fn individual(&self, slot: usize) -> &Individual {
        let pos = self.slots[slot];
        &self.patches[pos.patch].population()[pos.index]
    }

    /// Mean traits over every individual in the world.
    pub fn mean_traits(&self) -> TraitMeans {
        let n = self.total_individuals() as f64;
        let (s, d) = self
            .patches
            .iter()
            .flat_map(|p| p.population())
            .fold((0.0, 0.0), |(s, d), ind| (s + ind.s, d + ind.d));
        TraitMeans { s: s / n, d: d / n }
    }

    fn pressure_params(&self) -> PressureParams {
        PressureParams {
            inbreeding_depression: self.config.inbreeding_depression,
            dispersal_cost: self.config.dispersal_cost,
        }
    }

    /// Whether a failed generation stopped this world.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Advance one generation: pollination, reproduction, kinship.
    ///
    /// A failure part-way through the chain discards the staged offspring,
    /// the dispersing caches and the parent records, and halts the world:
    /// patches to the left of the failure already hold the new generation,
    /// so every later call returns [`WorldError::Halted`].
    pub fn step(&mut self) -> Result<(), WorldError> {
        if self.halted {
            return Err(WorldError::Halted {
                generation: self.generation,
            });
        }

        for patch in &mut self.patches {
            patch.refresh_pollination(&mut self.rng);
        }

        for idx in 0..self.patches.len() {
            if let Err(e) = self.reproduce_patch(idx) {
                self.abort_generation();
                return Err(e);
            }
        }

        self.advance_kinship();
        self.generation += 1;
        Ok(())
    }

    fn abort_generation(&mut self) {
        for buffer in &mut self.juveniles {
            buffer.clear();
        }
        for patch in &mut self.patches {
            patch.release_dispersing_cache();
        }
        self.mothers.clear();
        self.fathers.clear();
        self.halted = true;
        warn!(
            "World {} halted during generation {}",
            self.id, self.generation
        );
    }

    /// Draw the next generation of patch `idx` and commit the previous patch.
    fn reproduce_patch(&mut self, idx: usize) -> Result<(), WorldError> {
        let params = self.pressure_params();
        let last = self.patches.len() - 1;

        let neighbours: usize = [idx.checked_sub(1), (idx < last).then_some(idx + 1)]
            .into_iter()
            .flatten()
            .map(|n| self.patches[n].capacity())
            .sum();
        let mut press = Vec::with_capacity(2 * (self.patches[idx].capacity() + neighbours));
        let mut first_slot = self.patches[idx].first_slot();

        if idx > 0 {
            let left = &mut self.patches[idx - 1];
            left.dispersing_pressure(params, &mut press);
            // We are the last reader of the left neighbour's seeds.
            left.release_dispersing_cache();
            first_slot = left.first_slot();
        }

        self.patches[idx].resident_pressure(params, &mut press);

        if idx < last {
            self.patches[idx + 1].dispersing_pressure(params, &mut press);
        }

        let sampler = MotherSampler::new(first_slot, &press).map_err(|e| match e {
            WeightedError::AllWeightsZero => WorldError::NoPropagules {
                generation: self.generation,
                patch: idx,
            },
            other => WorldError::Sampling(other),
        })?;
        drop(press);

        let buffer = idx % 2;
        for _ in 0..self.patches[idx].capacity() {
            let propagule = sampler.draw(&mut self.rng);
            self.make_offspring(buffer, propagule);
        }

        // Patch idx - 1 has no reader left.
        if idx > 0 {
            let prev = idx - 1;
            self.patches[prev].replace_population(&mut self.juveniles[prev % 2]);
        }

        // Nobody to the right reads the last patch.
        if idx == last {
            self.patches[idx].replace_population(&mut self.juveniles[buffer]);
            self.patches[idx].release_dispersing_cache();
        }

        Ok(())
    }

    /// Build one offspring of `propagule` into the staging buffer.
    fn make_offspring(&mut self, buffer: usize, propagule: Propagule) {
        let pos = self.slots[propagule.mother];
        let mother = self.patches[pos.patch].population()[pos.index];

        let mut child = if propagule.selfed {
            let mut child = Individual::selfed(&mother);
            if self.kinship.is_some() {
                child.f = 0.5 + 0.5 * mother.f;
                self.mothers.push(propagule.mother);
                self.fathers.push(propagule.mother);
            }
            child
        } else {
            let father_index = self.pick_father(pos.patch, pos.index);
            let patch = &self.patches[pos.patch];
            let father = patch.population()[father_index];
            let father_slot = patch.first_slot() + father_index;

            let mut child = Individual::outcrossed(&mother, &father);
            if let Some(kinship) = &self.kinship {
                child.f = kinship.get(propagule.mother, father_slot);
                self.mothers.push(propagule.mother);
                self.fathers.push(father_slot);
            }
            child
        };

        child.mutate(&self.config.mutation, &mut self.rng);
        self.juveniles[buffer].push(child);
    }

    /// Uniform father from the mother's patch, never the mother herself.
    fn pick_father(&mut self, patch: usize, mother: usize) -> usize {
        let capacity = self.patches[patch].capacity();
        debug_assert!(capacity >= 2, "validation guarantees a possible father");
        loop {
            let father = self.rng.gen_range(0..capacity);
            if father != mother {
                return father;
            }
        }
    }

    fn advance_kinship(&mut self) {
        if let Some(kinship) = self.kinship.as_mut() {
            let inbreeding: Vec<f64> = self
                .patches
                .iter()
                .flat_map(|p| p.population().iter().map(|ind| ind.f))
                .collect();
            kinship.advance(
                &self.mothers,
                &self.fathers,
                &inbreeding,
                self.config.kinship.mitigation,
            );
        }
        self.mothers.clear();
        self.fathers.clear();
    }

    /// Sample every patch's trait means; returns how many are converged.
    pub fn check_convergence(&mut self) -> usize {
        let config = &self.config.convergence;
        self.patches
            .iter_mut()
            .map(|p| p.check_convergence(config))
            .filter(|&converged| converged)
            .count()
    }

    /// Run until the generation budget is spent or the quorum converges.
    pub fn run(&mut self, reporter: &mut Reporter) -> Result<RunSummary, WorldError> {
        let total = self.config.generations;
        let report_every = self.config.report.every;
        let convergence = self.config.convergence.clone();

        info!(
            "World {} starting: {} patches, {} individuals, {} generations",
            self.id,
            self.patches.len(),
            self.total_individuals(),
            total
        );

        reporter.begin(self)?;

        let mut converged_patches = 0;
        let stop_reason = loop {
            if self.generation >= total {
                break StopReason::MaxGenerations;
            }

            let parents = self.generation;
            self.step()?;
            reporter.record_pollination(parents, &self.patches)?;

            if convergence.enabled && self.generation % convergence.every == 0 {
                converged_patches = self.check_convergence();
                debug!(
                    "World {} generation {}: {}/{} patches converged",
                    self.id,
                    self.generation,
                    converged_patches,
                    self.patches.len()
                );
                if quorum_reached(converged_patches, self.patches.len(), convergence.quorum) {
                    break StopReason::Converged;
                }
            }

            if self.generation % report_every == 0 {
                reporter.record_traits(self)?;
            }
            reporter.tick();
        };

        if stop_reason == StopReason::Converged {
            warn!(
                "World {} converged at generation {} of {}",
                self.id, self.generation, total
            );
        }

        reporter.finish(self, stop_reason)?;

        let means = self.mean_traits();
        let summary = RunSummary {
            world: self.id,
            seed: self.seed,
            generations: self.generation,
            stop_reason,
            converged_patches,
            mean_selfing: means.s,
            mean_dispersal: means.d,
        };
        info!(
            "World {} done after {} generations: mean s = {:.3}, mean d = {:.3}",
            self.id, summary.generations, summary.mean_selfing, summary.mean_dispersal
        );
        Ok(summary)
    }

    #[cfg(test)]
    pub(crate) fn patches_mut(&mut self) -> &mut [Patch] {
        &mut self.patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GradientConfig, KinshipConfig, MutationConfig};

    fn base_config(patches: usize, capacity: f64) -> WorldConfig {
        WorldConfig {
            patches,
            inbreeding_depression: 0.2,
            dispersal_cost: 0.1,
            capacity: GradientConfig::constant(capacity),
            pollination: GradientConfig::constant(0.7),
            generations: 20,
            random_seed: Some(1234),
            ..Default::default()
        }
    }

    fn no_mutation() -> MutationConfig {
        MutationConfig {
            probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_slot_layout_contiguous() {
        let config = WorldConfig {
            capacity: GradientConfig {
                min: 5.0,
                max: 9.0,
                sigma: 1.0,
                profile: crate::compute::SpatialProfile::Increasing,
            },
            ..base_config(3, 5.0)
        };
        let world = World::new(0, config).unwrap();
        assert_eq!(world.total_individuals(), 5 + 7 + 9);
        let mut expected = 0;
        for (i, patch) in world.patches().iter().enumerate() {
            assert_eq!(patch.first_slot(), expected);
            for index in 0..patch.capacity() {
                assert_eq!(world.slots()[expected + index], SlotPosition { patch: i, index });
            }
            expected += patch.capacity();
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = World::new(0, base_config(2, 1.0));
        assert!(matches!(
            result,
            Err(WorldError::Config(ConfigError::CapacityTooSmall { .. }))
        ));
    }

    #[test]
    fn test_population_size_constant() {
        let mut world = World::new(0, base_config(4, 12.0)).unwrap();
        for _ in 0..30 {
            world.step().unwrap();
            for patch in world.patches() {
                assert_eq!(patch.population().len(), patch.capacity());
                assert!(!patch.has_dispersing_cache());
            }
        }
        assert_eq!(world.generation(), 30);
    }

    #[test]
    fn test_single_patch_never_reads_neighbours() {
        let mut world = World::new(0, base_config(1, 8.0)).unwrap();
        for _ in 0..50 {
            world.step().unwrap();
            assert!(!world.patches()[0].has_dispersing_cache());
        }
        assert_eq!(world.patches()[0].population().len(), 8);
    }

    #[test]
    fn test_traits_bounded_under_mutation() {
        let mut config = base_config(5, 10.0);
        config.mutation = MutationConfig {
            probability: 0.5,
            magnitude: 1.0,
            ..Default::default()
        };
        let mut world = World::new(0, config).unwrap();
        for _ in 0..50 {
            world.step().unwrap();
            for slot in 0..world.total_individuals() {
                let ind = world.individual(slot);
                assert!((0.0..=1.0).contains(&ind.s));
                assert!((0.0..=1.0).contains(&ind.d));
            }
        }
    }

    #[test]
    fn test_no_drift_without_mutation() {
        let mut config = base_config(3, 10.0);
        config.mutation = no_mutation();
        config.initial_selfing = 0.37;
        config.initial_dispersal = 0.21;
        let mut world = World::new(0, config).unwrap();
        for _ in 0..100 {
            world.step().unwrap();
        }
        for slot in 0..world.total_individuals() {
            let ind = world.individual(slot);
            assert_eq!(ind.s, 0.37);
            assert_eq!(ind.d, 0.21);
        }
    }

    #[test]
    fn test_offspring_within_parental_hull() {
        let mut config = base_config(2, 10.0);
        config.inbreeding_depression = 0.0;
        config.dispersal_cost = 0.0;
        config.pollination = GradientConfig::constant(1.0);
        config.mutation = no_mutation();
        let mut world = World::new(0, config).unwrap();

        // Spread parental traits so copying and averaging are distinguishable.
        let mut parents = Vec::new();
        for (p, patch) in world.patches_mut().iter_mut().enumerate() {
            for (i, ind) in patch.population_mut().iter_mut().enumerate() {
                let x = (p * 10 + i) as f64 / 20.0;
                *ind = Individual::new(x, 1.0 - x);
                parents.push(*ind);
            }
        }
        let (s_min, s_max) = (0.0, 19.0 / 20.0);

        world.step().unwrap();

        for slot in 0..world.total_individuals() {
            let child = world.individual(slot);
            let copied = parents.iter().any(|p| p.s == child.s && p.d == child.d);
            let in_hull = child.s >= s_min && child.s <= s_max && (child.s + child.d - 1.0).abs() < 1e-12;
            assert!(copied || in_hull);
        }
    }

    #[test]
    fn test_left_neighbour_read_before_replacement() {
        let mut config = base_config(2, 10.0);
        config.inbreeding_depression = 0.0;
        config.dispersal_cost = 0.0;
        config.pollination = GradientConfig::constant(1.0);
        config.mutation = no_mutation();
        let mut world = World::new(0, config).unwrap();

        // Everyone disperses, so each patch is seeded only by the other one.
        // Patch 0 carries low selfing rates, patch 1 high ones.
        let mut left_parents = Vec::new();
        for (p, patch) in world.patches_mut().iter_mut().enumerate() {
            for (i, ind) in patch.population_mut().iter_mut().enumerate() {
                let s = if p == 0 {
                    i as f64 / 100.0
                } else {
                    0.5 + i as f64 / 100.0
                };
                *ind = Individual::new(s, 1.0);
                if p == 0 {
                    left_parents.push(s);
                }
            }
        }

        world.step().unwrap();

        // Patch 1's mothers and fathers are patch 0's old population, not
        // the offspring patch 0 just produced from patch 1.
        for child in world.patches()[1].population() {
            assert_eq!(child.d, 1.0);
            let from_left = left_parents.iter().any(|&a| {
                a == child.s || left_parents.iter().any(|&b| (a + b) / 2.0 == child.s)
            });
            assert!(from_left, "s = {} not derived from patch 0", child.s);
        }
        for child in world.patches()[0].population() {
            assert!(child.s >= 0.5);
        }
    }

    #[test]
    fn test_outcrossed_inbreeding_reads_previous_kinship() {
        let mut config = base_config(3, 6.0);
        config.kinship = KinshipConfig {
            enabled: true,
            mitigation: 0.0,
        };
        let mut world = World::new(0, config).unwrap();
        for _ in 0..15 {
            world.step().unwrap();
        }

        let before = world.kinship().unwrap().clone();
        let parent_f: Vec<f64> = (0..world.total_individuals())
            .map(|slot| world.individual(slot).f)
            .collect();

        // One generation by hand, stopping before the kinship update.
        for patch in &mut world.patches {
            patch.refresh_pollination(&mut world.rng);
        }
        for idx in 0..world.patches.len() {
            world.reproduce_patch(idx).unwrap();
        }

        let mut related_outcrosses = 0;
        for slot in 0..world.total_individuals() {
            let (mother, father) = (world.mothers[slot], world.fathers[slot]);
            let child = world.individual(slot);
            if mother == father {
                assert_eq!(child.f, 0.5 + 0.5 * parent_f[mother]);
            } else {
                assert_eq!(child.f, before.get(mother, father));
                if child.f > 0.0 {
                    related_outcrosses += 1;
                }
            }
        }
        assert!(related_outcrosses > 0);

        world.advance_kinship();
        assert!(world.mothers.is_empty());
    }

    #[test]
    fn test_failed_step_discards_partial_generation() {
        let mut config = base_config(2, 4.0);
        config.pollination = GradientConfig {
            min: 0.0,
            max: 1.0,
            sigma: 1.0,
            profile: crate::compute::SpatialProfile::Decreasing,
        };
        config.initial_selfing = 0.0;
        config.initial_dispersal = 0.0;
        config.kinship = KinshipConfig {
            enabled: true,
            mitigation: 0.0,
        };
        let mut world = World::new(0, config).unwrap();

        // Patch 0 reproduces, patch 1 is unpollinated and never selfs.
        assert!(matches!(
            world.step(),
            Err(WorldError::NoPropagules { generation: 0, patch: 1 })
        ));
        assert!(world.is_halted());
        assert!(world.juveniles.iter().all(|b| b.is_empty()));
        assert!(world.mothers.is_empty() && world.fathers.is_empty());
        for patch in world.patches() {
            assert!(!patch.has_dispersing_cache());
            assert_eq!(patch.population().len(), patch.capacity());
        }

        assert!(matches!(
            world.step(),
            Err(WorldError::Halted { generation: 0 })
        ));
        assert!(world.juveniles.iter().all(|b| b.is_empty()));
        assert_eq!(world.generation(), 0);
    }

    #[test]
    fn test_all_zero_pressure_reported() {
        let mut config = base_config(1, 4.0);
        config.pollination = GradientConfig::constant(0.0);
        config.initial_selfing = 0.0;
        let mut world = World::new(0, config).unwrap();
        assert!(matches!(
            world.step(),
            Err(WorldError::NoPropagules { generation: 0, patch: 0 })
        ));
    }

    #[test]
    fn test_full_selfing_pins_inbreeding_to_one() {
        let mut config = base_config(2, 6.0);
        config.initial_selfing = 1.0;
        config.inbreeding_depression = 0.0;
        config.mutation = no_mutation();
        config.kinship = KinshipConfig {
            enabled: true,
            mitigation: 0.0,
        };
        let mut world = World::new(0, config).unwrap();
        for _ in 0..40 {
            world.step().unwrap();
        }
        for slot in 0..world.total_individuals() {
            assert!(world.individual(slot).f > 0.999);
        }
        let kinship = world.kinship().unwrap();
        for i in 0..kinship.size() {
            assert!(kinship.get(i, i) > 0.999);
        }
    }

    #[test]
    fn test_kinship_bounded_and_tracks_inbreeding() {
        let mut config = base_config(3, 8.0);
        config.kinship = KinshipConfig {
            enabled: true,
            mitigation: 0.01,
        };
        let mut world = World::new(0, config).unwrap();
        for _ in 0..25 {
            world.step().unwrap();
            let kinship = world.kinship().unwrap();
            for i in 0..kinship.size() {
                let f = world.individual(i).f;
                assert!((0.0..=1.0).contains(&f));
                assert!((kinship.get(i, i) - 0.99 * (0.5 + 0.5 * f)).abs() < 1e-12);
                for j in 0..i {
                    assert!((0.0..=1.0).contains(&kinship.get(i, j)));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = World::new(0, base_config(4, 10.0)).unwrap();
        let mut b = World::new(1, base_config(4, 10.0)).unwrap();
        for _ in 0..20 {
            a.step().unwrap();
            b.step().unwrap();
        }
        for slot in 0..a.total_individuals() {
            assert_eq!(a.individual(slot), b.individual(slot));
        }
    }

    #[test]
    fn test_run_stops_on_convergence() {
        let mut config = base_config(3, 10.0);
        config.mutation = no_mutation();
        config.generations = 500;
        config.convergence.enabled = true;
        config.convergence.every = 5;
        config.convergence.window = 2;
        config.convergence.absolute_tolerance = 0.0;
        let mut world = World::new(0, config).unwrap();
        let summary = world.run(&mut Reporter::disabled()).unwrap();
        assert_eq!(summary.stop_reason, StopReason::Converged);
        assert_eq!(summary.generations, 10);
        assert_eq!(summary.converged_patches, 3);
    }

    #[test]
    fn test_run_exhausts_budget() {
        let mut world = World::new(0, base_config(2, 10.0)).unwrap();
        let summary = world.run(&mut Reporter::disabled()).unwrap();
        assert_eq!(summary.stop_reason, StopReason::MaxGenerations);
        assert_eq!(summary.generations, 20);
        assert_eq!(summary.seed, 1234);
    }
}
