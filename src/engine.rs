//! The generational loop.
//!
//! Each generation the engine reports the population's mean score, checks for
//! stagnation, then breeds `population_size` children (roulette selection,
//! ordered crossover, swap mutation) and keeps the best of parents and
//! children. The only stopping rule is [`STAGNATION_LIMIT`] consecutive
//! generations with exactly the same mean score; there is no generation cap,
//! so an instance whose mean keeps moving runs until cancelled.

use std::mem;
use std::sync::atomic::{self, AtomicBool};

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, ValidationError};
use crate::fitness;
use crate::model::entity::Score;
use crate::model::group::Partition;
use crate::model::instance::ProblemInstance;
use crate::operators;
use crate::selection::select_parents;
use crate::succession::succeed;

pub const STAGNATION_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub population_size: usize,
    pub mutation_rate: f64,
    /// Fixed seed for reproducible runs; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { population_size: 1000, mutation_rate: 0.1, seed: None }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.population_size < 2 {
            return Err(ValidationError::PopulationTooSmall(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ValidationError::MutationRateOutOfRange(self.mutation_rate));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Converged,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub best: Partition,
    /// Index of the last generation that was reported.
    pub generation: usize,
    pub termination: Termination,
}

struct State {
    population: Vec<Partition>,
    generation: usize,
    stagnation: usize,
    baseline: Option<Score>,
}

impl State {
    fn new(population: Vec<Partition>) -> State {
        State { population, generation: 0, stagnation: 0, baseline: None }
    }

    fn mean_score(&self) -> Score {
        self.population.iter().map(fitness::ranking_key).sum::<Score>() / self.population.len() as Score
    }

    /// Returns true once the mean has been unchanged for `STAGNATION_LIMIT` generations.
    fn observe(&mut self, mean: Score) -> bool {
        if self.baseline == Some(mean) {
            self.stagnation += 1;
        } else {
            self.baseline = Some(mean);
            self.stagnation = 0;
        }
        self.stagnation >= STAGNATION_LIMIT
    }

    fn into_best(mut self) -> Partition {
        let index = self.population.iter().position_min_by(|a, b| fitness::rank(a, b)).unwrap_or(0);
        self.population.swap_remove(index)
    }
}

pub struct SearchEngine {
    instance: ProblemInstance,
    config: SearchConfig,
    rng: SmallRng,
}

impl SearchEngine {
    pub fn new(instance: ProblemInstance, config: SearchConfig) -> Result<SearchEngine, ValidationError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(SearchEngine { instance, config, rng })
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs until convergence and returns the best seating found.
    /// `progress` receives `(generation, mean_score)` once per generation.
    ///
    /// Errors only surface if an operator meets a seating or score that a
    /// validated instance cannot produce, such as a NaN score.
    pub fn run<F>(&mut self, progress: F) -> Result<Partition, SearchError>
    where
        F: FnMut(usize, Score),
    {
        let never = AtomicBool::new(false);
        Ok(self.run_until(progress, &never)?.best)
    }

    /// Like [`SearchEngine::run`], but also stops after the generation in
    /// which `cancel` is observed set.
    pub fn run_until<F>(&mut self, mut progress: F, cancel: &AtomicBool) -> Result<Outcome, SearchError>
    where
        F: FnMut(usize, Score),
    {
        let mut state = State::new(self.initialize());
        let termination = loop {
            let mean = state.mean_score();
            progress(state.generation, mean);
            if state.observe(mean) {
                break Termination::Converged;
            }
            if cancel.load(atomic::Ordering::Relaxed) {
                break Termination::Cancelled;
            }
            let children = self.breed(&state.population)?;
            let parents = mem::take(&mut state.population);
            state.population = succeed(parents, children, self.config.population_size);
            state.generation += 1;
        };
        let generation = state.generation;
        Ok(Outcome { best: state.into_best(), generation, termination })
    }

    fn initialize(&mut self) -> Vec<Partition> {
        let mut population = (0..self.config.population_size)
            .map(|_| Partition::random(&self.instance, &mut self.rng))
            .collect_vec();
        fitness::evaluate_all(&mut population, &self.instance);
        population
    }

    fn breed(&mut self, population: &[Partition]) -> Result<Vec<Partition>, SearchError> {
        let pairs = select_parents(population, self.config.population_size, &mut self.rng)?;
        let mut children = pairs.into_iter()
            .map(|(first, second)| operators::crossover(&population[first], &population[second], &mut self.rng))
            .collect_vec();
        for child in children.iter_mut() {
            operators::mutate(child, self.config.mutation_rate, &mut self.rng)?;
        }
        fitness::evaluate_all(&mut children, &self.instance);
        Ok(children)
    }
}
