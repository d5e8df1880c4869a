use rand::distributions::{Distribution, Uniform, WeightedError, WeightedIndex};
use rand::Rng;

use crate::action::Index;
use crate::fitness::selection_weight;
use crate::model::entity::Score;
use crate::model::group::Partition;

enum Wheel {
    Weighted(WeightedIndex<Score>),
    Uniform(Uniform<Index>),
}

/// Fitness-proportionate parent selection over a scored population.
///
/// When every seating has score 1 all weights are zero, and the wheel falls
/// back to picking uniformly. Any other weighting failure, such as a NaN
/// score, is returned as an error.
pub struct Roulette {
    wheel: Wheel,
}

impl Roulette {
    pub fn new(population: &[Partition]) -> Result<Roulette, WeightedError> {
        let wheel = match WeightedIndex::new(population.iter().map(selection_weight)) {
            Ok(weighted) => Wheel::Weighted(weighted),
            Err(WeightedError::AllWeightsZero) => Wheel::Uniform(Uniform::new(0, population.len())),
            Err(err) => return Err(err),
        };
        Ok(Roulette { wheel })
    }

    pub fn spin<R: Rng>(&self, rng: &mut R) -> Index {
        match &self.wheel {
            Wheel::Weighted(weighted) => weighted.sample(rng),
            Wheel::Uniform(uniform) => uniform.sample(rng),
        }
    }

    pub fn pairs<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<(Index, Index)> {
        (0..count).map(|_| (self.spin(rng), self.spin(rng))).collect()
    }
}

/// Draws `count` parent pairs with replacement, as indices into `population`.
pub fn select_parents<R: Rng>(
    population: &[Partition],
    count: usize,
    rng: &mut R,
) -> Result<Vec<(Index, Index)>, WeightedError> {
    Ok(Roulette::new(population)?.pairs(count, rng))
}

/// Probability of each seating being picked by a single spin.
pub fn probabilities(population: &[Partition]) -> Vec<Score> {
    let weights: Vec<Score> = population.iter().map(selection_weight).collect();
    let total: Score = weights.iter().sum();
    if total > 0.0 {
        weights.into_iter().map(|weight| weight / total).collect()
    } else {
        vec![1.0 / population.len() as Score; population.len()]
    }
}
