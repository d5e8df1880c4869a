//! Scoring of seatings.
//!
//! A seating is only as good as its unhappiest table: the raw fitness is the
//! smallest group affinity over all tables, and the score is
//! `1 - raw / max_group_affinity`. Lower scores are better, and every
//! comparison between seatings goes through [`rank`] and
//! [`selection_weight`] so the direction is decided in one place.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::model::condition::Affinity;
use crate::model::entity::{Id, Score};
use crate::model::group::Partition;
use crate::model::instance::ProblemInstance;

/// Sum of `affinity[a][b]` over all ordered pairs of distinct members.
///
/// Members are visited in ascending order, so the result depends only on who
/// sits at the table.
pub fn group_affinity(table: &[Id], affinity: &Affinity) -> Score {
    table.iter().copied().sorted().tuple_combinations()
        .map(|(a, b)| affinity.get_pair([a, b]) + affinity.get_pair([b, a]))
        .sum()
}

pub fn raw_fitness(partition: &Partition, instance: &ProblemInstance) -> Score {
    partition.tables()
        .map(|table| group_affinity(table, instance.affinity()))
        .fold(Score::INFINITY, Score::min)
}

/// Seatings with one person per table have nothing to gain and score 1.
pub fn score(partition: &Partition, instance: &ProblemInstance) -> Score {
    let max = instance.max_group_affinity();
    if max == 0.0 {
        return 1.0;
    }
    1.0 - raw_fitness(partition, instance) / max
}

pub fn evaluate(partition: &mut Partition, instance: &ProblemInstance) {
    let score = score(partition, instance);
    partition.set_score(score);
}

pub fn evaluate_all(partitions: &mut [Partition], instance: &ProblemInstance) {
    partitions.iter_mut().for_each(|partition| evaluate(partition, instance));
}

/// Orders seatings best first. Unscored seatings sort after every scored one.
pub fn rank(a: &Partition, b: &Partition) -> Ordering {
    ranking_key(a).total_cmp(&ranking_key(b))
}

/// Roulette weight of a seating: `1 - score`, so better seatings weigh more.
pub fn selection_weight(partition: &Partition) -> Score {
    partition.score().map_or(0.0, |score| 1.0 - score)
}

pub(crate) fn ranking_key(partition: &Partition) -> Score {
    partition.score().unwrap_or(Score::INFINITY)
}
