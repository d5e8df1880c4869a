//! Variation operators: ordered crossover and swap mutation.

use rand::Rng;

use crate::action::{ActionError, Index, Position, Swap};
use crate::model::entity::Id;
use crate::model::group::Partition;

/// Ordered crossover of two seatings into one child.
///
/// Both parents are read table after table. A slice `[start, end)` of the
/// first parent is kept in place, with `start` drawn from the first half and
/// `end` from the second half. The remaining seats are filled left to right
/// with the second parent's people in their order, skipping anyone already
/// seated. The child is unscored.
pub fn crossover<R: Rng>(first: &Partition, second: &Partition, rng: &mut R) -> Partition {
    let len = first.seats().len();
    let seats = if len < 2 {
        first.seats().to_vec()
    } else {
        let start = rng.gen_range(0..len / 2);
        let end = rng.gen_range(len / 2..len);
        ordered_crossover(first.seats(), second.seats(), start, end)
    };
    Partition::from_seats(seats, first.people_per_table())
}

/// Both parents must be permutations of `0..len`, with `start <= end <= len`.
pub fn ordered_crossover(first: &[Id], second: &[Id], start: Index, end: Index) -> Vec<Id> {
    let mut placed = vec![false; first.len()];
    for &id in &first[start..end] {
        placed[id] = true;
    }
    let mut donor = second.iter().copied().filter(|&id| !placed[id]);
    let mut child = Vec::with_capacity(first.len());
    child.extend(donor.by_ref().take(start));
    child.extend_from_slice(&first[start..end]);
    child.extend(donor);
    child
}

/// With probability `mutation_rate`, swaps two people sitting at different
/// tables. Drawing the same table twice leaves the seating untouched.
///
/// Returns the swap that was applied, if any. Positions are drawn from the
/// seating's own shape, so `apply` only fails on a seating whose tables do
/// not match its seat count.
pub fn mutate<R: Rng>(
    partition: &mut Partition,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<Option<Swap>, ActionError> {
    if rng.gen::<f64>() >= mutation_rate {
        return Ok(None);
    }
    let Some(swap) = draw_swap(partition.table_count(), partition.people_per_table(), rng) else {
        return Ok(None);
    };
    partition.apply(&swap)?;
    Ok(Some(swap))
}

fn draw_swap<R: Rng>(table_count: usize, people_per_table: usize, rng: &mut R) -> Option<Swap> {
    let first_table = rng.gen_range(0..table_count);
    let second_table = rng.gen_range(0..table_count);
    if first_table == second_table {
        return None;
    }
    let first = Position { group_index: first_table, member_index: rng.gen_range(0..people_per_table) };
    let second = Position { group_index: second_table, member_index: rng.gen_range(0..people_per_table) };
    Some(Swap(first, second))
}
