use crate::fitness::rank;
use crate::model::group::Partition;

/// Elitist truncation: the best `size` seatings of `old` and `new` combined.
/// Ties keep old seatings ahead of new ones.
pub fn succeed(old: Vec<Partition>, new: Vec<Partition>, size: usize) -> Vec<Partition> {
    let mut all = old;
    all.extend(new);
    all.sort_by(rank);
    all.truncate(size);
    all
}
