pub mod entity {
    /// Index of a person, always in `[0, person_count)`.
    pub type Id = usize;
    pub type Score = f64;
}


pub mod condition {
    use super::entity::{Id, Score};
    use crate::error::ValidationError;

    /// Directed pairwise affinities stored row-major in a single buffer.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Affinity {
        size: usize,
        values: Box<[Score]>,
    }

    impl Affinity {
        pub fn from_rows(rows: Vec<Vec<Score>>, size: usize) -> Result<Affinity, ValidationError> {
            if rows.len() != size {
                return Err(ValidationError::MatrixRows { expected: size, found: rows.len() });
            }
            let mut values = Vec::with_capacity(size * size);
            for (from, row) in rows.into_iter().enumerate() {
                if row.len() != size {
                    return Err(ValidationError::MatrixColumns { row: from, expected: size, found: row.len() });
                }
                if let Some((to, value)) = row.iter().enumerate().find(|(_, v)| !(0.0..=1.0).contains(*v)) {
                    return Err(ValidationError::AffinityOutOfRange { from, to, value: *value });
                }
                values.extend(row);
            }
            Ok(Affinity { size, values: values.into_boxed_slice() })
        }

        pub fn size(&self) -> usize {
            self.size
        }

        /// Affinity of `ids[0]` towards `ids[1]`.
        pub fn get_pair(&self, ids: [Id; 2]) -> Score {
            self.values[ids[0] * self.size + ids[1]]
        }

        pub fn rows(&self) -> impl Iterator<Item = &[Score]> {
            self.values.chunks(self.size.max(1))
        }
    }
}


pub mod instance {
    use super::condition::Affinity;
    use super::entity::Score;
    use crate::error::ValidationError;

    /// A validated seating problem. Nothing downstream re-checks these invariants.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ProblemInstance {
        person_count: usize,
        table_count: usize,
        people_per_table: usize,
        affinity: Affinity,
    }

    impl ProblemInstance {
        pub fn new(
            person_count: usize,
            table_count: usize,
            affinity: Vec<Vec<Score>>,
        ) -> Result<ProblemInstance, ValidationError> {
            ProblemInstance::check_counts(person_count, table_count)?;
            let affinity = Affinity::from_rows(affinity, person_count)?;
            Ok(ProblemInstance {
                person_count,
                table_count,
                people_per_table: person_count / table_count,
                affinity,
            })
        }

        /// Both counts positive, and the tables all get the same number of people.
        pub fn check_counts(person_count: usize, table_count: usize) -> Result<(), ValidationError> {
            if person_count == 0 {
                return Err(ValidationError::ZeroPersonCount);
            }
            if table_count == 0 {
                return Err(ValidationError::ZeroTableCount);
            }
            if person_count % table_count != 0 {
                return Err(ValidationError::UnevenTables { person_count, table_count });
            }
            Ok(())
        }

        pub fn person_count(&self) -> usize {
            self.person_count
        }

        pub fn table_count(&self) -> usize {
            self.table_count
        }

        pub fn people_per_table(&self) -> usize {
            self.people_per_table
        }

        pub fn affinity(&self) -> &Affinity {
            &self.affinity
        }

        /// Group affinity of a table in which every directed affinity is 1.
        pub fn max_group_affinity(&self) -> Score {
            (self.people_per_table * (self.people_per_table - 1)) as Score
        }
    }
}


pub mod group {
    use std::slice::Chunks;

    use itertools::Itertools;
    use rand::prelude::SliceRandom;
    use rand::Rng;

    use super::entity::{Id, Score};
    use super::instance::ProblemInstance;
    use crate::action::{ActionError, Index, Position, Swap};
    use crate::error::ValidationError;

    /// One candidate seating: `seats` holds every person exactly once, and
    /// table `t` occupies `seats[t * people_per_table..(t + 1) * people_per_table]`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Partition {
        seats: Box<[Id]>,
        people_per_table: usize,
        score: Option<Score>,
    }

    impl Partition {
        pub(crate) fn from_seats(seats: Vec<Id>, people_per_table: usize) -> Partition {
            Partition { seats: seats.into_boxed_slice(), people_per_table, score: None }
        }

        pub fn from_tables(tables: Vec<Vec<Id>>, instance: &ProblemInstance) -> Result<Partition, ValidationError> {
            let invalid = ValidationError::NotAPartition {
                person_count: instance.person_count(),
                table_count: instance.table_count(),
            };
            if tables.len() != instance.table_count()
                || tables.iter().any(|table| table.len() != instance.people_per_table())
            {
                return Err(invalid);
            }
            let partition = Partition::from_seats(tables.concat(), instance.people_per_table());
            if partition.is_valid(instance) { Ok(partition) } else { Err(invalid) }
        }

        /// A uniformly random permutation of everyone, cut into contiguous tables.
        pub fn random<R: Rng>(instance: &ProblemInstance, rng: &mut R) -> Partition {
            let mut seats = (0..instance.person_count()).collect_vec();
            seats.shuffle(rng);
            Partition::from_seats(seats, instance.people_per_table())
        }

        pub fn tables(&self) -> Chunks<'_, Id> {
            self.seats.chunks(self.people_per_table)
        }

        pub fn table(&self, index: Index) -> Option<&[Id]> {
            self.tables().nth(index)
        }

        pub fn table_count(&self) -> usize {
            self.seats.len() / self.people_per_table
        }

        pub fn people_per_table(&self) -> usize {
            self.people_per_table
        }

        /// All people, table after table.
        pub fn seats(&self) -> &[Id] {
            &self.seats
        }

        pub fn score(&self) -> Option<Score> {
            self.score
        }

        pub(crate) fn set_score(&mut self, score: Score) {
            self.score = Some(score);
        }

        pub fn get_member(&self, position: &Position) -> Option<Id> {
            self.seat_index(position).map(|index| self.seats[index])
        }

        pub fn is_valid(&self, instance: &ProblemInstance) -> bool {
            if self.seats.len() != instance.person_count()
                || self.people_per_table != instance.people_per_table()
            {
                return false;
            }
            let mut seen = vec![false; instance.person_count()];
            self.seats.iter().all(|&id| id < seen.len() && !std::mem::replace(&mut seen[id], true))
        }

        pub fn apply(&mut self, swap: &Swap) -> Result<(), ActionError> {
            let first = self.seat_index(&swap.0).ok_or(ActionError::InvalidPosition)?;
            let second = self.seat_index(&swap.1).ok_or(ActionError::InvalidPosition)?;
            self.seats.swap(first, second);
            self.score = None;
            Ok(())
        }

        fn seat_index(&self, position: &Position) -> Option<Index> {
            if position.group_index < self.table_count() && position.member_index < self.people_per_table {
                Some(position.group_index * self.people_per_table + position.member_index)
            } else {
                None
            }
        }
    }
}
