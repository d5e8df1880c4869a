use std::io;
use std::path::PathBuf;

use rand::distributions::WeightedError;
use thiserror::Error;

use crate::action::ActionError;
use crate::model::entity::{Id, Score};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("person count must be a positive integer")]
    ZeroPersonCount,
    #[error("table count must be a positive integer")]
    ZeroTableCount,
    #[error("{person_count} people cannot be split evenly between {table_count} tables")]
    UnevenTables { person_count: usize, table_count: usize },
    #[error("affinity matrix has {found} rows, expected {expected}")]
    MatrixRows { expected: usize, found: usize },
    #[error("affinity row {row} has {found} columns, expected {expected}")]
    MatrixColumns { row: Id, expected: usize, found: usize },
    #[error("affinity of {from} towards {to} is {value}, expected a value in [0, 1]")]
    AffinityOutOfRange { from: Id, to: Id, value: Score },
    #[error("seating is not a partition of {person_count} people into {table_count} tables")]
    NotAPartition { person_count: usize, table_count: usize },
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("mutation rate must be in [0, 1], got {0}")]
    MutationRateOutOfRange(f64),
}

/// A search step hit a state that a valid instance and population never produce.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("mutation failed: {0}")]
    Action(#[from] ActionError),
    #[error("parent selection failed: {0}")]
    Selection(#[from] WeightedError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    Validation(#[from] ValidationError),
    #[error("search aborted: {0}")]
    Search(#[from] SearchError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
