//! Seating assignment by genetic search.
//!
//! People are split into tables of equal size. A seating is scored by its
//! least satisfied table, and [`engine::SearchEngine`] evolves a population of
//! seatings until the mean score stops moving.

pub mod action;
pub mod cli;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod generate;
pub mod io;
pub mod model;
pub mod operators;
pub mod selection;
pub mod succession;

pub use engine::{Outcome, SearchConfig, SearchEngine, Termination};
pub use error::{Error, SearchError, ValidationError};
pub use model::group::Partition;
pub use model::instance::ProblemInstance;
