use thiserror::Error;

pub type Index = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub group_index: Index,
    pub member_index: Index,
}

/// Exchange the occupants of two seats. Tables keep their size, so the
/// seating stays a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Swap(pub Position, pub Position);

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Invalid position")]
    InvalidPosition,
}
