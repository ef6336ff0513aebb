//! Error types.
//!
//! Validation failures are reported before any solving starts. Infeasibility
//! is reported when the fleet cannot carry every mandatory node. Running out
//! of search budget is not an error (see
//! [`SearchStatus`](crate::local_search::SearchStatus)).

use thiserror::Error as ThisError;

use crate::models::Violation;

/// A malformed problem instance.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("node set is empty")]
    EmptyNodeSet,
    #[error("at least 2 points are required, got {0}")]
    TooFewPoints(usize),
    #[error("no depot node found")]
    MissingDepot,
    #[error("multiple depot nodes: ids {first} and {second}")]
    MultipleDepots { first: usize, second: usize },
    #[error("node {id} has negative demand {demand}")]
    NegativeDemand { id: usize, demand: i32 },
    #[error("depot {id} must have zero demand, got {demand}")]
    DepotDemand { id: usize, demand: i32 },
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("duplicate node id {0}")]
    DuplicateId(usize),
    #[error("node {id} has negative skip penalty {penalty}")]
    NegativePenalty { id: usize, penalty: i64 },
    #[error("fleet must have at least one vehicle")]
    NoVehicles,
    #[error("vehicle capacity must be positive, got {0}")]
    NonPositiveCapacity(i32),
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),
    #[error("cost {value} is too large to sum over the instance (limit {limit})")]
    CostOverflow { value: i64, limit: i64 },
}

/// The fleet cannot serve every mandatory node.
#[derive(Debug, Clone, PartialEq, ThisError)]
#[error(
    "no solution found: {} mandatory node(s) left unassigned with {vehicle_count} vehicle(s) of capacity {capacity}",
    unassigned.len()
)]
pub struct InfeasibleError {
    /// Mandatory node indices that no vehicle could take.
    pub unassigned: Vec<usize>,
    pub vehicle_count: usize,
    pub capacity: i32,
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Infeasible(#[from] InfeasibleError),
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
    #[error("solution violates {} invariant(s)", .0.len())]
    InvariantViolated(Vec<Violation>),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the instance is valid but cannot be served.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible(_))
    }
}
