//! # u-cvrp
//!
//! Capacitated vehicle routing with optional discharge stations: a single
//! depot, a homogeneous fleet, integer-truncated Euclidean distances, and
//! optional nodes that may be skipped at a penalty.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Node, Fleet, Problem, Route, Solution)
//! - [`distance`]: Integer distance matrix
//! - [`evaluation`]: Route metrics and solution invariant checking
//! - [`constructive`]: Nearest-feasible construction heuristic
//! - [`local_search`]: 2-opt, Or-opt, relocate, swap, dropout, and the engine
//! - [`solver`]: Configuration, solve pipeline, and output plan
//! - [`error`]: Validation and infeasibility errors

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{Error, InfeasibleError, Result, ValidationError};
