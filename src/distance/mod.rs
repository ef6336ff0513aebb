//! Distance matrix.
//!
//! Provides a dense integer distance matrix for routing problems.

mod matrix;

pub use matrix::{Cost, DistanceMatrix};
