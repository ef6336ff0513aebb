//! Constructive heuristics for building initial solutions.
//!
//! - [`nearest_feasible`]: Per-vehicle nearest-feasible extension, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_feasible;
