//! End-to-end solving: configuration, the construction + local search
//! pipeline, and the caller-facing plan.

mod config;
mod plan;
mod runner;

pub use config::SolverConfig;
pub use plan::{Plan, VehiclePlan};
pub use runner::{solve, solve_records, SolveOutcome};
