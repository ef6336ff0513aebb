//! Serializable route plan handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::distance::Cost;
use crate::local_search::SearchStatus;
use crate::models::{Problem, Solution};

/// One vehicle's stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePlan {
    pub vehicle: usize,
    /// Node indices with the depot at both ends.
    pub stops: Vec<usize>,
    /// Caller-supplied ids of `stops`, in the same order.
    pub node_ids: Vec<usize>,
    pub distance: Cost,
    pub load: i64,
}

/// The full result of a solve, in caller-facing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub routes: Vec<VehiclePlan>,
    /// Skipped optional node indices, ascending.
    pub skipped: Vec<usize>,
    /// Caller-supplied ids of `skipped`.
    pub skipped_ids: Vec<usize>,
    pub total_distance: Cost,
    pub skip_penalty: Cost,
    pub total_cost: Cost,
    pub status: SearchStatus,
}

impl Plan {
    pub fn new(problem: &Problem, solution: &Solution, status: SearchStatus) -> Self {
        let id_of = |i: usize| problem.node(i).id();
        let routes = solution
            .routes()
            .iter()
            .map(|r| {
                let stops = r.path();
                VehiclePlan {
                    vehicle: r.vehicle_id(),
                    node_ids: stops.iter().map(|&i| id_of(i)).collect(),
                    stops,
                    distance: r.total_distance(),
                    load: r.total_load(),
                }
            })
            .collect();

        Self {
            routes,
            skipped: solution.skipped().to_vec(),
            skipped_ids: solution.skipped().iter().map(|&i| id_of(i)).collect(),
            total_distance: solution.total_distance(),
            skip_penalty: solution.skip_penalty(),
            total_cost: solution.total_cost(),
            status,
        }
    }
}
