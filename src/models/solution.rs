//! Solution and violation types.

use super::Route;
use crate::distance::Cost;

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        vehicle_id: usize,
        load: i64,
        capacity: i32,
    },
    /// A node is neither routed nor (for optional nodes) skipped.
    MissingNode { node: usize },
    /// A node is visited more than once across all routes.
    DuplicateVisit { node: usize },
    /// An optional node is both routed and recorded as skipped.
    VisitedAndSkipped { node: usize },
    /// A mandatory node is recorded as skipped.
    SkippedMandatory { node: usize },
    /// The depot appears among a route's visits.
    DepotInRoute { vehicle_id: usize },
    /// A node index outside the problem.
    UnknownNode { node: usize },
    /// The solution does not hold exactly one route per vehicle.
    RouteCountMismatch { routes: usize, vehicles: usize },
    /// Cached route distance or load disagrees with the recomputed value.
    StaleRouteMetrics { vehicle_id: usize },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationType,
}

impl Violation {
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution: one route per vehicle plus the skipped optional nodes.
///
/// Objective = total route distance + total skip penalty.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::new(0, vec![1, 2], 4, 10), Route::empty(1)], vec![3], 10);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.total_distance(), 4);
/// assert_eq!(sol.total_cost(), 14);
/// assert_eq!(sol.route_plan(), vec![(0, vec![0, 1, 2, 0]), (1, vec![0, 0])]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    skipped: Vec<usize>,
    skip_penalty: Cost,
}

impl Solution {
    /// Creates a solution. `skipped` is stored sorted.
    pub fn new(routes: Vec<Route>, mut skipped: Vec<usize>, skip_penalty: Cost) -> Self {
        skipped.sort_unstable();
        Self {
            routes,
            skipped,
            skip_penalty,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes, used or not. Equals the vehicle count.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes with at least one visit.
    pub fn num_used_routes(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Skipped optional node indices, ascending.
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    /// Sum of penalties of skipped nodes.
    pub fn skip_penalty(&self) -> Cost {
        self.skip_penalty
    }

    pub fn total_distance(&self) -> Cost {
        self.routes.iter().map(Route::total_distance).sum()
    }

    /// Routing distance plus skip penalties.
    pub fn total_cost(&self) -> Cost {
        self.total_distance() + self.skip_penalty
    }

    /// Total number of visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// `(vehicle_id, path)` pairs with the depot at both ends of every path.
    pub fn route_plan(&self) -> Vec<(usize, Vec<usize>)> {
        self.routes
            .iter()
            .map(|r| (r.vehicle_id(), r.path()))
            .collect()
    }
}
