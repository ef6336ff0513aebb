//! Route type.

use super::DEPOT;
use crate::distance::Cost;

/// An ordered sequence of node visits assigned to a single vehicle.
///
/// A route starts and ends at the depot; the depot is not stored in
/// `nodes`. Distance and load are computed by
/// [`SolutionEvaluator`](crate::evaluation::SolutionEvaluator).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Route;
///
/// let route = Route::new(0, vec![3, 1], 12, 7);
/// assert_eq!(route.path(), vec![0, 3, 1, 0]);
/// assert_eq!(route.len(), 2);
///
/// let unused = Route::empty(1);
/// assert_eq!(unused.path(), vec![0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    nodes: Vec<usize>,
    total_distance: Cost,
    total_load: i64,
}

impl Route {
    pub fn new(vehicle_id: usize, nodes: Vec<usize>, total_distance: Cost, total_load: i64) -> Self {
        Self {
            vehicle_id,
            nodes,
            total_distance,
            total_load,
        }
    }

    /// A route for an unused vehicle.
    pub fn empty(vehicle_id: usize) -> Self {
        Self::new(vehicle_id, Vec::new(), 0, 0)
    }

    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Visited node indices in order, excluding the depot.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Full path with the depot at both ends.
    pub fn path(&self) -> Vec<usize> {
        std::iter::once(DEPOT)
            .chain(self.nodes.iter().copied())
            .chain(std::iter::once(DEPOT))
            .collect()
    }

    /// Number of visits (excluding depot).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total_distance(&self) -> Cost {
        self.total_distance
    }

    pub fn total_load(&self) -> i64 {
        self.total_load
    }
}
