//! Nearest-feasible constructive heuristic.
//!
//! Builds routes one vehicle at a time: starting from the depot, always
//! extend the route to the nearest unassigned node whose demand still fits.
//! When nothing fits, close the route and move on to the next vehicle.
//!
//! If that leaves a mandatory node unassigned while optional nodes exist,
//! construction runs once more with every optional node skipped up front,
//! so stations never take the capacity a customer needs.
//!
//! # Complexity
//!
//! O(n²) where n = number of nodes.

use log::{debug, trace};

use crate::error::InfeasibleError;
use crate::evaluation::SolutionEvaluator;
use crate::models::{Problem, Solution, DEPOT};

/// Constructs an initial solution using the nearest-feasible rule.
///
/// Ties on distance go to the lowest node index. Optional nodes are ordinary
/// candidates here; any left over once the fleet is exhausted are recorded
/// as skipped. Unused vehicles get empty routes.
///
/// # Errors
///
/// Returns [`InfeasibleError`] if a mandatory node is left unassigned even
/// with every optional node skipped.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::constructive::nearest_feasible;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 1.0, 0.0, 10),
///     Node::customer(2, 2.0, 0.0, 10),
///     Node::customer(3, 3.0, 0.0, 10),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(2, 20), DischargeMode::Disabled).unwrap();
///
/// let solution = nearest_feasible(&problem).unwrap();
/// assert_eq!(solution.route_plan(), vec![(0, vec![0, 1, 2, 0]), (1, vec![0, 3, 0])]);
/// ```
pub fn nearest_feasible(problem: &Problem) -> Result<Solution, InfeasibleError> {
    let (mut routes, mut leftover) = extend_routes(problem, true);

    if leftover.iter().any(|&i| !problem.is_optional(i)) && !problem.optional_nodes().is_empty() {
        debug!("construction left mandatory nodes unassigned, retrying with optional nodes skipped");
        (routes, leftover) = extend_routes(problem, false);
    }

    let (skipped, unassigned): (Vec<usize>, Vec<usize>) =
        leftover.into_iter().partition(|&i| problem.is_optional(i));

    if !unassigned.is_empty() {
        debug!(
            "construction infeasible: {} mandatory node(s) unassigned",
            unassigned.len()
        );
        return Err(InfeasibleError {
            unassigned,
            vehicle_count: problem.vehicle_count(),
            capacity: problem.capacity(),
        });
    }

    Ok(SolutionEvaluator::new(problem).build_solution(routes, skipped))
}

/// Runs the nearest-feasible rule over the fleet and returns the routes
/// plus every node left unassigned, ascending.
fn extend_routes(problem: &Problem, include_optional: bool) -> (Vec<Vec<usize>>, Vec<usize>) {
    let n = problem.node_count();
    let distances = problem.distances();

    let mut assigned = vec![false; n];
    assigned[DEPOT] = true;
    if !include_optional {
        for i in problem.optional_nodes() {
            assigned[i] = true;
        }
    }
    let mut routes = Vec::with_capacity(problem.vehicle_count());

    for vehicle_id in 0..problem.vehicle_count() {
        let mut route = Vec::new();
        let mut current = DEPOT;
        let mut load: i64 = 0;

        loop {
            let candidates: Vec<usize> = (1..n)
                .filter(|&i| !assigned[i] && problem.fits(load, i))
                .collect();
            let Some(next) = distances.nearest_neighbor(current, &candidates) else {
                break;
            };
            trace!(
                "vehicle {vehicle_id}: {current} -> {next} (distance {})",
                distances.get(current, next)
            );
            assigned[next] = true;
            load += i64::from(problem.demand(next));
            route.push(next);
            current = next;
        }

        debug!(
            "vehicle {vehicle_id}: {} visit(s), load {load}/{}",
            route.len(),
            problem.capacity()
        );
        routes.push(route);
    }

    let mut leftover: Vec<usize> = (1..n).filter(|&i| !assigned[i]).collect();
    if !include_optional {
        leftover.extend(problem.optional_nodes());
        leftover.sort_unstable();
    }
    (routes, leftover)
}
