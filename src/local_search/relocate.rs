//! Inter-route node relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each node from its current route to every insertion
//! position in every other route, including unused vehicles. The best move
//! that strictly reduces total distance and keeps the destination within
//! capacity is applied, repeatedly, until none remains.
//!
//! # Complexity
//!
//! O(n²) per scan, n = number of routed nodes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use log::trace;

use crate::distance::{Cost, DistanceMatrix};
use crate::models::{Problem, DEPOT};

/// A relocate move: move a node from one route to another.
#[derive(Debug, Clone, Copy)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: Cost,
}

/// Applies inter-route relocate improvement in place.
///
/// Returns the number of moves applied.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::local_search::relocate_improve;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 10.0, 0.0, 1),
///     Node::customer(2, 11.0, 0.0, 1),
///     Node::customer(3, -10.0, 0.0, 1),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(2, 10), DischargeMode::Disabled).unwrap();
///
/// // 2 sits on the wrong side of the depot
/// let mut routes = vec![vec![1], vec![3, 2]];
/// let length = |routes: &[Vec<usize>]| -> i64 {
///     routes.iter().map(|r| problem.distances().route_length(r)).sum()
/// };
/// let before = length(&routes);
/// assert!(relocate_improve(&mut routes, &problem) > 0);
/// assert_eq!(before - length(&routes), 20);
/// ```
pub fn relocate_improve(routes: &mut [Vec<usize>], problem: &Problem) -> usize {
    if routes.len() < 2 {
        return 0;
    }

    let mut moves = 0;
    while let Some(mv) = find_best_relocate(routes, problem) {
        let node = routes[mv.from_route].remove(mv.from_pos);
        routes[mv.to_route].insert(mv.to_pos, node);
        trace!(
            "relocate: node {node} route {} -> {} at {} delta {}",
            mv.from_route,
            mv.to_route,
            mv.to_pos,
            mv.delta
        );
        moves += 1;
    }
    moves
}

/// Finds the best improving relocate move across all route pairs.
fn find_best_relocate(routes: &[Vec<usize>], problem: &Problem) -> Option<RelocateMove> {
    let distances = problem.distances();
    let loads: Vec<i64> = routes.iter().map(|r| problem.load(r)).collect();
    let mut best: Option<RelocateMove> = None;

    for (from_r, from_route) in routes.iter().enumerate() {
        for (from_pos, &node) in from_route.iter().enumerate() {
            let removal_delta = removal_cost(from_route, from_pos, distances);

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r || !problem.fits(loads[to_r], node) {
                    continue;
                }

                for to_pos in 0..=to_route.len() {
                    let delta = removal_delta + insertion_cost(to_route, to_pos, node, distances);
                    if delta < 0 && best.is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_route: from_r,
                            from_pos,
                            to_route: to_r,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Distance change from removing the node at `pos` (non-positive on metric
/// instances).
pub(crate) fn removal_cost(route: &[usize], pos: usize, distances: &DistanceMatrix) -> Cost {
    let prev = if pos == 0 { DEPOT } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        DEPOT
    } else {
        route[pos + 1]
    };
    let node = route[pos];

    // Old: prev → node → next
    // New: prev → next
    distances.get(prev, next) - distances.get(prev, node) - distances.get(node, next)
}

/// Distance change from inserting `node` before `route[pos]`
/// (`pos == route.len()` appends).
pub(crate) fn insertion_cost(
    route: &[usize],
    pos: usize,
    node: usize,
    distances: &DistanceMatrix,
) -> Cost {
    let prev = if pos == 0 { DEPOT } else { route[pos - 1] };
    let next = if pos == route.len() {
        DEPOT
    } else {
        route[pos]
    };

    // Old: prev → next
    // New: prev → node → next
    distances.get(prev, node) + distances.get(node, next) - distances.get(prev, next)
}
