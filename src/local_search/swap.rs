//! Inter-route node swap operator.
//!
//! # Algorithm
//!
//! For every pair of nodes (a, b) on two different routes, compute the
//! distance change from putting `b` where `a` was and `a` where `b` was:
//!
//! ```text
//! delta = d(pa, b) + d(b, na) - d(pa, a) - d(a, na)
//!       + d(pb, a) + d(a, nb) - d(pb, b) - d(b, nb)
//! ```
//!
//! Both routes must stay within capacity after the exchange. The best
//! strictly improving swap is applied until none remains.
//!
//! # Complexity
//!
//! O(n²) per scan, n = number of routed nodes.

use log::trace;

use crate::distance::{Cost, DistanceMatrix};
use crate::models::{Problem, DEPOT};

#[derive(Debug, Clone, Copy)]
struct SwapMove {
    route_a: usize,
    pos_a: usize,
    route_b: usize,
    pos_b: usize,
    delta: Cost,
}

/// Applies inter-route swap improvement in place.
///
/// Returns the number of swaps applied.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::local_search::swap_improve;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 10.0, 0.0, 5),
///     Node::customer(2, -10.0, 1.0, 5),
///     Node::customer(3, 10.0, 1.0, 5),
///     Node::customer(4, -10.0, 0.0, 5),
/// ];
/// // Full vehicles: only a swap can untangle the two routes
/// let problem = Problem::new(nodes, Fleet::new(2, 10), DischargeMode::Disabled).unwrap();
///
/// let mut routes = vec![vec![1, 2], vec![3, 4]];
/// assert_eq!(swap_improve(&mut routes, &problem), 1);
/// assert_eq!(routes, vec![vec![4, 2], vec![3, 1]]);
/// ```
pub fn swap_improve(routes: &mut [Vec<usize>], problem: &Problem) -> usize {
    if routes.len() < 2 {
        return 0;
    }

    let mut moves = 0;
    while let Some(mv) = find_best_swap(routes, problem) {
        let a = routes[mv.route_a][mv.pos_a];
        let b = routes[mv.route_b][mv.pos_b];
        routes[mv.route_a][mv.pos_a] = b;
        routes[mv.route_b][mv.pos_b] = a;
        trace!(
            "swap: node {a} (route {}) <-> node {b} (route {}) delta {}",
            mv.route_a,
            mv.route_b,
            mv.delta
        );
        moves += 1;
    }
    moves
}

fn find_best_swap(routes: &[Vec<usize>], problem: &Problem) -> Option<SwapMove> {
    let distances = problem.distances();
    let capacity = i64::from(problem.capacity());
    let loads: Vec<i64> = routes.iter().map(|r| problem.load(r)).collect();
    let mut best: Option<SwapMove> = None;

    for route_a in 0..routes.len() {
        for route_b in (route_a + 1)..routes.len() {
            for (pos_a, &a) in routes[route_a].iter().enumerate() {
                for (pos_b, &b) in routes[route_b].iter().enumerate() {
                    let shift = i64::from(problem.demand(b)) - i64::from(problem.demand(a));
                    if loads[route_a] + shift > capacity || loads[route_b] - shift > capacity {
                        continue;
                    }

                    let delta = replacement_cost(&routes[route_a], pos_a, b, distances)
                        + replacement_cost(&routes[route_b], pos_b, a, distances);
                    if delta < 0 && best.is_none_or(|m| delta < m.delta) {
                        best = Some(SwapMove {
                            route_a,
                            pos_a,
                            route_b,
                            pos_b,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Distance change from replacing `route[pos]` with `node`.
fn replacement_cost(route: &[usize], pos: usize, node: usize, distances: &DistanceMatrix) -> Cost {
    let prev = if pos == 0 { DEPOT } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        DEPOT
    } else {
        route[pos + 1]
    };
    let old = route[pos];

    distances.get(prev, node) + distances.get(node, next)
        - distances.get(prev, old)
        - distances.get(old, next)
}
