//! Penalty-based dropout and reinsertion of optional nodes.
//!
//! # Algorithm
//!
//! Two move kinds compete on the same objective (distance + penalties):
//!
//! - **Drop** a routed optional node: `delta = penalty - saved`, where
//!   `saved = d(prev, node) + d(node, next) - d(prev, next)` is the detour
//!   it causes.
//! - **Reinsert** a skipped node at its cheapest feasible position:
//!   `delta = insertion - penalty`.
//!
//! The most negative delta is applied until no move improves. Nothing
//! happens when discharge mode is disabled, since no node is optional then.

use log::trace;

use super::relocate::{insertion_cost, removal_cost};
use crate::distance::Cost;
use crate::models::Problem;

/// Counts of moves applied by [`dropout_improve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropoutMoves {
    pub dropped: usize,
    pub reinserted: usize,
}

#[derive(Debug, Clone, Copy)]
enum DropoutMove {
    Drop {
        route: usize,
        pos: usize,
        delta: Cost,
    },
    Reinsert {
        skipped_pos: usize,
        route: usize,
        pos: usize,
        delta: Cost,
    },
}

impl DropoutMove {
    fn delta(&self) -> Cost {
        match *self {
            Self::Drop { delta, .. } | Self::Reinsert { delta, .. } => delta,
        }
    }
}

/// Drops and reinserts optional nodes in place.
///
/// `skipped` is kept sorted ascending.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::local_search::dropout_improve;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 1.0, 0.0, 1),
///     Node::discharge_station(2, 50.0, 0.0, 1),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(1, 10), DischargeMode::with_penalty(10)).unwrap();
///
/// let mut routes = vec![vec![1, 2]];
/// let mut skipped = vec![];
/// let moves = dropout_improve(&mut routes, &mut skipped, &problem);
/// assert_eq!(moves.dropped, 1);
/// assert_eq!(routes, vec![vec![1]]);
/// assert_eq!(skipped, vec![2]);
/// ```
pub fn dropout_improve(
    routes: &mut [Vec<usize>],
    skipped: &mut Vec<usize>,
    problem: &Problem,
) -> DropoutMoves {
    let mut moves = DropoutMoves::default();
    if !problem.discharge_mode().is_enabled() {
        return moves;
    }

    while let Some(mv) = find_best_dropout(routes, skipped, problem) {
        match mv {
            DropoutMove::Drop { route, pos, delta } => {
                let node = routes[route].remove(pos);
                let at = skipped.binary_search(&node).unwrap_or_else(|i| i);
                skipped.insert(at, node);
                trace!("dropout: skip node {node} from route {route} delta {delta}");
                moves.dropped += 1;
            }
            DropoutMove::Reinsert {
                skipped_pos,
                route,
                pos,
                delta,
            } => {
                let node = skipped.remove(skipped_pos);
                routes[route].insert(pos, node);
                trace!("dropout: reinsert node {node} into route {route} at {pos} delta {delta}");
                moves.reinserted += 1;
            }
        }
    }
    moves
}

fn find_best_dropout(
    routes: &[Vec<usize>],
    skipped: &[usize],
    problem: &Problem,
) -> Option<DropoutMove> {
    let distances = problem.distances();
    let mut best: Option<DropoutMove> = None;
    let mut consider = |mv: DropoutMove| {
        if mv.delta() < 0 && best.is_none_or(|b| mv.delta() < b.delta()) {
            best = Some(mv);
        }
    };

    for (r, route) in routes.iter().enumerate() {
        for (pos, &node) in route.iter().enumerate() {
            if !problem.is_optional(node) {
                continue;
            }
            // removal_cost is the (negative) distance saved
            let delta = problem.penalty(node) + removal_cost(route, pos, distances);
            consider(DropoutMove::Drop {
                route: r,
                pos,
                delta,
            });
        }
    }

    let loads: Vec<i64> = routes.iter().map(|r| problem.load(r)).collect();
    for (skipped_pos, &node) in skipped.iter().enumerate() {
        let penalty = problem.penalty(node);
        for (r, route) in routes.iter().enumerate() {
            if !problem.fits(loads[r], node) {
                continue;
            }
            for pos in 0..=route.len() {
                let delta = insertion_cost(route, pos, node, distances) - penalty;
                consider(DropoutMove::Reinsert {
                    skipped_pos,
                    route: r,
                    pos,
                    delta,
                });
            }
        }
    }

    best
}
