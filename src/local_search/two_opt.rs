//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions (i, j) in a route, compute the change in
//! distance from reversing the segment between them:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) - d(prev_i, r[i]) - d(r[j], next_j)
//! ```
//!
//! The most negative delta is applied and the scan repeats until no
//! reversal shortens the route (best-improvement strategy). Reversal never
//! changes the route load.
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::trace;

use crate::distance::{Cost, DistanceMatrix};
use crate::models::DEPOT;

/// Applies 2-opt improvement to a single route (customer indices, depot
/// excluded).
///
/// Returns the improved sequence and its total distance.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::local_search::two_opt_improve;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]).unwrap();
///
/// let (improved, dist) = two_opt_improve(&[2, 1, 3], &dm);
/// assert_eq!(improved, vec![1, 2, 3]);
/// assert_eq!(dist, 6);
/// ```
pub fn two_opt_improve(route: &[usize], distances: &DistanceMatrix) -> (Vec<usize>, Cost) {
    let mut current = route.to_vec();

    while let Some((i, j, delta)) = best_two_opt(&current, distances) {
        trace!("2-opt: reverse [{i}..={j}] delta {delta}");
        current[i..=j].reverse();
    }

    let dist = distances.route_length(&current);
    (current, dist)
}

/// Finds the best improving reversal, or `None` if the route is 2-optimal.
fn best_two_opt(route: &[usize], distances: &DistanceMatrix) -> Option<(usize, usize, Cost)> {
    let n = route.len();
    let mut best: Option<(usize, usize, Cost)> = None;

    for i in 0..n.saturating_sub(1) {
        for j in i + 1..n {
            let delta = two_opt_delta(route, distances, i, j);
            if delta < 0 && best.is_none_or(|(_, _, b)| delta < b) {
                best = Some((i, j, delta));
            }
        }
    }

    best
}

/// Computes the distance change from reversing `route[i..=j]`.
///
/// Before: ...-prev_i - route[i] - ... - route[j] - next_j-...
/// After:  ...-prev_i - route[j] - ... - route[i] - next_j-...
fn two_opt_delta(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> Cost {
    let prev_i = if i == 0 { DEPOT } else { route[i - 1] };
    let next_j = if j == route.len() - 1 {
        DEPOT
    } else {
        route[j + 1]
    };

    let old_cost = distances.get(prev_i, route[i]) + distances.get(route[j], next_j);
    let new_cost = distances.get(prev_i, route[j]) + distances.get(route[i], next_j);

    new_cost - old_cost
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> DistanceMatrix {
        DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
            .expect("valid")
    }

    #[test]
    fn test_2opt_already_optimal() {
        let (improved, dist) = two_opt_improve(&[1, 2, 3], &line());
        assert_eq!(improved, vec![1, 2, 3]);
        assert_eq!(dist, 6);
    }

    #[test]
    fn test_2opt_reverses_crossing() {
        // Square corners visited in crossing order
        let dm = DistanceMatrix::from_points(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 0.0),
            (10.0, 10.0),
        ])
        .expect("valid");
        // 0→1→2→3→0 = 10 + 14 + 10 + 14 = 48
        assert_eq!(dm.route_length(&[1, 2, 3]), 48);
        let (improved, dist) = two_opt_improve(&[1, 2, 3], &dm);
        assert_eq!(dist, 40);
        assert_eq!(dm.route_length(&improved), 40);
    }

    #[test]
    fn test_2opt_empty_and_single() {
        let dm = line();
        assert_eq!(two_opt_improve(&[], &dm), (vec![], 0));
        assert_eq!(two_opt_improve(&[2], &dm), (vec![2], 4));
    }

    #[test]
    fn test_delta_matches_recomputation() {
        let dm = DistanceMatrix::from_points(&[
            (5.0, 5.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ])
        .expect("valid");
        let route = vec![1, 4, 2, 3];
        let before = dm.route_length(&route);
        for i in 0..route.len() - 1 {
            for j in i + 1..route.len() {
                let mut r = route.clone();
                r[i..=j].reverse();
                assert_eq!(dm.route_length(&r) - before, two_opt_delta(&route, &dm, i, j));
            }
        }
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let dm = DistanceMatrix::from_points(&[
            (5.0, 5.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ])
        .expect("valid");
        let initial = [1, 4, 2, 3];
        let (_, improved) = two_opt_improve(&initial, &dm);
        assert!(improved <= dm.route_length(&initial));
    }
}
