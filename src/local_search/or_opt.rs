//! Intra-route Or-opt improvement.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive customers to a different
//! position within the same route. For every segment and target position,
//! computes the exact cost change from removing the segment and reinserting
//! it there. The best move is applied until none improves.
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use log::trace;

use crate::distance::{Cost, DistanceMatrix};
use crate::models::DEPOT;

const MAX_SEGMENT: usize = 3;

#[derive(Debug, Clone, Copy)]
struct OrOptMove {
    from: usize,
    seg_len: usize,
    to: usize,
    delta: Cost,
}

/// Applies Or-opt improvement to a single route.
///
/// Returns the improved sequence and its total distance.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::local_search::or_opt_improve;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]).unwrap();
///
/// // 0→2→1→3→0 = 2 + 1 + 2 + 3
/// let (improved, dist) = or_opt_improve(&[2, 1, 3], &dm);
/// assert_eq!(improved, vec![1, 2, 3]);
/// assert_eq!(dist, 6);
/// ```
pub fn or_opt_improve(route: &[usize], distances: &DistanceMatrix) -> (Vec<usize>, Cost) {
    let mut current = route.to_vec();

    while let Some(mv) = best_or_opt(&current, distances) {
        trace!(
            "or-opt: move [{}..{}) to {} delta {}",
            mv.from,
            mv.from + mv.seg_len,
            mv.to,
            mv.delta
        );
        let segment: Vec<usize> = current.drain(mv.from..mv.from + mv.seg_len).collect();
        let insert_pos = if mv.to > mv.from {
            mv.to - mv.seg_len
        } else {
            mv.to
        };
        current.splice(insert_pos..insert_pos, segment);
    }

    let dist = distances.route_length(&current);
    (current, dist)
}

/// Finds the best improving segment move, or `None`.
///
/// `to` indexes the gap before `route[to]` in the original route
/// (`to == route.len()` is the gap before the closing depot).
fn best_or_opt(route: &[usize], distances: &DistanceMatrix) -> Option<OrOptMove> {
    let n = route.len();
    let at = |pos: usize| if pos < n { route[pos] } else { DEPOT };
    let before = |pos: usize| if pos == 0 { DEPOT } else { route[pos - 1] };
    let mut best: Option<OrOptMove> = None;

    for seg_len in 1..=MAX_SEGMENT.min(n.saturating_sub(1)) {
        for from in 0..=(n - seg_len) {
            let prev = before(from);
            let after = at(from + seg_len);
            let seg_first = route[from];
            let seg_last = route[from + seg_len - 1];

            let removal_gain = distances.get(prev, seg_first) + distances.get(seg_last, after)
                - distances.get(prev, after);

            for to in 0..=n {
                if to >= from && to <= from + seg_len {
                    continue;
                }
                let ins_prev = before(to);
                let ins_next = at(to);
                let insertion_cost = distances.get(ins_prev, seg_first)
                    + distances.get(seg_last, ins_next)
                    - distances.get(ins_prev, ins_next);

                let delta = insertion_cost - removal_gain;
                if delta < 0 && best.is_none_or(|b| delta < b.delta) {
                    best = Some(OrOptMove {
                        from,
                        seg_len,
                        to,
                        delta,
                    });
                }
            }
        }
    }

    best
}
