//! Pass-based improvement engine.
//!
//! One pass runs 2-opt and Or-opt on every route, then relocate, swap and
//! the dropout handler across routes. Every applied move strictly lowers the
//! objective, so the engine always reaches a pass with no move. The
//! iteration budget and optional time limit are checked between passes.

use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{dropout_improve, or_opt_improve, relocate_improve, swap_improve, two_opt_improve};
use crate::distance::Cost;
use crate::evaluation::SolutionEvaluator;
use crate::models::{Problem, Solution};
use crate::solver::SolverConfig;

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// A full pass applied no move: the solution is a local optimum.
    Converged,
    /// The iteration budget or time limit stopped the search first.
    ///
    /// Reported whenever the budget runs out before a pass with no move,
    /// even if the last pass that ran would have been followed by a
    /// converged one. The solution is complete and valid either way, but
    /// may not be a local optimum.
    BudgetExhausted,
}

/// Number of moves applied per operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveCounts {
    /// Routes shortened by 2-opt.
    pub two_opt: usize,
    /// Routes shortened by Or-opt.
    pub or_opt: usize,
    pub relocate: usize,
    pub swap: usize,
    pub dropped: usize,
    pub reinserted: usize,
}

impl MoveCounts {
    pub fn total(&self) -> usize {
        self.two_opt + self.or_opt + self.relocate + self.swap + self.dropped + self.reinserted
    }
}

/// Outcome of [`LocalSearch::improve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub status: SearchStatus,
    /// Passes started.
    pub iterations: usize,
    pub moves: MoveCounts,
    pub initial_cost: Cost,
    pub final_cost: Cost,
    pub elapsed: Duration,
}

/// Improves a solution in place with best-improvement local search.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::constructive::nearest_feasible;
/// use u_cvrp::local_search::{LocalSearch, SearchStatus};
/// use u_cvrp::solver::SolverConfig;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 0.0, 10.0, 1),
///     Node::customer(2, 10.0, 0.0, 1),
///     Node::customer(3, 10.0, 10.0, 1),
///     Node::customer(4, 1.0, 0.0, 1),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(1, 10), DischargeMode::Disabled).unwrap();
/// let mut solution = nearest_feasible(&problem).unwrap();
/// let initial = solution.total_cost();
///
/// let report = LocalSearch::new(&problem, &SolverConfig::default()).improve(&mut solution);
/// assert_eq!(report.status, SearchStatus::Converged);
/// assert!(solution.total_cost() <= initial);
/// ```
pub struct LocalSearch<'a> {
    problem: &'a Problem,
    config: &'a SolverConfig,
}

impl<'a> LocalSearch<'a> {
    pub fn new(problem: &'a Problem, config: &'a SolverConfig) -> Self {
        Self { problem, config }
    }

    /// Runs passes until one applies no move or the budget runs out.
    pub fn improve(&self, solution: &mut Solution) -> SearchReport {
        let start = Instant::now();
        let evaluator = SolutionEvaluator::new(self.problem);
        let initial_cost = evaluator.objective(solution);

        let mut routes: Vec<Vec<usize>> = solution
            .routes()
            .iter()
            .map(|r| r.nodes().to_vec())
            .collect();
        let mut skipped = solution.skipped().to_vec();
        let mut moves = MoveCounts::default();
        let mut iterations = 0;

        let status = loop {
            if iterations >= self.config.max_iterations {
                warn!("local search stopped after {iterations} pass(es): iteration budget reached");
                break SearchStatus::BudgetExhausted;
            }
            if let Some(limit) = self.config.time_limit {
                if start.elapsed() >= limit {
                    warn!("local search stopped after {iterations} pass(es): time limit {limit:?} reached");
                    break SearchStatus::BudgetExhausted;
                }
            }

            iterations += 1;
            let before = moves.total();
            self.pass(&mut routes, &mut skipped, &mut moves);
            let applied = moves.total() - before;
            debug!("pass {iterations}: {applied} move(s)");

            if applied == 0 {
                break SearchStatus::Converged;
            }
        };

        *solution = evaluator.build_solution(routes, skipped);
        SearchReport {
            status,
            iterations,
            moves,
            initial_cost,
            final_cost: evaluator.objective(solution),
            elapsed: start.elapsed(),
        }
    }

    fn pass(&self, routes: &mut [Vec<usize>], skipped: &mut Vec<usize>, moves: &mut MoveCounts) {
        let distances = self.problem.distances();

        for route in routes.iter_mut() {
            let length = distances.route_length(route);
            let (improved, improved_length) = two_opt_improve(route, distances);
            let length = if improved_length < length {
                *route = improved;
                moves.two_opt += 1;
                improved_length
            } else {
                length
            };

            let (improved, improved_length) = or_opt_improve(route, distances);
            if improved_length < length {
                *route = improved;
                moves.or_opt += 1;
            }
        }

        moves.relocate += relocate_improve(routes, self.problem);
        moves.swap += swap_improve(routes, self.problem);

        let dropout = dropout_improve(routes, skipped, self.problem);
        moves.dropped += dropout.dropped;
        moves.reinserted += dropout.reinserted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_feasible;
    use crate::models::{DischargeMode, Fleet, Node};

    fn grid_problem(mode: DischargeMode) -> Problem {
        let nodes = vec![
            Node::depot(0, 5.0, 5.0),
            Node::customer(1, 0.0, 0.0, 4),
            Node::customer(2, 10.0, 0.0, 3),
            Node::customer(3, 0.0, 10.0, 5),
            Node::customer(4, 10.0, 10.0, 2),
            Node::customer(5, 2.0, 8.0, 4),
            Node::discharge_station(6, 40.0, 40.0, 1),
            Node::customer(7, 7.0, 1.0, 3),
        ];
        Problem::new(nodes, Fleet::new(3, 10), mode).expect("valid")
    }

    #[test]
    fn test_improve_does_not_worsen() {
        let p = grid_problem(DischargeMode::Disabled);
        let config = SolverConfig::default();
        let mut sol = nearest_feasible(&p).expect("feasible");
        let initial = sol.total_cost();
        let report = LocalSearch::new(&p, &config).improve(&mut sol);
        assert_eq!(report.initial_cost, initial);
        assert_eq!(report.final_cost, sol.total_cost());
        assert!(sol.total_cost() <= initial);
        assert_eq!(report.status, SearchStatus::Converged);
        assert!(SolutionEvaluator::new(&p).check(&sol).is_empty());
    }

    #[test]
    fn test_fixed_point() {
        let p = grid_problem(DischargeMode::enabled());
        let config = SolverConfig::default();
        let mut sol = nearest_feasible(&p).expect("feasible");
        LocalSearch::new(&p, &config).improve(&mut sol);
        let first = sol.clone();

        let report = LocalSearch::new(&p, &config).improve(&mut sol);
        assert_eq!(report.status, SearchStatus::Converged);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.moves.total(), 0);
        assert_eq!(sol, first);
    }

    #[test]
    fn test_far_station_dropped() {
        let p = grid_problem(DischargeMode::enabled());
        let config = SolverConfig::default();
        let mut sol = nearest_feasible(&p).expect("feasible");
        let report = LocalSearch::new(&p, &config).improve(&mut sol);
        assert_eq!(sol.skipped(), &[6]);
        assert!(report.moves.dropped >= 1);
        assert!(SolutionEvaluator::new(&p).check(&sol).is_empty());
    }

    #[test]
    fn test_budget_exhausted() {
        let p = grid_problem(DischargeMode::enabled());
        let config = SolverConfig::default().with_max_iterations(1);
        let mut sol = nearest_feasible(&p).expect("feasible");
        let report = LocalSearch::new(&p, &config).improve(&mut sol);
        // The first pass on a fresh construction always finds the dropout
        assert_eq!(report.iterations, 1);
        assert_eq!(report.status, SearchStatus::BudgetExhausted);
        assert!(SolutionEvaluator::new(&p).check(&sol).is_empty());
    }

    #[test]
    fn test_zero_time_limit_stops_before_first_pass() {
        let p = grid_problem(DischargeMode::Disabled);
        let config = SolverConfig::default().with_time_limit(Duration::ZERO);
        let mut sol = nearest_feasible(&p).expect("feasible");
        let before = sol.clone();
        let report = LocalSearch::new(&p, &config).improve(&mut sol);
        assert_eq!(report.status, SearchStatus::BudgetExhausted);
        assert_eq!(report.iterations, 0);
        assert_eq!(sol, before);
    }

    #[test]
    fn test_move_counts_total() {
        let m = MoveCounts {
            two_opt: 1,
            or_opt: 2,
            relocate: 3,
            swap: 4,
            dropped: 5,
            reinserted: 6,
        };
        assert_eq!(m.total(), 21);
    }
}
