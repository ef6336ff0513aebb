//! Solve pipeline: construction, improvement, final invariant check.

use log::{error, info};

use super::{Plan, SolverConfig};
use crate::constructive::nearest_feasible;
use crate::error::{Error, Result};
use crate::evaluation::SolutionEvaluator;
use crate::local_search::{LocalSearch, SearchReport, SearchStatus};
use crate::models::{DischargeMode, Fleet, NodeRecord, Problem, Solution};

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub solution: Solution,
    pub report: SearchReport,
}

impl SolveOutcome {
    /// `true` if the local search reached a local optimum.
    pub fn is_converged(&self) -> bool {
        self.report.status == SearchStatus::Converged
    }

    pub fn plan(&self, problem: &Problem) -> Plan {
        Plan::new(problem, &self.solution, self.report.status)
    }
}

/// Solves a validated problem.
///
/// Each call owns its solution; `problem` is only read, so one instance can
/// be solved from several threads at once.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `config` does not validate.
/// - [`Error::Infeasible`] if the fleet cannot carry every mandatory node.
/// - [`Error::InvariantViolated`] if the final solution breaks an invariant;
///   such a solution is never returned.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::solver::{solve, SolverConfig};
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 1.0, 0.0, 5),
///     Node::customer(2, 2.0, 0.0, 5),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(1, 10), DischargeMode::Disabled).unwrap();
///
/// let outcome = solve(&problem, &SolverConfig::default()).unwrap();
/// assert!(outcome.is_converged());
/// assert_eq!(outcome.solution.route_plan(), vec![(0, vec![0, 1, 2, 0])]);
/// assert_eq!(outcome.solution.total_cost(), 4);
/// ```
pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<SolveOutcome> {
    config.validate().map_err(Error::InvalidConfig)?;
    info!(
        "solving {} node(s) with {} vehicle(s) of capacity {}, discharge mode {:?}",
        problem.node_count(),
        problem.vehicle_count(),
        problem.capacity(),
        problem.discharge_mode()
    );

    let mut solution = nearest_feasible(problem)?;
    info!(
        "construction: cost {} ({} route(s) used, {} skipped)",
        solution.total_cost(),
        solution.num_used_routes(),
        solution.skipped().len()
    );

    let report = LocalSearch::new(problem, config).improve(&mut solution);

    let violations = SolutionEvaluator::new(problem).check(&solution);
    if !violations.is_empty() {
        error!("solution violates invariants: {violations:?}");
        return Err(Error::InvariantViolated(violations));
    }

    info!(
        "local search {:?} after {} pass(es): cost {} -> {} ({} move(s), {:?})",
        report.status,
        report.iterations,
        report.initial_cost,
        report.final_cost,
        report.moves.total(),
        report.elapsed
    );
    Ok(SolveOutcome { solution, report })
}

/// Validates table rows into a problem and solves it.
pub fn solve_records(
    records: &[NodeRecord],
    fleet: Fleet,
    discharge_mode: DischargeMode,
    config: &SolverConfig,
) -> Result<(Problem, SolveOutcome)> {
    let problem = Problem::from_records(records, fleet, discharge_mode)?;
    let outcome = solve(&problem, config)?;
    Ok((problem, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::Node;

    #[test]
    fn test_solve_invalid_config() {
        let nodes = vec![Node::depot(0, 0.0, 0.0), Node::customer(1, 1.0, 0.0, 1)];
        let p = Problem::new(nodes, Fleet::new(1, 10), DischargeMode::Disabled).expect("valid");
        let config = SolverConfig::default().with_max_iterations(0);
        assert!(matches!(solve(&p, &config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_solve_infeasible() {
        let nodes = vec![Node::depot(0, 0.0, 0.0), Node::customer(1, 1.0, 0.0, 11)];
        let p = Problem::new(nodes, Fleet::new(3, 10), DischargeMode::Disabled).expect("valid");
        let err = solve(&p, &SolverConfig::default()).expect_err("infeasible");
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_solve_records() {
        let rows = vec![
            NodeRecord::new(7, 0.0, 0.0, 0, "Depot"),
            NodeRecord::new(8, 3.0, 4.0, 2, "Customer"),
        ];
        let (problem, outcome) = solve_records(
            &rows,
            Fleet::new(1, 5),
            DischargeMode::Disabled,
            &SolverConfig::default(),
        )
        .expect("solved");
        let plan = outcome.plan(&problem);
        assert_eq!(plan.routes[0].node_ids, vec![7, 8, 7]);
        assert_eq!(plan.total_cost, 10);
    }

    #[test]
    fn test_solve_records_validation() {
        let rows = vec![NodeRecord::new(1, 0.0, 0.0, 0, "Customer")];
        let err = solve_records(
            &rows,
            Fleet::new(1, 5),
            DischargeMode::Disabled,
            &SolverConfig::default(),
        )
        .expect_err("no depot");
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingDepot)
        ));
    }
}
