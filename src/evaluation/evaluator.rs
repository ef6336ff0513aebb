//! Solution evaluator that computes route metrics and checks invariants.

use crate::distance::Cost;
use crate::models::{Problem, Route, Solution, Violation, ViolationType, DEPOT};

/// Builds routes and solutions from node sequences and checks every
/// solution invariant: capacity, coverage of mandatory and optional nodes,
/// and one route per vehicle.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
/// use u_cvrp::evaluation::SolutionEvaluator;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::customer(1, 3.0, 4.0, 10),
///     Node::customer(2, 6.0, 8.0, 20),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(1, 100), DischargeMode::Disabled).unwrap();
///
/// let evaluator = SolutionEvaluator::new(&problem);
/// let solution = evaluator.build_solution(vec![vec![1, 2]], vec![]);
/// assert_eq!(solution.total_distance(), 20);
/// assert!(evaluator.check(&solution).is_empty());
/// ```
pub struct SolutionEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> SolutionEvaluator<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Builds a route from a node sequence, computing distance and load.
    pub fn build_route(&self, vehicle_id: usize, nodes: Vec<usize>) -> Route {
        let distance = self.problem.distances().route_length(&nodes);
        let load = self.problem.load(&nodes);
        Route::new(vehicle_id, nodes, distance, load)
    }

    /// Builds a solution with route `k` assigned to vehicle `k`.
    pub fn build_solution(&self, routes: Vec<Vec<usize>>, skipped: Vec<usize>) -> Solution {
        let skip_penalty = self.skip_penalty(&skipped);
        let routes = routes
            .into_iter()
            .enumerate()
            .map(|(vehicle_id, nodes)| self.build_route(vehicle_id, nodes))
            .collect();
        Solution::new(routes, skipped, skip_penalty)
    }

    /// Sum of penalties for `skipped`.
    pub fn skip_penalty(&self, skipped: &[usize]) -> Cost {
        skipped.iter().map(|&i| self.problem.penalty(i)).sum()
    }

    /// Recomputes the objective from scratch, ignoring cached route metrics.
    pub fn objective(&self, solution: &Solution) -> Cost {
        let distance: Cost = solution
            .routes()
            .iter()
            .map(|r| self.problem.distances().route_length(r.nodes()))
            .sum();
        distance + self.skip_penalty(solution.skipped())
    }

    /// Returns every invariant the solution violates; empty if it is valid.
    pub fn check(&self, solution: &Solution) -> Vec<Violation> {
        let n = self.problem.node_count();
        let capacity = self.problem.capacity();
        let mut violations = Vec::new();
        let mut visits = vec![0usize; n];

        if solution.num_routes() != self.problem.vehicle_count() {
            violations.push(Violation::new(ViolationType::RouteCountMismatch {
                routes: solution.num_routes(),
                vehicles: self.problem.vehicle_count(),
            }));
        }

        for route in solution.routes() {
            let vehicle_id = route.vehicle_id();
            let mut known = true;
            for &node in route.nodes() {
                if node >= n {
                    violations.push(Violation::new(ViolationType::UnknownNode { node }));
                    known = false;
                } else if node == DEPOT {
                    violations.push(Violation::new(ViolationType::DepotInRoute { vehicle_id }));
                } else {
                    visits[node] += 1;
                }
            }
            if !known {
                continue;
            }

            let load = self.problem.load(route.nodes());
            if load > i64::from(capacity) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle_id,
                    load,
                    capacity,
                }));
            }
            let distance = self.problem.distances().route_length(route.nodes());
            if load != route.total_load() || distance != route.total_distance() {
                violations.push(Violation::new(ViolationType::StaleRouteMetrics { vehicle_id }));
            }
        }

        let mut skipped = vec![false; n];
        for &node in solution.skipped() {
            if node >= n || node == DEPOT {
                violations.push(Violation::new(ViolationType::UnknownNode { node }));
                continue;
            }
            if !self.problem.is_optional(node) {
                violations.push(Violation::new(ViolationType::SkippedMandatory { node }));
            }
            if skipped[node] {
                violations.push(Violation::new(ViolationType::DuplicateVisit { node }));
            }
            skipped[node] = true;
        }

        for node in 1..n {
            match (visits[node], skipped[node]) {
                (0, false) => {
                    violations.push(Violation::new(ViolationType::MissingNode { node }));
                }
                (0, true) | (1, false) => {}
                (1, true) => {
                    violations.push(Violation::new(ViolationType::VisitedAndSkipped { node }));
                }
                _ => {
                    violations.push(Violation::new(ViolationType::DuplicateVisit { node }));
                }
            }
        }

        violations
    }
}
