use proptest::prelude::*;
use u_cvrp::constructive::nearest_feasible;
use u_cvrp::distance::Cost;
use u_cvrp::evaluation::SolutionEvaluator;
use u_cvrp::local_search::LocalSearch;
use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
use u_cvrp::solver::{solve, SolverConfig};

prop_compose! {
    fn generate_node(id: usize)
    (
     x in 0..100i32,
     y in 0..100i32,
     demand in 0..10i32,
     is_station in prop::bool::weighted(0.25),
    ) -> Node {
        if is_station {
            Node::discharge_station(id, x as f64, y as f64, demand)
        } else {
            Node::customer(id, x as f64, y as f64, demand)
        }
    }
}

fn generate_nodes() -> impl Strategy<Value = Vec<Node>> {
    (1..20usize).prop_flat_map(|n| {
        (1..=n)
            .map(generate_node)
            .collect::<Vec<_>>()
            .prop_map(|mut nodes| {
                nodes.insert(0, Node::depot(0, 50.0, 50.0));
                nodes
            })
    })
}

fn generate_mode() -> impl Strategy<Value = DischargeMode> {
    prop_oneof![
        Just(DischargeMode::Disabled),
        (0..60 as Cost).prop_map(DischargeMode::with_penalty),
    ]
}

prop_compose! {
    fn generate_problem()
    (
     nodes in generate_nodes(),
     vehicles in 1..5usize,
     capacity in 10..60i32,
     mode in generate_mode(),
    ) -> Problem {
        Problem::new(nodes, Fleet::new(vehicles, capacity), mode).expect("generated problem is valid")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solved_routes_respect_invariants(problem in generate_problem()) {
        let Ok(outcome) = solve(&problem, &SolverConfig::default()) else {
            // only a fleet shortage may fail
            prop_assert!(nearest_feasible(&problem).is_err());
            return Ok(());
        };
        let solution = &outcome.solution;

        prop_assert!(SolutionEvaluator::new(&problem).check(solution).is_empty());
        prop_assert_eq!(solution.num_routes(), problem.vehicle_count());

        let mut seen = vec![0usize; problem.node_count()];
        for route in solution.routes() {
            prop_assert!(route.total_load() <= i64::from(problem.capacity()));
            for &node in route.nodes() {
                seen[node] += 1;
            }
        }
        for &node in solution.skipped() {
            prop_assert!(problem.is_optional(node));
            prop_assert!(problem.penalty(node) > 0);
            seen[node] += 1;
        }
        if problem.discharge_mode() == DischargeMode::with_penalty(0) {
            prop_assert!(solution.skipped().is_empty());
        }
        prop_assert!(seen.iter().skip(1).all(|&count| count == 1));
        prop_assert_eq!(
            solution.total_cost(),
            solution.total_distance() + solution.skip_penalty()
        );
    }

    #[test]
    fn local_search_never_worsens_construction(problem in generate_problem()) {
        let Ok(mut solution) = nearest_feasible(&problem) else {
            return Ok(());
        };
        let construction = solution.total_cost();
        let config = SolverConfig::default();
        let report = LocalSearch::new(&problem, &config).improve(&mut solution);

        prop_assert_eq!(report.initial_cost, construction);
        prop_assert_eq!(report.final_cost, solution.total_cost());
        prop_assert!(solution.total_cost() <= construction);
    }

    #[test]
    fn solving_is_deterministic(problem in generate_problem()) {
        let config = SolverConfig::default();
        let first = solve(&problem, &config).map(|o| o.solution);
        let second = solve(&problem, &config).map(|o| o.solution);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "runs disagree on feasibility"),
        }
    }

    #[test]
    fn converged_solution_is_a_fixed_point(problem in generate_problem()) {
        let config = SolverConfig::default();
        let Ok(outcome) = solve(&problem, &config) else {
            return Ok(());
        };
        prop_assume!(outcome.is_converged());

        let mut again = outcome.solution.clone();
        let report = LocalSearch::new(&problem, &config).improve(&mut again);
        prop_assert_eq!(report.moves.total(), 0);
        prop_assert_eq!(again, outcome.solution);
    }
}
