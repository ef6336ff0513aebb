//! Route metrics and solution invariant checking.

mod evaluator;

pub use evaluator::SolutionEvaluator;
