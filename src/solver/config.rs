//! Solver configuration.

use std::time::Duration;

/// Configuration for the construction + local search pipeline.
///
/// # Budget
///
/// The local search runs in passes. It stops after `max_iterations`
/// passes, or once `time_limit` has elapsed, whichever comes first. Both
/// are checked between passes, never in the middle of one, so the returned
/// solution is always complete.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_cvrp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_iterations(50)
///     .with_time_limit(Duration::from_millis(200));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of local search passes.
    pub max_iterations: usize,

    /// Wall-clock limit for the local search, if any.
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            time_limit: None,
        }
    }
}

impl SolverConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if self.time_limit.is_some_and(|t| t.is_zero()) {
            return Err("time_limit must be positive".into());
        }
        Ok(())
    }
}
