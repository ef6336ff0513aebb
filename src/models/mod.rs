//! Domain model types for capacitated vehicle routing.
//!
//! Provides the core abstractions: nodes with demands and optional skip
//! penalties, a homogeneous fleet, the validated problem instance, routes as
//! ordered sequences of visits, and solutions with their skipped nodes.

mod fleet;
mod node;
mod problem;
mod record;
mod route;
mod solution;

pub use fleet::Fleet;
pub use node::{Node, NodeKind};
pub use problem::{DischargeMode, Problem, DEFAULT_SKIP_PENALTY, DEPOT};
pub use record::NodeRecord;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
