//! Local search operators and the improvement engine.
//!
//! - [`two_opt_improve`]: Intra-route 2-opt segment reversal
//! - [`or_opt_improve`]: Intra-route segment relocation
//! - [`relocate_improve`]: Inter-route node relocation
//! - [`swap_improve`]: Inter-route node exchange
//! - [`dropout_improve`]: Skip or reinsert optional nodes against their penalty
//! - [`LocalSearch`]: Runs all of the above in passes until a local optimum

mod dropout;
mod engine;
mod or_opt;
mod relocate;
mod swap;
mod two_opt;

pub use dropout::{dropout_improve, DropoutMoves};
pub use engine::{LocalSearch, MoveCounts, SearchReport, SearchStatus};
pub use or_opt::or_opt_improve;
pub use relocate::relocate_improve;
pub use swap::swap_improve;
pub use two_opt::two_opt_improve;
