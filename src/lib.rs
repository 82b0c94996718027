//! Rule-gated graph reachability and ranking.
//!
//! Given a [`Graph`] of [`Node`]s and a JSON data context, [`solve`] walks the
//! graph from a set of start nodes, following only transitions into nodes whose
//! gating rule holds, and returns the reachable terminal nodes ordered by
//! weight. Rules are [JsonLogic](https://jsonlogic.com) expressions evaluated by
//! the bundled [`JsonLogic`] evaluator, or by any other [`Logic`] implementation.

mod error;
mod gate;
#[cfg(feature = "serde")]
mod load;
mod logic;
mod solve;
mod types;
mod walk;

pub use error::RulegraphError;
#[cfg(feature = "serde")]
pub use load::NodeSpec;
pub use logic::{JsonLogic, Logic, LogicError};
pub use solve::{solve, Solver, DEFAULT_MAX_ROUNDS};
pub use types::{Graph, GraphError, Node, NodeId, Ranked, RuleRole, SolveError, SolveReport};
