mod error;
mod graph;
mod node;
mod ranked;
mod solve_report;

pub(crate) use error::value_kind;
pub use error::{GraphError, RuleRole, SolveError};
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use ranked::Ranked;
pub use solve_report::SolveReport;
