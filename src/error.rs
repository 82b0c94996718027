use thiserror::Error;

use crate::{GraphError, SolveError};

/// Unified error type covering graph construction, loading and solving.
///
/// Convenient as the error type of functions that both build and solve a graph.
#[derive(Debug, Error)]
pub enum RulegraphError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
