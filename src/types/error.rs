use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::node::NodeId;
use crate::LogicError;

/// Which of a node's two rule expressions an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRole {
    /// The `rules` expression deciding reachability.
    Gate,
    /// The `weight_rules` expression deciding rank.
    Weight,
}

impl fmt::Display for RuleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleRole::Gate => write!(f, "gating"),
            RuleRole::Weight => write!(f, "weight"),
        }
    }
}

/// Errors that abort a solve. No partial results are returned alongside them.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("error applying {role} rule {rule} with data {data}: {source}")]
    Evaluation {
        role: RuleRole,
        rule: Value,
        data: Value,
        source: LogicError,
    },

    #[error("{role} rule {rule} did not return {expected}, got {found}")]
    EvaluationType {
        role: RuleRole,
        rule: Value,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cycle detected in graph: node {node} is reachable from itself")]
    CycleDetected { node: NodeId },

    #[error("start node {id} is not in the graph")]
    UnknownNode { id: NodeId },
}

/// Errors raised while building a [`Graph`](super::Graph).
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("transition references node {id}, which is not in the graph")]
    UnknownNode { id: NodeId },

    #[cfg(feature = "serde")]
    #[error("invalid graph definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON type name used in type-mismatch diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
