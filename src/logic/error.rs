use thiserror::Error;

/// Errors raised by a [`Logic`](super::Logic) evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    #[error("unrecognized operation '{0}'")]
    UnknownOperator(String),

    #[error("invalid arguments for '{op}': {reason}")]
    InvalidArguments { op: String, reason: String },

    #[error("malformed rule: {0}")]
    MalformedRule(String),

    #[error("evaluator panicked: {0}")]
    Panicked(String),
}

impl LogicError {
    pub(crate) fn invalid(op: &str, reason: impl Into<String>) -> Self {
        LogicError::InvalidArguments {
            op: op.to_owned(),
            reason: reason.into(),
        }
    }
}
