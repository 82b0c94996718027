//! Rule expression evaluation.
//!
//! The traversal engine only needs "evaluate expression E against data D".
//! [`Logic`] is that seam; [`JsonLogic`] is the bundled implementation.

mod coerce;
mod error;
mod json_logic;

use serde_json::Value;

pub use error::LogicError;
pub use json_logic::JsonLogic;

/// Evaluates a rule expression against a data context.
///
/// Implementations may return any JSON value; the caller decides whether the
/// result has the right type for the rule's role. Implementations are allowed
/// to panic on malformed input: the solver contains the panic and reports it
/// as an evaluation error.
///
/// Closures with the signature `Fn(&Value, &Value) -> Result<Value, LogicError>`
/// implement this trait.
pub trait Logic {
    /// Evaluate `rule` against `data`.
    ///
    /// # Errors
    ///
    /// Returns [`LogicError`] if the rule cannot be evaluated.
    fn apply(&self, rule: &Value, data: &Value) -> Result<Value, LogicError>;
}

impl<F> Logic for F
where
    F: Fn(&Value, &Value) -> Result<Value, LogicError>,
{
    fn apply(&self, rule: &Value, data: &Value) -> Result<Value, LogicError> {
        self(rule, data)
    }
}
