use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::debug;

use crate::types::value_kind;
use crate::{Logic, LogicError, RuleRole, SolveError};

/// Decide whether a node with the given gating rule is reachable.
///
/// Absent rules are vacuously true. Anything other than a boolean result is an
/// [`SolveError::EvaluationType`].
pub(crate) fn gate<L: Logic>(
    logic: &L,
    rules: Option<&Value>,
    data: &Value,
) -> Result<bool, SolveError> {
    let Some(rules) = rules else {
        return Ok(true);
    };
    match evaluate(logic, RuleRole::Gate, rules, data)? {
        Value::Bool(passed) => Ok(passed),
        other => Err(SolveError::EvaluationType {
            role: RuleRole::Gate,
            rule: rules.clone(),
            expected: "a boolean",
            found: value_kind(&other),
        }),
    }
}

/// Resolve a node's ranking weight: the weight rule's numeric result truncated
/// toward zero, or the static weight when there is no weight rule.
pub(crate) fn resolve_weight<L: Logic>(
    logic: &L,
    weight: i64,
    weight_rules: Option<&Value>,
    data: &Value,
) -> Result<i64, SolveError> {
    let Some(rules) = weight_rules else {
        return Ok(weight);
    };
    match evaluate(logic, RuleRole::Weight, rules, data)? {
        Value::Number(n) => Ok(truncate(&n)),
        other => Err(SolveError::EvaluationType {
            role: RuleRole::Weight,
            rule: rules.clone(),
            expected: "a number",
            found: value_kind(&other),
        }),
    }
}

// `as` saturates at the i64 bounds and truncates toward zero.
#[allow(clippy::cast_possible_truncation)]
fn truncate(n: &serde_json::Number) -> i64 {
    match n.as_i64() {
        Some(i) => i,
        None => n.as_f64().map_or(i64::MAX, |f| f as i64),
    }
}

/// Run the evaluator behind a panic boundary, converting both reported errors
/// and panics into [`SolveError::Evaluation`].
fn evaluate<L: Logic>(
    logic: &L,
    role: RuleRole,
    rule: &Value,
    data: &Value,
) -> Result<Value, SolveError> {
    let source = match panic::catch_unwind(AssertUnwindSafe(|| logic.apply(rule, data))) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => err,
        Err(payload) => LogicError::Panicked(panic_message(payload.as_ref())),
    };
    debug!(%role, %rule, error = %source, "rule evaluation failed");
    Err(SolveError::Evaluation {
        role,
        rule: rule.clone(),
        data: data.clone(),
        source,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
