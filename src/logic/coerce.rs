use std::cmp::Ordering;

use serde_json::{Number, Value};

/// JsonLogic truthiness: `false`, `null`, `0`, `NaN`, `""` and `[]` are falsy.
#[must_use]
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            let f = as_f64(n);
            f != 0.0 && !f.is_nan()
        }
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

#[inline]
pub(crate) fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// Numeric coercion. Returns `None` for values that have no numeric reading
/// (objects, non-numeric strings, arrays longer than one element).
#[must_use]
pub(crate) fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Some(as_f64(n)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => to_number(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Build a JSON number, preferring an integer representation when the value is
/// integral. Non-finite results become `null`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn number(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// String reading used by `cat`, `in` and loose equality fallbacks.
#[must_use]
pub(crate) fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match number(as_f64(n)) {
            Value::Number(normalized) => normalized.to_string(),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Strict equality (`===`): same JSON type and equal value. Numbers compare by
/// magnitude, so `1` and `1.0` are equal.
#[must_use]
pub(crate) fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => as_f64(x) == as_f64(y),
        _ => a == b,
    }
}

/// Loose equality (`==`), following the JavaScript coercion rules JsonLogic
/// inherits: `null` only equals `null`, a boolean side is read as a number, an
/// array or object side is read as its text, and mixed scalars compare
/// numerically. Two arrays or objects compare structurally.
#[must_use]
pub(crate) fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(_), Value::Number(_)) => strict_eq(a, b),
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => a == b,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => {
            loose_eq(&Value::from(u8::from(*x)), other)
        }
        (x, y) if is_compound(x) => loose_eq(&to_primitive(x), y),
        (x, y) if is_compound(y) => loose_eq(x, &to_primitive(y)),
        _ => match (to_number(a), to_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn is_compound(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn to_primitive(value: &Value) -> Value {
    match value {
        Value::Object(_) => Value::String("[object Object]".to_owned()),
        other => Value::String(to_text(other)),
    }
}

/// Ordering for `<`, `<=`, `>` and `>=`. Two strings compare lexically,
/// everything else numerically. `None` means the pair is incomparable, which
/// makes every ordering operator evaluate to `false`.
#[must_use]
pub(crate) fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => to_number(a)?.partial_cmp(&to_number(b)?),
    }
}
