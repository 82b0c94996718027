use serde_json::Value;

use super::coerce::{compare, loose_eq, number, strict_eq, to_number, to_text, truthy};
use super::{Logic, LogicError};

static NULL: Value = Value::Null;

/// Bundled [JsonLogic](https://jsonlogic.com) evaluator over [`serde_json::Value`].
///
/// Covers the data access, logic, comparison, arithmetic, array-membership
/// and string operators. Any other operator name fails with
/// [`LogicError::UnknownOperator`].
///
/// # Example
///
/// ```
/// use rulegraph::{JsonLogic, Logic};
/// use serde_json::json;
///
/// let rule = json!({"if": [{"var": "is_smoker"}, 100, 50]});
/// let weight = JsonLogic.apply(&rule, &json!({"is_smoker": true})).unwrap();
/// assert_eq!(weight, json!(100));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLogic;

impl Logic for JsonLogic {
    fn apply(&self, rule: &Value, data: &Value) -> Result<Value, LogicError> {
        eval(rule, data)
    }
}

fn eval(rule: &Value, data: &Value) -> Result<Value, LogicError> {
    match rule {
        Value::Object(map) if !map.is_empty() => {
            let mut entries = map.iter();
            let (op, args) = match (entries.next(), entries.next()) {
                (Some(entry), None) => entry,
                _ => {
                    return Err(LogicError::MalformedRule(format!(
                        "expected a single operator, got {} keys",
                        map.len()
                    )))
                }
            };
            let args: Vec<&Value> = match args {
                Value::Array(items) => items.iter().collect(),
                single => vec![single],
            };
            apply_op(op, &args, data)
        }
        Value::Array(items) => items
            .iter()
            .map(|item| eval(item, data))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        literal => Ok(literal.clone()),
    }
}

fn apply_op(op: &str, args: &[&Value], data: &Value) -> Result<Value, LogicError> {
    match op {
        // Lazily evaluated operators
        "if" | "?:" => eval_if(args, data),
        "and" => eval_and_or(args, data, false),
        "or" => eval_and_or(args, data, true),
        _ => {
            let values = args
                .iter()
                .map(|arg| eval(arg, data))
                .collect::<Result<Vec<_>, _>>()?;
            apply_strict(op, &values, data)
        }
    }
}

fn apply_strict(op: &str, args: &[Value], data: &Value) -> Result<Value, LogicError> {
    let arg = |i: usize| args.get(i).unwrap_or(&NULL);
    match op {
        "var" => Ok(var(arg(0), args.get(1), data)),
        "missing" => Ok(missing(args, data)),
        "missing_some" => missing_some(args, data),
        "==" => Ok(Value::Bool(loose_eq(arg(0), arg(1)))),
        "!=" => Ok(Value::Bool(!loose_eq(arg(0), arg(1)))),
        "===" => Ok(Value::Bool(strict_eq(arg(0), arg(1)))),
        "!==" => Ok(Value::Bool(!strict_eq(arg(0), arg(1)))),
        "!" => Ok(Value::Bool(!truthy(arg(0)))),
        "!!" => Ok(Value::Bool(truthy(arg(0)))),
        "<" | "<=" | ">" | ">=" => Ok(Value::Bool(ordering(op, args))),
        "+" | "*" | "-" | "/" | "%" => arithmetic(op, args),
        "min" | "max" => extremum(op, args),
        "in" => Ok(Value::Bool(contains(arg(0), arg(1)))),
        "cat" => Ok(Value::String(args.iter().map(to_text).collect())),
        "substr" => substr(args),
        "merge" => Ok(merge(args)),
        unknown => Err(LogicError::UnknownOperator(unknown.to_owned())),
    }
}

fn eval_if(args: &[&Value], data: &Value) -> Result<Value, LogicError> {
    let mut i = 0;
    while i + 1 < args.len() {
        if truthy(&eval(args[i], data)?) {
            return eval(args[i + 1], data);
        }
        i += 2;
    }
    match args.get(i) {
        Some(otherwise) => eval(otherwise, data),
        None => Ok(Value::Null),
    }
}

/// Short-circuiting `and`/`or`, returning the operand that decided the result.
/// With no operands the result is `null`.
fn eval_and_or(args: &[&Value], data: &Value, stop_when: bool) -> Result<Value, LogicError> {
    let mut last = Value::Null;
    for arg in args {
        last = eval(arg, data)?;
        if truthy(&last) == stop_when {
            return Ok(last);
        }
    }
    Ok(last)
}

fn var(path: &Value, default: Option<&Value>, data: &Value) -> Value {
    lookup(path, data)
        .cloned()
        .unwrap_or_else(|| default.cloned().unwrap_or(Value::Null))
}

fn lookup<'a>(path: &Value, data: &'a Value) -> Option<&'a Value> {
    let path = match path {
        Value::Null => return Some(data),
        Value::String(s) if s.is_empty() => return Some(data),
        Value::String(s) => s.clone(),
        Value::Number(_) => to_text(path),
        _ => return None,
    };
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn is_missing(key: &Value, data: &Value) -> bool {
    match lookup(key, data) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn missing(args: &[Value], data: &Value) -> Value {
    let keys: &[Value] = match args {
        [Value::Array(keys), ..] => keys.as_slice(),
        keys => keys,
    };
    Value::Array(
        keys.iter()
            .filter(|key| is_missing(key, data))
            .cloned()
            .collect(),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn missing_some(args: &[Value], data: &Value) -> Result<Value, LogicError> {
    let (need, keys) = match args {
        [need, Value::Array(keys)] => (need, keys),
        _ => {
            return Err(LogicError::invalid(
                "missing_some",
                "expected [minimum, [keys...]]",
            ))
        }
    };
    let need = to_number(need)
        .filter(|n| *n >= 0.0)
        .ok_or_else(|| LogicError::invalid("missing_some", "minimum must be a number"))?
        as usize;
    let absent: Vec<Value> = keys
        .iter()
        .filter(|key| is_missing(key, data))
        .cloned()
        .collect();
    if keys.len() - absent.len() >= need {
        Ok(Value::Array(Vec::new()))
    } else {
        Ok(Value::Array(absent))
    }
}

fn ordering(op: &str, args: &[Value]) -> bool {
    let holds = |a: &Value, b: &Value| {
        compare(a, b).is_some_and(|ord| match op {
            "<" => ord.is_lt(),
            "<=" => ord.is_le(),
            ">" => ord.is_gt(),
            _ => ord.is_ge(),
        })
    };
    match args {
        // Between form: {"<": [low, x, high]}
        [a, b, c] if op == "<" || op == "<=" => holds(a, b) && holds(b, c),
        [a, b, ..] => holds(a, b),
        _ => false,
    }
}

fn numbers(op: &str, args: &[Value]) -> Result<Vec<f64>, LogicError> {
    args.iter()
        .map(|v| {
            to_number(v).ok_or_else(|| LogicError::invalid(op, format!("{v} is not a number")))
        })
        .collect()
}

fn arithmetic(op: &str, args: &[Value]) -> Result<Value, LogicError> {
    let nums = numbers(op, args)?;
    let result: f64 = match (op, nums.as_slice()) {
        ("+", _) => nums.iter().sum(),
        ("*", [_, ..]) => nums.iter().product(),
        ("-", [a]) => -a,
        ("-", [a, b]) => a - b,
        ("/" | "%", [_, b]) if *b == 0.0 => {
            return Err(LogicError::invalid(op, "division by zero"));
        }
        ("/", [a, b]) => a / b,
        ("%", [a, b]) => a % b,
        _ => {
            return Err(LogicError::invalid(
                op,
                format!("unexpected argument count {}", nums.len()),
            ))
        }
    };
    Ok(number(result))
}

fn extremum(op: &str, args: &[Value]) -> Result<Value, LogicError> {
    let nums = numbers(op, args)?;
    let pick = if op == "min" { f64::min } else { f64::max };
    Ok(nums.into_iter().reduce(pick).map_or(Value::Null, number))
}

fn contains(needle: &Value, haystack: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| strict_eq(item, needle)),
        Value::String(s) => s.contains(to_text(needle).as_str()),
        _ => false,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn substr(args: &[Value]) -> Result<Value, LogicError> {
    let text: Vec<char> = to_text(args.first().unwrap_or(&NULL)).chars().collect();
    let len = text.len() as i64;
    let offset = |v: Option<&Value>| -> Result<Option<i64>, LogicError> {
        v.map(|v| {
            to_number(v)
                .map(|n| n as i64)
                .ok_or_else(|| LogicError::invalid("substr", format!("{v} is not a number")))
        })
        .transpose()
    };
    let start = offset(args.get(1))?.unwrap_or(0);
    let start = if start < 0 { (len + start).max(0) } else { start.min(len) };
    let end = match offset(args.get(2))? {
        None => len,
        Some(n) if n < 0 => (len + n).max(start),
        Some(n) => start.saturating_add(n).min(len),
    };
    Ok(Value::String(
        text[start as usize..end.max(start) as usize].iter().collect(),
    ))
}

fn merge(args: &[Value]) -> Value {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Value::Array(items) => out.extend(items.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    Value::Array(out)
}
