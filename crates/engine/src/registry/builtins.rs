//! Stock targets available through [`CallRegistry::with_builtins`].

use std::cmp::Ordering;

use anyhow::{Result, anyhow, bail};
use calltag_types::Value;

use super::CallRegistry;

pub(super) fn register(registry: &mut CallRegistry) {
    registry
        .register_static("Math", "max", |arguments| pick_extreme("Math::max", arguments, Ordering::Greater))
        .register_static("Math", "min", |arguments| pick_extreme("Math::min", arguments, Ordering::Less))
        .register_static("Math", "sum", math_sum)
        .register_static("String", "upper", |arguments| map_text("String::upper", arguments, str::to_uppercase))
        .register_static("String", "lower", |arguments| map_text("String::lower", arguments, str::to_lowercase))
        .register_static("String", "concat", string_concat)
        .register_static("String", "join", string_join)
        .register_static("Json", "encode", json_encode)
        .register_method("length", length)
        .register_method("count", length)
        .register_method("keys", keys)
        .register_method("get", get)
        .register_method("toString", |receiver, _| Ok(Value::from(receiver.to_string())));
}

fn numeric(target: &str, position: usize, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .filter(|number| number.is_finite())
        .ok_or_else(|| anyhow!("{target} argument {position} is not numeric: {value:?}"))
}

/// Returns the argument that compares as `wanted` against all others, as given.
fn pick_extreme(target: &str, arguments: &[Value], wanted: Ordering) -> Result<Value> {
    let Some((first, rest)) = arguments.split_first() else {
        bail!("{target} expects at least one argument");
    };
    let mut best = first;
    let mut best_number = numeric(target, 0, first)?;
    for (offset, candidate) in rest.iter().enumerate() {
        let number = numeric(target, offset + 1, candidate)?;
        if number.partial_cmp(&best_number) == Some(wanted) {
            best = candidate;
            best_number = number;
        }
    }
    Ok(best.clone())
}

fn math_sum(arguments: &[Value]) -> Result<Value> {
    let mut total = 0.0;
    for (position, argument) in arguments.iter().enumerate() {
        total += numeric("Math::sum", position, argument)?;
    }
    if !total.is_finite() {
        bail!("Math::sum overflowed");
    }
    if total.fract() == 0.0 && total.abs() < i64::MAX as f64 {
        Ok(Value::from(total as i64))
    } else {
        Ok(Value::from_f64(total))
    }
}

fn map_text(target: &str, arguments: &[Value], transform: fn(&str) -> String) -> Result<Value> {
    match arguments {
        [single] => Ok(Value::from(transform(&single.to_string()))),
        _ => bail!("{target} expects exactly one argument, got {}", arguments.len()),
    }
}

fn string_concat(arguments: &[Value]) -> Result<Value> {
    Ok(Value::from(arguments.iter().map(Value::to_string).collect::<String>()))
}

fn string_join(arguments: &[Value]) -> Result<Value> {
    let Some((separator, parts)) = arguments.split_first() else {
        bail!("String::join expects a separator argument");
    };
    let parts: Vec<String> = parts.iter().map(Value::to_string).collect();
    Ok(Value::from(parts.join(&separator.to_string())))
}

fn json_encode(arguments: &[Value]) -> Result<Value> {
    let encoded = match arguments {
        [single] => serde_json::to_string(single)?,
        many => serde_json::to_string(many)?,
    };
    Ok(Value::from(encoded))
}

fn length(receiver: &Value, _arguments: &[Value]) -> Result<Value> {
    let length = match receiver {
        Value::Text(text) => text.chars().count(),
        Value::List(items) => items.len(),
        Value::Record(fields) => fields.len(),
        other => bail!("length is not defined for {}", other.kind_name()),
    };
    Ok(Value::from(length))
}

fn keys(receiver: &Value, _arguments: &[Value]) -> Result<Value> {
    let fields = receiver
        .as_record()
        .ok_or_else(|| anyhow!("keys requires a record receiver, got {}", receiver.kind_name()))?;
    Ok(Value::List(fields.keys().map(|key| Value::from(key.as_str())).collect()))
}

fn get(receiver: &Value, arguments: &[Value]) -> Result<Value> {
    let [key] = arguments else {
        bail!("get expects exactly one argument, got {}", arguments.len());
    };
    let key = key.to_string();
    let found = match receiver {
        Value::Record(fields) => fields.get(&key),
        Value::List(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        other => bail!("get is not defined for {}", other.kind_name()),
    };
    Ok(found.cloned().unwrap_or_default())
}
