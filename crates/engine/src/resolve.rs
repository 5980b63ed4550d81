//! # Data-Path Resolution
//!
//! Resolves dotted paths such as `user.profile.name` against a data context.
//!
//! Each segment descends into a record field, or into a list element when the
//! segment is a non-negative integer. A segment only counts as found when the
//! value it reaches is truthy (see [`Value::is_truthy`]), so a path ending at
//! `0`, `""` or `false` resolves exactly like a missing path. Callers treat
//! `None` as "use null".
//!
//! ```rust
//! use calltag_engine::resolve::resolve_data_path;
//! use calltag_types::Value;
//! use serde_json::json;
//!
//! let context = Value::from(json!({"user": {"name": "Ann", "visits": 0}}));
//! assert_eq!(resolve_data_path("user.name", &context), Some(&Value::from("Ann")));
//! assert_eq!(resolve_data_path("user.visits", &context), None);
//! ```

use calltag_types::Value;

/// Walks `path` through `context`, returning the final value or `None` when
/// the path is empty or any segment is missing or falsy.
pub fn resolve_data_path<'a>(path: &str, context: &'a Value) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = context;
    for segment in path.split('.') {
        current = descend(current, segment).filter(|next| next.is_truthy())?;
    }
    Some(current)
}

fn descend<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Record(fields) => fields.get(segment),
        Value::List(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}
