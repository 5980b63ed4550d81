//! Builds positional call arguments from argument nodes.

use calltag_types::{Element, Value};
use tracing::warn;

use crate::{RenderError, config::ArgumentPolicy, resolve::resolve_data_path};

/// Attribute naming a data path on an argument node.
pub const DATA_ATTRIBUTE: &str = "data";

/// Produces one value per argument node, in document order.
///
/// A node carrying a `data` attribute resolves that path against `context`;
/// an unresolved path becomes null unless `policy` is strict. Any other node
/// contributes its literal text, where `null` and `false` (case-insensitive)
/// coerce to null and boolean false.
pub fn build_arguments<'a>(
    arguments: impl IntoIterator<Item = &'a Element>,
    context: &Value,
    policy: ArgumentPolicy,
) -> Result<Vec<Value>, RenderError> {
    let mut values = Vec::new();
    for (index, argument) in arguments.into_iter().enumerate() {
        let value = match argument.attribute(DATA_ATTRIBUTE) {
            Some(path) => resolve_bound_argument(index, path, context, policy)?,
            None => coerce_literal(&argument.text),
        };
        values.push(value);
    }
    Ok(values)
}

fn resolve_bound_argument(index: usize, path: &str, context: &Value, policy: ArgumentPolicy) -> Result<Value, RenderError> {
    if let Some(value) = resolve_data_path(path, context) {
        return Ok(value.clone());
    }
    match policy {
        ArgumentPolicy::Strict => Err(RenderError::ArgumentResolution {
            index,
            path: path.to_string(),
        }),
        ArgumentPolicy::Lenient => {
            warn!(argument_index = index, data_path = %path, "argument path unresolved; passing null");
            Ok(Value::Null)
        }
    }
}

/// Coerces literal argument text. Only `null` and `false` are special.
pub fn coerce_literal(text: &str) -> Value {
    if text.eq_ignore_ascii_case("null") {
        Value::Null
    } else if text.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::Text(text.to_string())
    }
}
