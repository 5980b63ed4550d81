//! Target resolution and invocation.
//!
//! A call node names its target in one of two ways:
//!
//! - **Static**: a qualified `Type::method` string, invoked without a receiver.
//! - **Instance**: a receiver resolved from the data context by path, plus a
//!   method name.
//!
//! Resolution only determines *what* to call. Whether anything answers to that
//! name is discovered when [`invoke`] looks it up, so an unknown name surfaces
//! as [`RenderError::Invocation`] rather than as a resolution failure.

use std::fmt;

use calltag_types::Value;
use tracing::debug;

use crate::{CallRegistry, RenderError, registry::qualified_name, resolve::resolve_data_path};

/// Separator between the type and method parts of a static target.
pub const STATIC_SEPARATOR: &str = "::";

/// The target of one call, built fresh for every render.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTarget {
    Static { type_name: String, method: String },
    Instance { receiver: Value, receiver_path: String, method: String },
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTarget::Static { type_name, method } => write!(f, "{type_name}{STATIC_SEPARATOR}{method}"),
            ResolvedTarget::Instance { receiver_path, method, .. } => write!(f, "{receiver_path}->{method}"),
        }
    }
}

/// Splits `Type::method` into a static target.
///
/// Anything other than exactly two non-empty parts is unresolved.
pub fn parse_static_target(raw: &str) -> Result<ResolvedTarget, RenderError> {
    let parts: Vec<&str> = raw.split(STATIC_SEPARATOR).collect();
    match parts.as_slice() {
        [type_name, method] if !type_name.is_empty() && !method.is_empty() => Ok(ResolvedTarget::Static {
            type_name: type_name.to_string(),
            method: method.to_string(),
        }),
        _ => Err(RenderError::unresolved(raw, "static target must have the form 'Type::method'")),
    }
}

/// Resolves the receiver at `receiver_path` and pairs it with `method`.
///
/// A path that does not resolve (including one that reaches a falsy value)
/// leaves no receiver, which is reported before any call is attempted.
pub fn resolve_instance_target(receiver_path: &str, method: &str, context: &Value) -> Result<ResolvedTarget, RenderError> {
    let Some(receiver) = resolve_data_path(receiver_path, context) else {
        return Err(RenderError::unresolved(
            format!("{receiver_path}->{method}"),
            format!("receiver path '{receiver_path}' did not resolve to a value"),
        ));
    };
    Ok(ResolvedTarget::Instance {
        receiver: receiver.clone(),
        receiver_path: receiver_path.to_string(),
        method: method.to_string(),
    })
}

/// Calls `target` with `arguments` and passes its return value through unchanged.
pub fn invoke(registry: &CallRegistry, target: &ResolvedTarget, arguments: &[Value]) -> Result<Value, RenderError> {
    debug!(call_target = %target, argument_count = arguments.len(), "invoking call target");
    let outcome = match target {
        ResolvedTarget::Static { type_name, method } => {
            let Some(function) = registry.static_target(type_name, method) else {
                return Err(RenderError::invocation(
                    target.to_string(),
                    anyhow::anyhow!("no static target registered as '{}'", qualified_name(type_name, method)),
                ));
            };
            function.call(arguments)
        }
        ResolvedTarget::Instance { receiver, method, .. } => {
            let Some(function) = registry.method_target(receiver, method) else {
                return Err(RenderError::invocation(
                    target.to_string(),
                    anyhow::anyhow!("method '{}' is not callable on a {} receiver", method, receiver.kind_name()),
                ));
            };
            function.call(receiver, arguments)
        }
    };
    outcome.map_err(|source| RenderError::invocation(target.to_string(), source))
}
