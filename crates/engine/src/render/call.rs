use std::sync::Arc;

use calltag_types::{Element, Value};
use tracing::debug;

use super::Renderer;
use crate::{
    CallRegistry, RenderConfig, RenderError,
    arguments::{DATA_ATTRIBUTE, build_arguments},
    invoke::{invoke, parse_static_target, resolve_instance_target},
};

pub const STATIC_ATTRIBUTE: &str = "static";
pub const NAME_ATTRIBUTE: &str = "name";
pub const METHOD_ATTRIBUTE: &str = "method";

/// Which invocation path a call node takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallMode<'a> {
    /// Raw `static` attribute value.
    Static(&'a str),
    /// Receiver path and method name.
    Instance { receiver_path: &'a str, method: &'a str },
}

/// Picks the mode for `node`. A non-empty `static` attribute always wins; the
/// receiver path is `data` when non-empty, otherwise `name`.
pub fn select_mode(node: &Element) -> CallMode<'_> {
    if let Some(qualified) = node.non_empty_attribute(STATIC_ATTRIBUTE) {
        return CallMode::Static(qualified);
    }
    let receiver_path = node
        .non_empty_attribute(DATA_ATTRIBUTE)
        .unwrap_or_else(|| node.attribute_or(NAME_ATTRIBUTE, ""));
    CallMode::Instance {
        receiver_path,
        method: node.attribute_or(METHOD_ATTRIBUTE, ""),
    }
}

/// Renders `call` nodes by invoking a registered target and returning its result.
#[derive(Debug, Clone)]
pub struct CallRenderer {
    registry: Arc<CallRegistry>,
    config: RenderConfig,
}

impl CallRenderer {
    pub fn new(registry: Arc<CallRegistry>, config: RenderConfig) -> Self {
        Self { registry, config }
    }

    fn arguments(&self, node: &Element, context: &Value) -> Result<Vec<Value>, RenderError> {
        build_arguments(
            node.children_named(&self.config.argument_tag),
            context,
            self.config.argument_policy(),
        )
    }
}

impl Renderer for CallRenderer {
    fn render(&self, node_name: &str, node: &Element, context: &Value) -> Result<Value, RenderError> {
        let target = match select_mode(node) {
            CallMode::Static(qualified) => {
                debug!(node = %node_name, call_target = %qualified, "call node in static mode");
                parse_static_target(qualified)?
            }
            CallMode::Instance { receiver_path, method } => {
                debug!(node = %node_name, receiver = %receiver_path, method = %method, "call node in instance mode");
                resolve_instance_target(receiver_path, method, context)?
            }
        };
        let arguments = self.arguments(node, context)?;
        let result = invoke(&self.registry, &target, &arguments)?;
        debug!(node = %node_name, call_target = %target, result_kind = result.kind_name(), "call completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_attribute_takes_precedence() {
        let node = Element::new("call")
            .with_attribute(STATIC_ATTRIBUTE, "Math::max")
            .with_attribute(DATA_ATTRIBUTE, "logger")
            .with_attribute(METHOD_ATTRIBUTE, "getName");
        assert_eq!(select_mode(&node), CallMode::Static("Math::max"));
    }

    #[test]
    fn empty_static_falls_back_to_instance_mode() {
        let node = Element::new("call")
            .with_attribute(STATIC_ATTRIBUTE, "")
            .with_attribute(DATA_ATTRIBUTE, "logger")
            .with_attribute(METHOD_ATTRIBUTE, "getName");
        assert_eq!(
            select_mode(&node),
            CallMode::Instance {
                receiver_path: "logger",
                method: "getName"
            }
        );
    }

    #[test]
    fn receiver_path_falls_back_to_name() {
        let absent = Element::new("call").with_attribute(NAME_ATTRIBUTE, "widget").with_attribute(METHOD_ATTRIBUTE, "render");
        let empty = absent.clone().with_attribute(DATA_ATTRIBUTE, "");
        for node in [absent, empty] {
            assert_eq!(
                select_mode(&node),
                CallMode::Instance {
                    receiver_path: "widget",
                    method: "render"
                }
            );
        }

        let bare = Element::new("call");
        assert_eq!(
            select_mode(&bare),
            CallMode::Instance {
                receiver_path: "",
                method: ""
            }
        );
    }
}
