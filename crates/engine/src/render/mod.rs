//! Renderer contract and node-name dispatch.
//!
//! Modules:
//! - `call`: the `call` node renderer

mod call;

use std::{collections::HashMap, fmt, sync::Arc};

use calltag_types::{Element, Value};
use tracing::debug;

use crate::{CallRegistry, RenderConfig, RenderError};

pub use call::{CallMode, CallRenderer, METHOD_ATTRIBUTE, NAME_ATTRIBUTE, STATIC_ATTRIBUTE, select_mode};

/// Node name the call renderer is registered under.
pub const CALL_NODE: &str = "call";

/// Renders one kind of node against a data context.
///
/// Implementations hold no per-render state, so one renderer may serve
/// concurrent renders over independent contexts.
pub trait Renderer: Send + Sync {
    fn render(&self, node_name: &str, node: &Element, context: &Value) -> Result<Value, RenderError>;
}

/// Maps node names (case-insensitively) to renderers.
#[derive(Default, Clone)]
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.renderers.keys().collect();
        names.sort();
        f.debug_struct("RendererRegistry").field("renderers", &names).finish()
    }
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the call renderer registered under [`CALL_NODE`].
    pub fn with_call_renderer(registry: Arc<CallRegistry>, config: RenderConfig) -> Self {
        let mut renderers = Self::new();
        renderers.register(CALL_NODE, Arc::new(CallRenderer::new(registry, config)));
        renderers
    }

    pub fn register(&mut self, node_name: &str, renderer: Arc<dyn Renderer>) -> &mut Self {
        self.renderers.insert(node_name.to_ascii_lowercase(), renderer);
        self
    }

    pub fn get(&self, node_name: &str) -> Option<Arc<dyn Renderer>> {
        self.renderers.get(&node_name.to_ascii_lowercase()).cloned()
    }

    /// Dispatches `node` to the renderer registered for its name.
    pub fn render(&self, node: &Element, context: &Value) -> Result<Value, RenderError> {
        let Some(renderer) = self.get(&node.name) else {
            return Err(RenderError::UnknownNode { node: node.name.clone() });
        };
        debug!(node = %node.name, "dispatching node");
        renderer.render(&node.name, node, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Renderer for Echo {
        fn render(&self, node_name: &str, node: &Element, _context: &Value) -> Result<Value, RenderError> {
            Ok(Value::from(format!("{node_name}:{}", node.text)))
        }
    }

    #[test]
    fn dispatches_by_case_insensitive_name() {
        let mut registry = RendererRegistry::new();
        registry.register("Echo", Arc::new(Echo));

        let node = Element::new("ECHO").with_text("hi");
        assert_eq!(registry.render(&node, &Value::Null).unwrap(), Value::from("ECHO:hi"));
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let registry = RendererRegistry::with_call_renderer(Arc::new(CallRegistry::new()), RenderConfig::default());
        assert!(registry.get("call").is_some());
        let error = registry.render(&Element::new("button"), &Value::Null).unwrap_err();
        assert!(matches!(error, RenderError::UnknownNode { ref node } if node == "button"));
    }
}
