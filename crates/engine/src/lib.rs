//! # Calltag Engine
//!
//! The engine renders declarative call nodes: an element such as
//! `<call static="Math::max"><argument>3</argument><argument>7</argument></call>`
//! names a target and its arguments, the engine resolves both against a data
//! context, performs the call, and returns the result for further rendering.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use calltag_engine::{CallRegistry, RenderConfig, RendererRegistry};
//! use calltag_types::{Element, Value};
//! use serde_json::json;
//!
//! let renderers = RendererRegistry::with_call_renderer(Arc::new(CallRegistry::with_builtins()), RenderConfig::default());
//! let context = Value::from(json!({"logger": {"name": "svc"}}));
//! let node = Element::new("call").with_attribute("data", "logger").with_attribute("method", "getName");
//!
//! assert_eq!(renderers.render(&node, &context)?, Value::from("svc"));
//! # Ok::<(), calltag_engine::RenderError>(())
//! ```
//!
//! ## Architecture
//!
//! - **`resolve`**: dotted data-path lookup with the truthiness gate
//! - **`arguments`**: argument nodes to positional values
//! - **`registry`**: named static targets and receiver methods
//! - **`invoke`**: static/instance target resolution and the call itself
//! - **`render`**: the renderer contract, node dispatch, and the call renderer
//! - **`config`**: render settings from files and the environment
//! - **`document`**: node and data-context documents on disk

pub mod arguments;
pub mod config;
pub mod document;
pub mod error;
pub mod invoke;
pub mod registry;
pub mod render;
pub mod resolve;

pub use arguments::build_arguments;
pub use config::{ArgumentPolicy, ConfigError, RenderConfig};
pub use document::{DocumentError, load_data_context, parse_node_file, parse_node_str};
pub use error::RenderError;
pub use invoke::{ResolvedTarget, invoke};
pub use registry::{CallRegistry, MethodTarget, StaticTarget};
pub use render::{CALL_NODE, CallRenderer, Renderer, RendererRegistry};
pub use resolve::resolve_data_path;
