//! Call registry: named targets a call node is allowed to invoke.
//!
//! Modules:
//! - `builtins`: stock static targets and receiver methods
//!
//! Static targets are registered under their qualified `Type::method` name and
//! receive the argument list positionally. Methods are registered by bare name
//! and receive the resolved receiver plus the argument list. Lookups happen at
//! call time only; nothing validates a name before a node is rendered.

mod builtins;

use std::{collections::BTreeMap, fmt, sync::Arc};

use anyhow::Result;
use calltag_types::Value;

/// A function invoked without a receiver.
pub trait StaticTarget: Send + Sync {
    fn call(&self, arguments: &[Value]) -> Result<Value>;
}

impl<F> StaticTarget for F
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync,
{
    fn call(&self, arguments: &[Value]) -> Result<Value> {
        self(arguments)
    }
}

/// A method invoked on a receiver resolved from the data context.
///
/// This is the only seam through which a call node reaches into a receiver
/// by method name.
pub trait MethodTarget: Send + Sync {
    fn call(&self, receiver: &Value, arguments: &[Value]) -> Result<Value>;
}

impl<F> MethodTarget for F
where
    F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync,
{
    fn call(&self, receiver: &Value, arguments: &[Value]) -> Result<Value> {
        self(receiver, arguments)
    }
}

/// Returns a record field for `getXxx`-style method names.
struct PropertyAccessor {
    field: String,
}

impl PropertyAccessor {
    /// Maps `getName` to `name`; anything not shaped like an accessor is `None`.
    fn for_method(method: &str) -> Option<Self> {
        let rest = method.strip_prefix("get")?;
        let mut characters = rest.chars();
        let first = characters.next().filter(char::is_ascii_uppercase)?;
        let field = first.to_ascii_lowercase().to_string() + characters.as_str();
        Some(Self { field })
    }
}

impl MethodTarget for PropertyAccessor {
    fn call(&self, receiver: &Value, arguments: &[Value]) -> Result<Value> {
        if !arguments.is_empty() {
            anyhow::bail!("accessor for '{}' takes no arguments, got {}", self.field, arguments.len());
        }
        let Some(fields) = receiver.as_record() else {
            anyhow::bail!("accessor for '{}' requires a record receiver, got {}", self.field, receiver.kind_name());
        };
        Ok(fields.get(&self.field).cloned().unwrap_or_default())
    }
}

/// Name-to-invocable mapping consulted by the target invoker.
///
/// The registry is immutable while rendering, so one instance can be shared
/// across threads behind an `Arc`.
#[derive(Default)]
pub struct CallRegistry {
    statics: BTreeMap<String, Arc<dyn StaticTarget>>,
    methods: BTreeMap<String, Arc<dyn MethodTarget>>,
    property_accessors: bool,
}

impl fmt::Debug for CallRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRegistry")
            .field("statics", &self.statics.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("property_accessors", &self.property_accessors)
            .finish()
    }
}

impl CallRegistry {
    /// An empty registry with no accessor fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the stock targets and accessor fallback.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new().with_property_accessors(true);
        builtins::register(&mut registry);
        registry
    }

    /// Enables answering unregistered `getXxx` methods from record fields.
    pub fn with_property_accessors(mut self, enabled: bool) -> Self {
        self.property_accessors = enabled;
        self
    }

    /// Registers a static function under `type_name::method`, replacing any previous entry.
    pub fn register_static<F>(&mut self, type_name: &str, method: &str, function: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register_static_target(type_name, method, Arc::new(function))
    }

    pub fn register_static_target(&mut self, type_name: &str, method: &str, target: Arc<dyn StaticTarget>) -> &mut Self {
        self.statics.insert(qualified_name(type_name, method), target);
        self
    }

    /// Registers a receiver method by name, replacing any previous entry.
    pub fn register_method<F>(&mut self, method: &str, function: F) -> &mut Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register_method_target(method, Arc::new(function))
    }

    pub fn register_method_target(&mut self, method: &str, target: Arc<dyn MethodTarget>) -> &mut Self {
        self.methods.insert(method.to_string(), target);
        self
    }

    pub fn static_target(&self, type_name: &str, method: &str) -> Option<Arc<dyn StaticTarget>> {
        self.statics.get(&qualified_name(type_name, method)).cloned()
    }

    /// Finds the method to run for `method` on `receiver`. Registered methods
    /// win over the accessor fallback.
    pub fn method_target(&self, receiver: &Value, method: &str) -> Option<Arc<dyn MethodTarget>> {
        if let Some(target) = self.methods.get(method) {
            return Some(Arc::clone(target));
        }
        if self.property_accessors && receiver.as_record().is_some() {
            return PropertyAccessor::for_method(method).map(|accessor| Arc::new(accessor) as Arc<dyn MethodTarget>);
        }
        None
    }

    /// Qualified names of every static target, sorted.
    pub fn static_names(&self) -> impl Iterator<Item = &str> {
        self.statics.keys().map(String::as_str)
    }

    /// Names of every registered method, sorted.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

pub(crate) fn qualified_name(type_name: &str, method: &str) -> String {
    format!("{type_name}::{method}")
}
