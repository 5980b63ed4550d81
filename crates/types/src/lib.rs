//! Shared type definitions for the calltag workspace.
//!
//! - [`Value`]: the tagged data-context tree every path and argument resolves against.
//! - [`Element`]: the attribute-bearing node handed to renderers.

mod element;
mod value;

pub use element::Element;
pub use value::{Record, Value};
