//! Error types surfaced while rendering nodes.

use thiserror::Error;

/// Failure raised by a renderer. Nothing is recovered locally; every variant
/// propagates to whoever dispatched the node.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The call target could not be determined, so no call was attempted.
    #[error("unresolved call target '{target}': {reason}")]
    UnresolvedTarget { target: String, reason: String },

    /// The target was attempted and the call failed, either because nothing
    /// is registered under that name or because the target itself errored.
    #[error("invocation of '{target}' failed: {source}")]
    Invocation {
        target: String,
        #[source]
        source: anyhow::Error,
    },

    /// An argument data path did not resolve while strict argument mode is on.
    #[error("argument {index} could not be resolved from data path '{path}'")]
    ArgumentResolution { index: usize, path: String },

    /// No renderer is registered for the node name.
    #[error("no renderer registered for node '{node}'")]
    UnknownNode { node: String },
}

impl RenderError {
    pub(crate) fn unresolved(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvedTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invocation(target: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Invocation {
            target: target.into(),
            source,
        }
    }
}
