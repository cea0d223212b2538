use thiserror::Error;

use crate::flavor::FlavorKind;
use crate::OccurrenceId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A dispatch reached an occurrence whose birth event has not fired.
    #[error("{flavor} occurrence {occurrence} has no linked instance")]
    Unlinked {
        flavor: FlavorKind,
        occurrence: OccurrenceId,
    },
    #[error("{flavor} occurrence {occurrence} is already linked")]
    AlreadyLinked {
        flavor: FlavorKind,
        occurrence: OccurrenceId,
    },
    #[error("`{name}` is not a member of the {flavor} instance")]
    UnknownMember { flavor: FlavorKind, name: String },
    #[error("`{name}` is read-only on the {flavor} instance")]
    ReadOnly { flavor: FlavorKind, name: String },
    #[error("`{name}` expected {expected}")]
    InvalidArgument { name: String, expected: &'static str },
    #[error("compute must return an object, got {found}")]
    InvalidCompute { found: &'static str },
    #[error("host error: {0}")]
    Host(String),
    #[error("{0}")]
    Custom(String),
}

impl BridgeError {
    /// Error raised from user hooks, methods or middleware.
    pub fn custom(message: impl Into<String>) -> Self {
        BridgeError::Custom(message.into())
    }

    /// Error raised by a host implementation.
    pub fn host(message: impl Into<String>) -> Self {
        BridgeError::Host(message.into())
    }
}

pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
