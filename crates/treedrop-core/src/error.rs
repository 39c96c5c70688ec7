#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! These are programmer errors: a helper used outside a mounted root, a
//! binding handed to the wrong root, or a malformed configuration value.
//! Runtime conditions such as a type mismatch or an out-of-bounds keyboard
//! move are not errors and never surface here.

use std::fmt;

/// A misuse of the drag-and-drop API or an invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A draggable/droppable helper was used with no mounted session root.
    MissingContext {
        /// The helper that was invoked (`"draggable"`, `"droppable"`, ...).
        helper: &'static str,
    },
    /// A binding created by one root was passed to another.
    ForeignBinding {
        /// Root that created the binding.
        binding_root: u64,
        /// Root that received it.
        session_root: u64,
    },
    /// No droppable with this id is registered.
    UnknownDroppable(String),
    /// No draggable with this id is registered.
    UnknownDraggable(String),
    /// A droppable with this id is already registered.
    DuplicateDroppable(String),
    /// A draggable with this id is already registered.
    DuplicateDraggable(String),
    /// A configuration field holds an unusable value.
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Offending value, as text.
        value: String,
        /// What was expected.
        message: String,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext { helper } => write!(
                f,
                "{helper} must be used within a mounted DragDropRoot"
            ),
            Self::ForeignBinding {
                binding_root,
                session_root,
            } => write!(
                f,
                "binding belongs to root #{binding_root}, not root #{session_root}"
            ),
            Self::UnknownDroppable(id) => write!(f, "no droppable registered with id {id:?}"),
            Self::UnknownDraggable(id) => write!(f, "no draggable registered with id {id:?}"),
            Self::DuplicateDroppable(id) => {
                write!(f, "droppable id {id:?} is already registered")
            }
            Self::DuplicateDraggable(id) => {
                write!(f, "draggable id {id:?} is already registered")
            }
            Self::InvalidValue {
                field,
                value,
                message,
            } => write!(f, "{field}={value} ({message})"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_names_the_helper() {
        let err = ConfigError::MissingContext { helper: "draggable" };
        assert_eq!(
            err.to_string(),
            "draggable must be used within a mounted DragDropRoot"
        );
    }

    #[test]
    fn invalid_value_format() {
        let err = ConfigError::invalid("acceptance_settle_ms", "abc", "expected milliseconds");
        assert_eq!(err.to_string(), "acceptance_settle_ms=abc (expected milliseconds)");
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ConfigError::UnknownDroppable("x".into()));
    }
}
