//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The uri pattern was empty.
    #[error("The uri pattern cannot be null or empty")]
    InvalidPattern,

    /// The request method was empty or not a known verb.
    #[error("{0}")]
    InvalidMethod(String),

    /// The pattern could not be turned into a matcher.
    #[error("failed to compile pattern '{pattern}': {message}")]
    Compilation {
        /// The offending pattern.
        pattern: String,
        /// What went wrong.
        message: String,
    },

    /// A placeholder had no value during reverse routing.
    #[error("no value for parameter '{name}' in pattern '{pattern}'")]
    UnresolvedParameter {
        /// The pattern being rendered.
        pattern: String,
        /// The placeholder without a value.
        name: String,
    },

    /// Route name not found.
    #[error("route not found: {0}")]
    RouteNotFound(String),
}

impl RouterError {
    pub(crate) fn compilation(pattern: &str, message: impl Into<String>) -> Self {
        Self::Compilation {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
