//! Error types for corelib

use thiserror::Error;

/// Result type alias for statement building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Guard failures raised while configuring or building a statement.
///
/// These are configuration errors: a statement that fails with one of these
/// never produces partial SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A required argument is missing or empty
    #[error("Argument '{0}' cannot be null or empty")]
    ArgumentNull(String),

    /// An argument has a value that is not allowed
    #[error("Invalid argument '{name}': {reason}")]
    ArgumentInvalid { name: String, reason: String },

    /// A collection argument must contain at least one item
    #[error("Argument '{0}' must have at least one item")]
    MustHaveAny(String),

    /// Value mapping via serde failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BuildError {
    /// Create an argument-null error for the named field
    pub fn argument_null(name: impl Into<String>) -> Self {
        Self::ArgumentNull(name.into())
    }

    /// Create an argument-invalid error for the named field
    pub fn argument_invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArgumentInvalid {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a must-have-any error for the named collection
    pub fn must_have_any(name: impl Into<String>) -> Self {
        Self::MustHaveAny(name.into())
    }

    /// Name of the offending argument, if the error carries one.
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            Self::ArgumentNull(name) | Self::MustHaveAny(name) => Some(name),
            Self::ArgumentInvalid { name, .. } => Some(name),
            Self::Serialization(_) => None,
        }
    }

    /// Check if this is an argument-null error
    pub fn is_argument_null(&self) -> bool {
        matches!(self, Self::ArgumentNull(_))
    }

    /// Check if this is an argument-invalid error
    pub fn is_argument_invalid(&self) -> bool {
        matches!(self, Self::ArgumentInvalid { .. })
    }

    /// Check if this is a must-have-any error
    pub fn is_must_have_any(&self) -> bool {
        matches!(self, Self::MustHaveAny(_))
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
