//! Error types for key records and key sets

use thiserror::Error;

/// Key record errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwkError {
    /// The mandatory `kty` parameter was not supplied
    #[error("The parameter \"kty\" is mandatory")]
    MissingKeyType,

    /// A requested parameter is not present on the key
    #[error("The value identified by \"{0}\" does not exist")]
    ParameterNotFound(String),

    /// A parameter exists but does not hold the expected kind of value
    #[error("Invalid value for parameter \"{name}\": {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// The key type has no RFC 7638 thumbprint definition
    #[error("Thumbprint is not defined for key type \"{0}\"")]
    UnsupportedKeyType(String),

    /// JSON input could not be parsed into a key or key set
    #[error("Malformed JSON: {0}")]
    Json(String),
}

impl JwkError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for JwkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type for key record operations
pub type Result<T> = std::result::Result<T, JwkError>;
