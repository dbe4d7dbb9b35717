//! JWS verification error types
//!
//! A `verify` call answers `Ok(false)` when no key could verify the token.
//! Everything else the caller must distinguish is an error, grouped by
//! [`ErrorKind`].

use cryypt_jwk::JwkError;
use thiserror::Error;

/// JWS operation result type
pub type JwsResult<T> = Result<T, JwsError>;

/// Broad category of a [`JwsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller or the token supplied something malformed
    InvalidArgument,
    /// The token names an algorithm that cannot be used for verification
    NotSupported,
    /// A signature matched but the claims checker refused the token
    ClaimsRejected,
}

/// JWS errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwsError {
    /// A detached payload was given for a token that embeds one
    #[error("A detached payload is set, but the JWS already has a payload")]
    AmbiguousPayload,

    /// The header has no `alg` parameter
    #[error("No 'alg' parameter set in the header")]
    MissingAlgorithm,

    /// The registry does not know the algorithm
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The algorithm is known but cannot verify signatures
    #[error("The algorithm '{0}' does not support signature verification")]
    UnsupportedAlgorithm(String),

    /// The token could not be decoded
    #[error("Invalid JWS: {0}")]
    InvalidToken(String),

    /// A key could not be used for an explicit signing request
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key record error
    #[error(transparent)]
    Key(#[from] JwkError),

    /// Claims were rejected after a signature matched
    #[error("Claims rejected: {0}")]
    Claims(#[from] ClaimsError),
}

impl JwsError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            JwsError::AmbiguousPayload
            | JwsError::MissingAlgorithm
            | JwsError::InvalidToken(_)
            | JwsError::InvalidKey(_)
            | JwsError::Key(_) => ErrorKind::InvalidArgument,
            JwsError::UnknownAlgorithm(_) | JwsError::UnsupportedAlgorithm(_) => {
                ErrorKind::NotSupported
            }
            JwsError::Claims(_) => ErrorKind::ClaimsRejected,
        }
    }

    /// Create an invalid token error
    #[inline]
    #[must_use]
    pub fn invalid_token(msg: &str) -> Self {
        JwsError::InvalidToken(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwsError::InvalidKey(msg.to_string())
    }
}

/// Claims validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    /// `exp` is in the past
    #[error("Token has expired")]
    Expired,
    /// `nbf` is in the future
    #[error("Token not yet valid")]
    NotYetValid,
    /// `iat` is in the future
    #[error("Token issued in the future")]
    IssuedInFuture,
    /// `iss` does not match
    #[error("Invalid issuer")]
    InvalidIssuer,
    /// `aud` does not contain the expected audience
    #[error("Invalid audience")]
    InvalidAudience,
    /// A required claim is absent
    #[error("Missing required claim: {0}")]
    MissingClaim(String),
    /// A claim has the wrong shape
    #[error("Invalid claim '{claim}': {reason}")]
    InvalidClaim {
        /// Claim name
        claim: String,
        /// What is wrong with it
        reason: String,
    },
    /// The `crit` header is malformed or lists unsupported parameters
    #[error("Critical header check failed: {0}")]
    CriticalHeader(String),
    /// Application specific rejection
    #[error("{0}")]
    Custom(String),
}

impl ClaimsError {
    /// Create an invalid claim error
    #[inline]
    #[must_use]
    pub fn invalid_claim(claim: &str, reason: &str) -> Self {
        ClaimsError::InvalidClaim {
            claim: claim.to_string(),
            reason: reason.to_string(),
        }
    }
}
