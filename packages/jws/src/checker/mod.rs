//! Claims checks run after a signature has matched
//!
//! A [`ClaimsChecker`] gets the verified token and either accepts it or
//! returns a [`ClaimsError`]. Closures of the shape
//! `Fn(&Jws) -> Result<(), ClaimsError>` are checkers too.

mod options;
mod standard;

pub use options::ValidationOptions;
pub use standard::StandardClaimsChecker;

use crate::error::ClaimsError;
use crate::token::Jws;

/// Post-signature validation of a token.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait ClaimsChecker: Send + Sync {
    /// Accept or reject `jws`.
    ///
    /// # Errors
    /// Returns the [`ClaimsError`] describing why the token was refused.
    fn check(&self, jws: &Jws) -> Result<(), ClaimsError>;
}

impl<F> ClaimsChecker for F
where
    F: Fn(&Jws) -> Result<(), ClaimsError> + Send + Sync,
{
    fn check(&self, jws: &Jws) -> Result<(), ClaimsError> {
        self(jws)
    }
}

/// Checker that accepts every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClaimsChecks;

impl ClaimsChecker for NoClaimsChecks {
    fn check(&self, _jws: &Jws) -> Result<(), ClaimsError> {
        Ok(())
    }
}
