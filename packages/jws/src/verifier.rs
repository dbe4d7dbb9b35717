//! The JWS verification decision loop
//!
//! [`Verifier::verify`] answers `Ok(true)` only when a key whose constraints
//! fit the token's algorithm produces a matching signature and the claims
//! checker accepts the token. Properties of the token (payload ambiguity,
//! missing or unusable `alg`) abort the call. Properties of a single key
//! (usage, declared algorithm, structural incompatibility) only remove that
//! key from consideration.

use crate::algorithm::{AlgorithmRegistry, SignatureAlgorithm, Verification};
use crate::checker::ClaimsChecker;
use crate::error::{JwsError, JwsResult};
use crate::finder::KeyFinder;
use crate::key_checker::{KeyChecker, KeyUsage, StandardKeyChecker};
use crate::token::Jws;
use cryypt_jwk::{JwkSet, KeyTypeMask};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Verifies JWS tokens against candidate keys.
///
/// A `Verifier` holds no mutable state; clone it or share it behind an `Arc`
/// to verify from several threads at once.
#[derive(Clone)]
pub struct Verifier {
    algorithms: Arc<dyn AlgorithmRegistry>,
    finder: Arc<dyn KeyFinder>,
    claims: Arc<dyn ClaimsChecker>,
    key_checker: Arc<dyn KeyChecker>,
}

impl Verifier {
    /// Create a verifier using [`StandardKeyChecker`] for key constraints.
    #[must_use]
    pub fn new(
        algorithms: Arc<dyn AlgorithmRegistry>,
        finder: Arc<dyn KeyFinder>,
        claims: Arc<dyn ClaimsChecker>,
    ) -> Self {
        Self {
            algorithms,
            finder,
            claims,
            key_checker: Arc::new(StandardKeyChecker),
        }
    }

    /// Replace the key constraint checker.
    #[must_use]
    pub fn with_key_checker(mut self, key_checker: Arc<dyn KeyChecker>) -> Self {
        self.key_checker = key_checker;
        self
    }

    /// Verify `jws`.
    ///
    /// `keys` overrides key discovery; without it the finder is asked for
    /// every key kind usable for verification. `detached_payload` is the
    /// base64url payload for tokens that do not embed one.
    ///
    /// Returns `Ok(false)` when no candidate key verifies the signature,
    /// including when there are no candidates at all.
    ///
    /// # Errors
    /// - [`JwsError::AmbiguousPayload`] if a detached payload is given for a
    ///   token that already has one
    /// - [`JwsError::MissingAlgorithm`] or [`JwsError::InvalidToken`] if the
    ///   header has no usable `alg`
    /// - [`JwsError::UnknownAlgorithm`] or [`JwsError::UnsupportedAlgorithm`]
    ///   if the algorithm cannot be used for verification
    /// - [`JwsError::Claims`] if a signature matched but the claims checker
    ///   rejected the token
    pub fn verify(
        &self,
        jws: &Jws,
        keys: Option<&JwkSet>,
        detached_payload: Option<&str>,
    ) -> JwsResult<bool> {
        if detached_payload.is_some() && jws.has_payload() {
            return Err(JwsError::AmbiguousPayload);
        }

        let keys = match keys {
            Some(keys) => Cow::Borrowed(keys),
            None => Cow::Owned(JwkSet::new(
                self.finder.find(jws.headers(), KeyTypeMask::VERIFICATION),
            )),
        };

        let input = jws.signing_input(detached_payload);

        if keys.is_empty() {
            debug!("No candidate keys, token not verified");
            return Ok(false);
        }

        let algorithm = self.resolve_algorithm(jws)?;
        let name = algorithm.name();

        for (index, key) in keys.iter().enumerate() {
            if !self.key_checker.check_usage(key, KeyUsage::Verification) {
                trace!(index, "Skipping key not usable for verification");
                continue;
            }
            if !self.key_checker.check_algorithm(key, name) {
                trace!(index, alg = name, "Skipping key bound to another algorithm");
                continue;
            }

            match algorithm.verify(key, input.as_bytes(), jws.signature()) {
                Verification::Valid => {
                    debug!(index, alg = name, "Signature verified");
                    return match self.claims.check(jws) {
                        Ok(()) => Ok(true),
                        Err(err) => {
                            debug!("Claims rejected: {err}");
                            Err(err.into())
                        }
                    };
                }
                Verification::Invalid => {
                    trace!(index, alg = name, "Signature mismatch");
                }
                Verification::IncompatibleKey(reason) => {
                    debug!(index, alg = name, "Key incompatible with algorithm: {reason}");
                }
            }
        }

        debug!(alg = name, "No key verified the signature");
        Ok(false)
    }

    fn resolve_algorithm(&self, jws: &Jws) -> JwsResult<Arc<dyn SignatureAlgorithm>> {
        let name = match jws.headers().get("alg") {
            None => return Err(JwsError::MissingAlgorithm),
            Some(Value::String(name)) => name,
            Some(_) => return Err(JwsError::invalid_token("'alg' must be a string")),
        };
        let algorithm = self.algorithms.resolve(name)?;
        if !algorithm.supports_verification() {
            return Err(JwsError::UnsupportedAlgorithm(name.clone()));
        }
        Ok(algorithm)
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier").finish_non_exhaustive()
    }
}
