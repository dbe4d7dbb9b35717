//! Signature algorithms and the registry that resolves them by name
//!
//! The verifier never matches on algorithm names itself: it asks an
//! [`AlgorithmRegistry`] for a [`SignatureAlgorithm`] and lets that algorithm
//! decide whether a key is usable.

mod ecdsa;
mod hmac;
mod none;
mod rsa;

pub use ecdsa::EcdsaAlgorithm;
pub use hmac::HmacAlgorithm;
pub use none::NoneAlgorithm;
pub use rsa::RsaAlgorithm;

use crate::error::{JwsError, JwsResult};
use cryypt_jwk::Jwk;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of checking one signature with one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The signature matches
    Valid,
    /// The key is usable but the signature does not match
    Invalid,
    /// The key can never be used with this algorithm
    IncompatibleKey(String),
}

/// A named algorithm able to check signatures.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait SignatureAlgorithm: Send + Sync {
    /// Header `alg` value.
    fn name(&self) -> &str;

    /// Whether this algorithm can verify signatures at all.
    fn supports_verification(&self) -> bool {
        true
    }

    /// Check `signature` over `input` with `key`.
    fn verify(&self, key: &Jwk, input: &[u8], signature: &[u8]) -> Verification;
}

/// Resolves algorithm names to implementations.
pub trait AlgorithmRegistry: Send + Sync {
    /// Algorithm registered under `name`.
    ///
    /// # Errors
    /// Returns [`JwsError::UnknownAlgorithm`] when nothing is registered under
    /// that name.
    fn resolve(&self, name: &str) -> JwsResult<Arc<dyn SignatureAlgorithm>>;
}

/// In-memory [`AlgorithmRegistry`].
///
/// [`AlgorithmManager::default`] registers the HMAC, RSA and ECDSA
/// algorithms. The unsecured `none` algorithm is never registered implicitly.
#[derive(Clone)]
pub struct AlgorithmManager {
    algorithms: HashMap<String, Arc<dyn SignatureAlgorithm>>,
}

impl AlgorithmManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Register `algorithm` under its own name, replacing any previous entry.
    #[must_use]
    pub fn register(mut self, algorithm: impl SignatureAlgorithm + 'static) -> Self {
        self.algorithms
            .insert(algorithm.name().to_string(), Arc::new(algorithm));
        self
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.algorithms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AlgorithmManager {
    fn default() -> Self {
        Self::new()
            .register(HmacAlgorithm::hs256())
            .register(HmacAlgorithm::hs384())
            .register(HmacAlgorithm::hs512())
            .register(RsaAlgorithm::rs256())
            .register(RsaAlgorithm::rs384())
            .register(RsaAlgorithm::rs512())
            .register(RsaAlgorithm::ps256())
            .register(RsaAlgorithm::ps384())
            .register(RsaAlgorithm::ps512())
            .register(EcdsaAlgorithm::es256())
            .register(EcdsaAlgorithm::es384())
    }
}

impl AlgorithmRegistry for AlgorithmManager {
    fn resolve(&self, name: &str) -> JwsResult<Arc<dyn SignatureAlgorithm>> {
        self.algorithms
            .get(name)
            .cloned()
            .ok_or_else(|| JwsError::UnknownAlgorithm(name.to_string()))
    }
}

impl fmt::Debug for AlgorithmManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmManager")
            .field("algorithms", &self.names())
            .finish()
    }
}
