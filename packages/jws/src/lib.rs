//! JSON Web Signature verification
//!
//! This crate decides whether a [`Jws`] was signed by one of a set of
//! candidate keys. The pieces are composed explicitly:
//!
//! - an [`AlgorithmRegistry`] maps `alg` names to [`SignatureAlgorithm`]s
//! - a [`KeyFinder`] discovers keys from the token headers when the caller
//!   does not supply a key set
//! - a [`KeyChecker`] enforces the `use`, `key_ops` and `alg` key parameters
//! - a [`ClaimsChecker`] runs once a signature has matched
//!
//! ```no_run
//! use std::sync::Arc;
//! use cryypt_jwk::JwkSet;
//! use cryypt_jws::{AlgorithmManager, Jws, KeyFinderChain, StandardClaimsChecker, Verifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let keys = JwkSet::from_json(r#"{"keys":[{"kty":"oct","k":"c2VjcmV0LXNlY3JldC1zZWNyZXQtc2VjcmV0LTMyYg"}]}"#)?;
//! let verifier = Verifier::new(
//!     Arc::new(AlgorithmManager::default()),
//!     Arc::new(KeyFinderChain::new()),
//!     Arc::new(StandardClaimsChecker::default()),
//! );
//! let jws = Jws::from_compact("eyJhbGciOiJIUzI1NiJ9.aGVsbG8.c2lnbmF0dXJl")?;
//! let verified = verifier.verify(&jws, Some(&keys), None)?;
//! # let _ = verified;
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod checker;
pub mod error;
pub mod finder;
pub mod key_checker;
pub mod token;
pub mod verifier;

pub use algorithm::{
    AlgorithmManager, AlgorithmRegistry, EcdsaAlgorithm, HmacAlgorithm, NoneAlgorithm,
    RsaAlgorithm, SignatureAlgorithm, Verification,
};
pub use checker::{ClaimsChecker, NoClaimsChecks, StandardClaimsChecker, ValidationOptions};
pub use error::{ClaimsError, ErrorKind, JwsError, JwsResult};
pub use finder::{EmbeddedJwkFinder, KeyFinder, KeyFinderChain, KeySetFinder, NoneKeyFinder};
pub use key_checker::{KeyChecker, KeyUsage, StandardKeyChecker};
pub use token::Jws;
pub use verifier::Verifier;
