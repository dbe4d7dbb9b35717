//! JSON Web Keys (RFC 7517)
//!
//! This crate provides:
//! - [`Jwk`], an immutable key record whose only invariant is a `kty` parameter
//! - [`JwkSet`], an ordered key set that never reorders or deduplicates
//! - [`KeyTypeMask`], the key kinds a key finder is asked for

mod error;
mod jwk;
mod key_set;
mod mask;

pub use error::{JwkError, Result};
pub use jwk::Jwk;
pub use key_set::JwkSet;
pub use mask::KeyTypeMask;

// Re-exported so callers can build key parameters without naming serde_json
pub use serde_json::{Map, Value};
