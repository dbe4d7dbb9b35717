//! Finder for keys embedded in the `jwk` header parameter

use super::KeyFinder;
use cryypt_jwk::{Jwk, KeyTypeMask};
use serde_json::{Map, Value};
use tracing::debug;

/// Returns the key carried in the token's own `jwk` header.
///
/// The token chooses this key, so a match only proves the token is
/// self-consistent. Combine it with a check on the key's identity (for
/// example its thumbprint) before trusting the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedJwkFinder;

impl KeyFinder for EmbeddedJwkFinder {
    fn find(&self, headers: &Map<String, Value>, mask: KeyTypeMask) -> Vec<Jwk> {
        let Some(Value::Object(values)) = headers.get("jwk") else {
            return Vec::new();
        };
        match Jwk::new(values.clone()) {
            Ok(jwk) if mask.admits(&jwk) => vec![jwk],
            Ok(_) => Vec::new(),
            Err(err) => {
                debug!("Ignoring embedded jwk header: {err}");
                Vec::new()
            }
        }
    }
}
