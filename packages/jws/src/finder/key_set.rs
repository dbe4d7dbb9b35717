//! Finder backed by a configured key set

use super::KeyFinder;
use cryypt_jwk::{Jwk, JwkSet, KeyTypeMask};
use serde_json::{Map, Value};

/// Looks keys up in a fixed [`JwkSet`].
///
/// When the header carries a `kid`, only keys with that `kid` are returned.
/// Without one, every key admitted by the mask is a candidate.
#[derive(Debug, Clone)]
pub struct KeySetFinder {
    keys: JwkSet,
}

impl KeySetFinder {
    /// Create a finder over `keys`.
    #[must_use]
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }
}

impl KeyFinder for KeySetFinder {
    fn find(&self, headers: &Map<String, Value>, mask: KeyTypeMask) -> Vec<Jwk> {
        let kid = headers.get("kid").and_then(Value::as_str);
        self.keys
            .iter()
            .filter(|jwk| mask.admits(jwk))
            .filter(|jwk| kid.is_none() || jwk.key_id() == kid)
            .cloned()
            .collect()
    }
}
