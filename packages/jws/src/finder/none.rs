//! Finder supplying the pseudo key for unsecured tokens

use super::KeyFinder;
use cryypt_jwk::{Jwk, KeyTypeMask};
use serde_json::{Map, Value};

/// Yields `{"kty":"none"}` for tokens whose `alg` is `none`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneKeyFinder;

impl KeyFinder for NoneKeyFinder {
    fn find(&self, headers: &Map<String, Value>, mask: KeyTypeMask) -> Vec<Jwk> {
        if !mask.contains(KeyTypeMask::NONE)
            || headers.get("alg").and_then(Value::as_str) != Some("none")
        {
            return Vec::new();
        }
        let mut values = Map::new();
        values.insert("kty".to_string(), Value::from("none"));
        Jwk::new(values).into_iter().collect()
    }
}
