//! JSON Web Key record as defined in RFC 7517

use crate::error::{JwkError, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Immutable JSON Web Key.
///
/// A [`Jwk`] is a bag of JOSE parameters (`kty`, `use`, `alg`, `kid` and the
/// algorithm specific key material) kept in insertion order. The only
/// invariant checked here is the presence of `kty`; whether the material is
/// usable for a given algorithm is decided by that algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Jwk {
    values: Map<String, Value>,
}

impl Jwk {
    /// Create a key from its parameters.
    ///
    /// # Errors
    /// Returns [`JwkError::MissingKeyType`] when `kty` is absent.
    pub fn new(values: Map<String, Value>) -> Result<Self> {
        if !values.contains_key("kty") {
            return Err(JwkError::MissingKeyType);
        }
        Ok(Self { values })
    }

    /// Parse a key from its JSON object form.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or a missing `kty`.
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Map<String, Value> = serde_json::from_str(json)?;
        Self::new(values)
    }

    /// Value of parameter `name`.
    ///
    /// # Errors
    /// Returns [`JwkError::ParameterNotFound`] when the parameter is absent.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| JwkError::ParameterNotFound(name.to_string()))
    }

    /// Whether parameter `name` is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Parameter names in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// All parameters.
    #[must_use]
    pub fn all(&self) -> &Map<String, Value> {
        &self.values
    }

    /// String value of parameter `name`, if present and a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// The `kty` parameter, when it is a string.
    #[must_use]
    pub fn key_type(&self) -> Option<&str> {
        self.get_str("kty")
    }

    /// The `kid` parameter.
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.get_str("kid")
    }

    /// The `use` parameter.
    #[must_use]
    pub fn key_use(&self) -> Option<&str> {
        self.get_str("use")
    }

    /// The `alg` parameter.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.get_str("alg")
    }

    /// The string entries of `key_ops`, or `None` when the parameter is absent.
    ///
    /// Non-string entries are ignored.
    #[must_use]
    pub fn key_ops(&self) -> Option<Vec<&str>> {
        let ops = self.values.get("key_ops")?;
        Some(
            ops.as_array()
                .map(|ops| ops.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default(),
        )
    }

    /// Whether this key carries private material (`d`).
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.has("d")
    }

    /// Decode a base64url (no padding) string parameter into raw bytes.
    ///
    /// # Errors
    /// Returns an error when the parameter is absent, not a string, or not
    /// valid base64url.
    pub fn decode_param(&self, name: &str) -> Result<Vec<u8>> {
        let encoded = self
            .get(name)?
            .as_str()
            .ok_or_else(|| JwkError::invalid_parameter(name, "expected a string"))?;
        URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| JwkError::invalid_parameter(name, e.to_string()))
    }

    /// RFC 7638 SHA-256 thumbprint, base64url encoded.
    ///
    /// Only the required members of the key type participate, in
    /// lexicographic order, so optional parameters never change the result.
    ///
    /// # Errors
    /// Returns an error for key types without a thumbprint definition or when
    /// a required member is missing.
    pub fn thumbprint(&self) -> Result<String> {
        let kty = self
            .key_type()
            .ok_or_else(|| JwkError::invalid_parameter("kty", "expected a string"))?;
        let members: &[&str] = match kty {
            "EC" => &["crv", "kty", "x", "y"],
            "RSA" => &["e", "kty", "n"],
            "oct" => &["k", "kty"],
            "OKP" => &["crv", "kty", "x"],
            other => return Err(JwkError::UnsupportedKeyType(other.to_string())),
        };

        let mut canonical = Map::new();
        for member in members {
            canonical.insert((*member).to_string(), self.get(member)?.clone());
        }
        let json = serde_json::to_vec(&canonical)?;
        Ok(URL_SAFE_NO_PAD.encode(Sha256::digest(json)))
    }
}

impl TryFrom<Map<String, Value>> for Jwk {
    type Error = JwkError;

    fn try_from(values: Map<String, Value>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Jwk> for Map<String, Value> {
    fn from(jwk: Jwk) -> Self {
        jwk.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn missing_kty_is_rejected() {
        let err = Jwk::new(params(json!({"k": "c2VjcmV0"}))).unwrap_err();
        assert_eq!(err, JwkError::MissingKeyType);
    }

    #[test]
    fn keys_follow_insertion_order() {
        let jwk = Jwk::new(params(json!({"kid": "a", "kty": "oct", "k": "AA", "alg": "HS256"})))
            .unwrap();
        assert_eq!(jwk.keys(), vec!["kid", "kty", "k", "alg"]);
    }

    #[test]
    fn get_reports_missing_parameter() {
        let jwk = Jwk::from_json(r#"{"kty":"oct"}"#).unwrap();
        assert_eq!(
            jwk.get("k").unwrap_err(),
            JwkError::ParameterNotFound("k".to_string())
        );
        assert!(!jwk.has("k"));
    }

    #[test]
    fn key_ops_ignores_non_string_entries() {
        let jwk = Jwk::from_json(r#"{"kty":"oct","key_ops":["sign",3,"verify"]}"#).unwrap();
        assert_eq!(jwk.key_ops(), Some(vec!["sign", "verify"]));

        let jwk = Jwk::from_json(r#"{"kty":"oct"}"#).unwrap();
        assert_eq!(jwk.key_ops(), None);
    }

    #[test]
    fn decode_param_rejects_non_strings() {
        let jwk = Jwk::from_json(r#"{"kty":"oct","k":42}"#).unwrap();
        assert!(matches!(
            jwk.decode_param("k"),
            Err(JwkError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn deserialization_enforces_kty() {
        let err = serde_json::from_str::<Jwk>(r#"{"k":"AA"}"#).unwrap_err();
        assert!(err.to_string().contains("kty"));
    }

    #[test]
    fn serializes_back_to_the_same_object() {
        let json = r#"{"kty":"EC","crv":"P-256","x":"eA","y":"eQ","use":"sig"}"#;
        let jwk = Jwk::from_json(json).unwrap();
        assert_eq!(serde_json::to_string(&jwk).unwrap(), json);
    }

    #[test]
    fn thumbprint_ignores_optional_members_and_order() {
        let a = Jwk::from_json(r#"{"kty":"EC","crv":"P-256","x":"eA","y":"eQ"}"#).unwrap();
        let b = Jwk::from_json(r#"{"y":"eQ","kid":"k1","x":"eA","use":"sig","crv":"P-256","kty":"EC"}"#)
            .unwrap();
        assert_eq!(a.thumbprint().unwrap(), b.thumbprint().unwrap());
    }

    #[test]
    fn thumbprint_requires_members() {
        let jwk = Jwk::from_json(r#"{"kty":"RSA","n":"AQAB"}"#).unwrap();
        assert_eq!(
            jwk.thumbprint().unwrap_err(),
            JwkError::ParameterNotFound("e".to_string())
        );

        let jwk = Jwk::from_json(r#"{"kty":"none"}"#).unwrap();
        assert_eq!(
            jwk.thumbprint().unwrap_err(),
            JwkError::UnsupportedKeyType("none".to_string())
        );
    }
}
