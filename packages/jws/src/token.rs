//! JWS token representation and compact serialization

use crate::error::{JwsError, JwsResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Map, Value};

/// A decoded JSON Web Signature with a single signature.
///
/// The encoded protected header and payload are kept exactly as received,
/// because the signature covers those bytes and not a re-serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Jws {
    protected: Map<String, Value>,
    unprotected: Map<String, Value>,
    headers: Map<String, Value>,
    encoded_protected: String,
    encoded_payload: String,
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl Jws {
    /// Build a token from its encoded header, encoded payload and raw signature.
    ///
    /// An empty `encoded_payload` denotes a detached payload.
    ///
    /// # Errors
    /// Returns [`JwsError::InvalidToken`] when the header is not a base64url
    /// encoded JSON object or the payload is not base64url.
    pub fn from_parts(
        encoded_protected: impl Into<String>,
        encoded_payload: impl Into<String>,
        signature: Vec<u8>,
    ) -> JwsResult<Self> {
        let encoded_protected = encoded_protected.into();
        let encoded_payload = encoded_payload.into();

        let protected = if encoded_protected.is_empty() {
            Map::new()
        } else {
            let raw = URL_SAFE_NO_PAD
                .decode(&encoded_protected)
                .map_err(|_| JwsError::invalid_token("Invalid header encoding"))?;
            match serde_json::from_slice(&raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => return Err(JwsError::invalid_token("Header is not a JSON object")),
                Err(_) => return Err(JwsError::invalid_token("Invalid header JSON")),
            }
        };

        let payload = URL_SAFE_NO_PAD
            .decode(&encoded_payload)
            .map_err(|_| JwsError::invalid_token("Invalid payload encoding"))?;

        Ok(Self {
            headers: protected.clone(),
            protected,
            unprotected: Map::new(),
            encoded_protected,
            encoded_payload,
            payload,
            signature,
        })
    }

    /// Parse the compact serialization `header.payload.signature`.
    ///
    /// # Errors
    /// Returns [`JwsError::InvalidToken`] when the input does not have three
    /// parts or any part fails to decode.
    pub fn from_compact(token: &str) -> JwsResult<Self> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(JwsError::invalid_token("Invalid JWS format"));
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| JwsError::invalid_token("Invalid signature encoding"))?;

        Self::from_parts(header, payload, signature)
    }

    /// Attach unprotected header parameters.
    ///
    /// Protected parameters win when a name appears in both.
    #[must_use]
    pub fn with_unprotected_headers(mut self, unprotected: Map<String, Value>) -> Self {
        let mut headers = unprotected.clone();
        for (name, value) in &self.protected {
            headers.insert(name.clone(), value.clone());
        }
        self.unprotected = unprotected;
        self.headers = headers;
        self
    }

    /// Base64url encode a header map the way it appears on the wire.
    ///
    /// # Errors
    /// Returns an error when the map cannot be serialized.
    pub fn encode_headers(headers: &Map<String, Value>) -> JwsResult<String> {
        let json = serde_json::to_vec(headers)
            .map_err(|e| JwsError::InvalidToken(format!("Header serialization failed: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Base64url encode a payload.
    #[must_use]
    pub fn encode_payload(payload: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(payload)
    }

    /// The bytes a signature covers: `encoded header "." payload`.
    ///
    /// `detached_payload`, when given, replaces the embedded encoded payload
    /// verbatim.
    #[must_use]
    pub fn signing_input(&self, detached_payload: Option<&str>) -> String {
        let payload = detached_payload.unwrap_or(&self.encoded_payload);
        let mut input = String::with_capacity(self.encoded_protected.len() + 1 + payload.len());
        input.push_str(&self.encoded_protected);
        input.push('.');
        input.push_str(payload);
        input
    }

    /// Compact serialization of this token.
    #[must_use]
    pub fn to_compact(&self) -> String {
        format!(
            "{}.{}",
            self.signing_input(None),
            URL_SAFE_NO_PAD.encode(&self.signature)
        )
    }

    /// All header parameters, protected and unprotected.
    #[must_use]
    pub fn headers(&self) -> &Map<String, Value> {
        &self.headers
    }

    /// Protected header parameters.
    #[must_use]
    pub fn protected_headers(&self) -> &Map<String, Value> {
        &self.protected
    }

    /// Unprotected header parameters.
    #[must_use]
    pub fn unprotected_headers(&self) -> &Map<String, Value> {
        &self.unprotected
    }

    /// Protected header as encoded on the wire.
    #[must_use]
    pub fn encoded_protected_headers(&self) -> &str {
        &self.encoded_protected
    }

    /// Payload as encoded on the wire; empty when detached.
    #[must_use]
    pub fn encoded_payload(&self) -> &str {
        &self.encoded_payload
    }

    /// Decoded payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether the token embeds a non-empty payload.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        !self.encoded_payload.is_empty()
    }

    /// Raw signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test header must be an object"),
        }
    }

    #[test]
    fn compact_round_trip_keeps_wire_bytes() {
        // whitespace in the header must survive untouched
        let encoded_header = URL_SAFE_NO_PAD.encode(br#"{"alg": "HS256"}"#);
        let token = format!("{encoded_header}.aGVsbG8.c2ln");
        let jws = Jws::from_compact(&token).unwrap();

        assert_eq!(jws.encoded_protected_headers(), encoded_header);
        assert_eq!(jws.payload(), b"hello");
        assert_eq!(jws.signature(), b"sig");
        assert_eq!(jws.headers().get("alg"), Some(&json!("HS256")));
        assert_eq!(jws.to_compact(), token);
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert!(matches!(
            Jws::from_compact("a.b"),
            Err(JwsError::InvalidToken(_))
        ));
        assert!(matches!(
            Jws::from_compact("a.b.c.d"),
            Err(JwsError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_non_object_header() {
        let encoded = URL_SAFE_NO_PAD.encode(b"[1,2]");
        assert!(matches!(
            Jws::from_parts(encoded, "", vec![]),
            Err(JwsError::InvalidToken(_))
        ));
    }

    #[test]
    fn detached_token_has_no_payload() {
        let encoded = Jws::encode_headers(&header(json!({"alg": "HS256"}))).unwrap();
        let jws = Jws::from_parts(encoded.clone(), "", vec![1]).unwrap();

        assert!(!jws.has_payload());
        assert_eq!(jws.signing_input(Some("ZGF0YQ")), format!("{encoded}.ZGF0YQ"));
    }

    #[test]
    fn protected_headers_override_unprotected() {
        let encoded = Jws::encode_headers(&header(json!({"alg": "HS256"}))).unwrap();
        let jws = Jws::from_parts(encoded, "", vec![])
            .unwrap()
            .with_unprotected_headers(header(json!({"alg": "none", "kid": "k1"})));

        assert_eq!(jws.headers().get("alg"), Some(&json!("HS256")));
        assert_eq!(jws.headers().get("kid"), Some(&json!("k1")));
        assert!(!jws.protected_headers().contains_key("kid"));
        assert_eq!(jws.unprotected_headers().len(), 2);
    }
}
