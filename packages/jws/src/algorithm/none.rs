//! The unsecured `none` algorithm (RFC 7518 section 3.6)

use super::{SignatureAlgorithm, Verification};
use cryypt_jwk::Jwk;

/// Accepts an empty signature made with a `{"kty":"none"}` key.
///
/// Never part of the default registry; register it explicitly when unsecured
/// tokens are acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoneAlgorithm;

impl SignatureAlgorithm for NoneAlgorithm {
    fn name(&self) -> &str {
        "none"
    }

    fn verify(&self, key: &Jwk, _input: &[u8], signature: &[u8]) -> Verification {
        if key.key_type() != Some("none") {
            return Verification::IncompatibleKey("none requires a none key".to_string());
        }
        if signature.is_empty() {
            Verification::Valid
        } else {
            Verification::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_none_keys_and_empty_signatures() {
        let none = Jwk::from_json(r#"{"kty":"none"}"#).unwrap();
        let oct = Jwk::from_json(r#"{"kty":"oct","k":"AA"}"#).unwrap();

        assert_eq!(NoneAlgorithm.verify(&none, b"x", b""), Verification::Valid);
        assert_eq!(NoneAlgorithm.verify(&none, b"x", b"sig"), Verification::Invalid);
        assert!(matches!(
            NoneAlgorithm.verify(&oct, b"x", b""),
            Verification::IncompatibleKey(_)
        ));
    }
}
