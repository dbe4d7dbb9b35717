//! HMAC-based JWS algorithms (HS256, HS384, HS512)

use super::{SignatureAlgorithm, Verification};
use crate::error::{JwsError, JwsResult};
use cryypt_jwk::Jwk;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

/// HMAC with a SHA-2 digest, keyed by an `oct` JWK.
///
/// Keys shorter than the digest output are refused, as RFC 7518 section 3.2
/// requires: at least 32 bytes for HS256, 48 for HS384 and 64 for HS512.
/// Verification treats a shorter key as incompatible, so tokens minted by
/// issuers that accept short secrets do not verify here. [`HmacAlgorithm::sign`]
/// rejects such keys with [`JwsError::InvalidKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacAlgorithm {
    digest: Digest,
}

impl HmacAlgorithm {
    /// HMAC using SHA-256
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            digest: Digest::Sha256,
        }
    }

    /// HMAC using SHA-384
    #[must_use]
    pub fn hs384() -> Self {
        Self {
            digest: Digest::Sha384,
        }
    }

    /// HMAC using SHA-512
    #[must_use]
    pub fn hs512() -> Self {
        Self {
            digest: Digest::Sha512,
        }
    }

    fn min_key_len(self) -> usize {
        match self.digest {
            Digest::Sha256 => 32,
            Digest::Sha384 => 48,
            Digest::Sha512 => 64,
        }
    }

    fn secret(self, key: &Jwk) -> Result<Vec<u8>, String> {
        if key.key_type() != Some("oct") {
            return Err(format!("{} requires an oct key", self.name()));
        }
        let secret = key.decode_param("k").map_err(|e| e.to_string())?;
        if secret.len() < self.min_key_len() {
            return Err(format!(
                "HMAC key for {} must be at least {} bytes, got {}",
                self.name(),
                self.min_key_len(),
                secret.len()
            ));
        }
        Ok(secret)
    }

    fn mac(self, secret: &[u8], input: &[u8]) -> Result<Vec<u8>, String> {
        match self.digest {
            Digest::Sha256 => compute::<HmacSha256>(secret, input),
            Digest::Sha384 => compute::<HmacSha384>(secret, input),
            Digest::Sha512 => compute::<HmacSha512>(secret, input),
        }
    }

    /// Compute the MAC of `input` with `key`.
    ///
    /// # Errors
    /// Returns [`JwsError::InvalidKey`] when `key` is not a usable `oct` key.
    pub fn sign(&self, key: &Jwk, input: &[u8]) -> JwsResult<Vec<u8>> {
        let secret = self.secret(key).map_err(JwsError::InvalidKey)?;
        self.mac(&secret, input).map_err(JwsError::InvalidKey)
    }
}

impl SignatureAlgorithm for HmacAlgorithm {
    fn name(&self) -> &str {
        match self.digest {
            Digest::Sha256 => "HS256",
            Digest::Sha384 => "HS384",
            Digest::Sha512 => "HS512",
        }
    }

    fn verify(&self, key: &Jwk, input: &[u8], signature: &[u8]) -> Verification {
        let secret = match self.secret(key) {
            Ok(secret) => secret,
            Err(reason) => return Verification::IncompatibleKey(reason),
        };
        let expected = match self.mac(&secret, input) {
            Ok(expected) => expected,
            Err(reason) => return Verification::IncompatibleKey(reason),
        };
        if bool::from(expected.as_slice().ct_eq(signature)) {
            Verification::Valid
        } else {
            Verification::Invalid
        }
    }
}

fn compute<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Result<Vec<u8>, String> {
    let mut mac =
        <M as Mac>::new_from_slice(secret).map_err(|_| "Invalid HMAC key".to_string())?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

    fn oct_key(secret: &[u8]) -> Jwk {
        Jwk::from_json(&format!(
            r#"{{"kty":"oct","k":"{}"}}"#,
            URL_SAFE_NO_PAD.encode(secret)
        ))
        .unwrap()
    }

    #[test]
    fn sign_then_verify() {
        let key = oct_key(&[7u8; 64]);
        for alg in [
            HmacAlgorithm::hs256(),
            HmacAlgorithm::hs384(),
            HmacAlgorithm::hs512(),
        ] {
            let sig = alg.sign(&key, b"header.payload").unwrap();
            assert_eq!(sig.len(), alg.min_key_len());
            assert_eq!(alg.verify(&key, b"header.payload", &sig), Verification::Valid);
            assert_eq!(alg.verify(&key, b"header.payloaD", &sig), Verification::Invalid);
        }
    }

    #[test]
    fn truncated_signature_is_invalid() {
        let key = oct_key(&[1u8; 32]);
        let alg = HmacAlgorithm::hs256();
        let sig = alg.sign(&key, b"input").unwrap();
        assert_eq!(alg.verify(&key, b"input", &sig[..31]), Verification::Invalid);
    }

    #[test]
    fn short_key_is_incompatible() {
        let key = oct_key(&[1u8; 31]);
        assert!(matches!(
            HmacAlgorithm::hs256().verify(&key, b"input", &[0u8; 32]),
            Verification::IncompatibleKey(_)
        ));
        assert!(matches!(
            HmacAlgorithm::hs256().sign(&key, b"input"),
            Err(JwsError::InvalidKey(_))
        ));

        for (alg, len) in [
            (HmacAlgorithm::hs256(), 32),
            (HmacAlgorithm::hs384(), 48),
            (HmacAlgorithm::hs512(), 64),
        ] {
            assert!(alg.sign(&oct_key(&vec![7u8; len]), b"input").is_ok());
            assert!(alg.sign(&oct_key(&vec![7u8; len - 1]), b"input").is_err());
        }
    }

    #[test]
    fn non_oct_key_is_incompatible() {
        let key = Jwk::from_json(r#"{"kty":"RSA","n":"AQ","e":"AQAB"}"#).unwrap();
        assert!(matches!(
            HmacAlgorithm::hs256().verify(&key, b"input", &[0u8; 32]),
            Verification::IncompatibleKey(_)
        ));
    }
}
