//! RSA-based JWS algorithms (RS256/384/512 and PS256/384/512)

use super::{SignatureAlgorithm, Verification};
use cryypt_jwk::Jwk;
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::Verifier;
use rsa::{BigUint, RsaPublicKey, pkcs1v15, pss};

// A signature that does not even parse is a mismatch, not a key problem.
macro_rules! check {
    ($scheme:ident, $digest:ty, $key:expr, $input:expr, $signature:expr) => {{
        let verifying_key = $scheme::VerifyingKey::<$digest>::new($key);
        $scheme::Signature::try_from($signature)
            .is_ok_and(|signature| verifying_key.verify($input, &signature).is_ok())
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Padding {
    Pkcs1v15,
    Pss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

/// RSA signature verification from an `RSA` JWK (`n`, `e`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaAlgorithm {
    padding: Padding,
    digest: Digest,
}

impl RsaAlgorithm {
    /// RSASSA-PKCS1-v1_5 using SHA-256
    #[must_use]
    pub fn rs256() -> Self {
        Self::new(Padding::Pkcs1v15, Digest::Sha256)
    }

    /// RSASSA-PKCS1-v1_5 using SHA-384
    #[must_use]
    pub fn rs384() -> Self {
        Self::new(Padding::Pkcs1v15, Digest::Sha384)
    }

    /// RSASSA-PKCS1-v1_5 using SHA-512
    #[must_use]
    pub fn rs512() -> Self {
        Self::new(Padding::Pkcs1v15, Digest::Sha512)
    }

    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    #[must_use]
    pub fn ps256() -> Self {
        Self::new(Padding::Pss, Digest::Sha256)
    }

    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    #[must_use]
    pub fn ps384() -> Self {
        Self::new(Padding::Pss, Digest::Sha384)
    }

    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    #[must_use]
    pub fn ps512() -> Self {
        Self::new(Padding::Pss, Digest::Sha512)
    }

    fn new(padding: Padding, digest: Digest) -> Self {
        Self { padding, digest }
    }

    fn public_key(&self, key: &Jwk) -> Result<RsaPublicKey, String> {
        if key.key_type() != Some("RSA") {
            return Err(format!("{} requires an RSA key", self.name()));
        }
        let n = key.decode_param("n").map_err(|e| e.to_string())?;
        let e = key.decode_param("e").map_err(|e| e.to_string())?;
        RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e))
            .map_err(|e| format!("Invalid RSA public key: {e}"))
    }
}

impl SignatureAlgorithm for RsaAlgorithm {
    fn name(&self) -> &str {
        match (self.padding, self.digest) {
            (Padding::Pkcs1v15, Digest::Sha256) => "RS256",
            (Padding::Pkcs1v15, Digest::Sha384) => "RS384",
            (Padding::Pkcs1v15, Digest::Sha512) => "RS512",
            (Padding::Pss, Digest::Sha256) => "PS256",
            (Padding::Pss, Digest::Sha384) => "PS384",
            (Padding::Pss, Digest::Sha512) => "PS512",
        }
    }

    fn verify(&self, key: &Jwk, input: &[u8], signature: &[u8]) -> Verification {
        let public_key = match self.public_key(key) {
            Ok(public_key) => public_key,
            Err(reason) => return Verification::IncompatibleKey(reason),
        };

        let matched = match (self.padding, self.digest) {
            (Padding::Pkcs1v15, Digest::Sha256) => {
                check!(pkcs1v15, Sha256, public_key, input, signature)
            }
            (Padding::Pkcs1v15, Digest::Sha384) => {
                check!(pkcs1v15, Sha384, public_key, input, signature)
            }
            (Padding::Pkcs1v15, Digest::Sha512) => {
                check!(pkcs1v15, Sha512, public_key, input, signature)
            }
            (Padding::Pss, Digest::Sha256) => check!(pss, Sha256, public_key, input, signature),
            (Padding::Pss, Digest::Sha384) => check!(pss, Sha384, public_key, input, signature),
            (Padding::Pss, Digest::Sha512) => check!(pss, Sha512, public_key, input, signature),
        };

        if matched {
            Verification::Valid
        } else {
            Verification::Invalid
        }
    }
}
