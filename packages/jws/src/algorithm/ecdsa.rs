//! ECDSA-based JWS algorithms (ES256, ES384)
//!
//! Signatures are the fixed-width `r || s` concatenation from RFC 7518,
//! not DER.

use super::{SignatureAlgorithm, Verification};
use cryypt_jwk::Jwk;
use p256::ecdsa::signature::Verifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Curve {
    P256,
    P384,
}

impl Curve {
    fn jwk_name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
        }
    }

    fn coordinate_len(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
        }
    }
}

/// ECDSA verification from an `EC` JWK (`crv`, `x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaAlgorithm {
    curve: Curve,
}

impl EcdsaAlgorithm {
    /// ECDSA using P-256 and SHA-256
    #[must_use]
    pub fn es256() -> Self {
        Self { curve: Curve::P256 }
    }

    /// ECDSA using P-384 and SHA-384
    #[must_use]
    pub fn es384() -> Self {
        Self { curve: Curve::P384 }
    }

    fn coordinates(&self, key: &Jwk) -> Result<(Vec<u8>, Vec<u8>), String> {
        if key.key_type() != Some("EC") {
            return Err(format!("{} requires an EC key", self.name()));
        }
        let crv = key.get_str("crv");
        if crv != Some(self.curve.jwk_name()) {
            return Err(format!(
                "{} requires curve {}, key uses {}",
                self.name(),
                self.curve.jwk_name(),
                crv.unwrap_or("no curve")
            ));
        }

        let x = key.decode_param("x").map_err(|e| e.to_string())?;
        let y = key.decode_param("y").map_err(|e| e.to_string())?;
        let len = self.curve.coordinate_len();
        if x.len() != len || y.len() != len {
            return Err(format!(
                "EC coordinates for {} must be {len} bytes",
                self.curve.jwk_name()
            ));
        }
        Ok((x, y))
    }
}

impl SignatureAlgorithm for EcdsaAlgorithm {
    fn name(&self) -> &str {
        match self.curve {
            Curve::P256 => "ES256",
            Curve::P384 => "ES384",
        }
    }

    fn verify(&self, key: &Jwk, input: &[u8], signature: &[u8]) -> Verification {
        let (x, y) = match self.coordinates(key) {
            Ok(coordinates) => coordinates,
            Err(reason) => return Verification::IncompatibleKey(reason),
        };

        let outcome = match self.curve {
            Curve::P256 => verify_p256(&x, &y, input, signature),
            Curve::P384 => verify_p384(&x, &y, input, signature),
        };

        match outcome {
            Ok(true) => Verification::Valid,
            Ok(false) => Verification::Invalid,
            Err(reason) => Verification::IncompatibleKey(reason),
        }
    }
}

/// `Err` when the point is not on the curve; `Ok(false)` on any signature problem.
fn verify_p256(x: &[u8], y: &[u8], input: &[u8], signature: &[u8]) -> Result<bool, String> {
    use p256::ecdsa::{Signature, VerifyingKey};
    use p256::{EncodedPoint, FieldBytes};

    let point = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(x),
        FieldBytes::from_slice(y),
        false,
    );
    let verifying_key = VerifyingKey::from_encoded_point(&point)
        .map_err(|_| "Invalid EC public key for ES256".to_string())?;

    Ok(Signature::from_slice(signature)
        .is_ok_and(|signature| verifying_key.verify(input, &signature).is_ok()))
}

fn verify_p384(x: &[u8], y: &[u8], input: &[u8], signature: &[u8]) -> Result<bool, String> {
    use p384::ecdsa::{Signature, VerifyingKey};
    use p384::{EncodedPoint, FieldBytes};

    let point = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(x),
        FieldBytes::from_slice(y),
        false,
    );
    let verifying_key = VerifyingKey::from_encoded_point(&point)
        .map_err(|_| "Invalid EC public key for ES384".to_string())?;

    Ok(Signature::from_slice(signature)
        .is_ok_and(|signature| verifying_key.verify(input, &signature).is_ok()))
}
