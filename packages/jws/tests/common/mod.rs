//! Shared fixtures for the verification integration tests

#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use cryypt_jwk::{Jwk, JwkSet, KeyTypeMask};
use cryypt_jws::{
    AlgorithmManager, HmacAlgorithm, Jws, KeyFinder, NoClaimsChecks, SignatureAlgorithm, Verifier,
};
use hex_literal::hex;
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};

pub const SECRET_A: [u8; 32] =
    hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
pub const SECRET_B: [u8; 32] =
    hex!("f0e1d2c3b4a5968778695a4b3c2d1e0ff0e1d2c3b4a5968778695a4b3c2d1e0f");

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// `oct` key for `secret` with the extra parameters in `extra`.
pub fn oct_key(secret: &[u8], extra: Value) -> Jwk {
    let mut values = object(json!({"kty": "oct", "k": URL_SAFE_NO_PAD.encode(secret)}));
    values.extend(object(extra));
    Jwk::new(values).expect("oct key")
}

pub fn key_set(keys: Vec<Jwk>) -> JwkSet {
    JwkSet::new(keys)
}

/// Token signed with `algorithm` over `header` and `payload`.
pub fn hmac_token(algorithm: HmacAlgorithm, key: &Jwk, header: Value, payload: &[u8]) -> Jws {
    let encoded_header = Jws::encode_headers(&object(header)).expect("header");
    let encoded_payload = Jws::encode_payload(payload);
    let input = format!("{encoded_header}.{encoded_payload}");
    let signature = algorithm.sign(key, input.as_bytes()).expect("signature");
    Jws::from_parts(encoded_header, encoded_payload, signature).expect("token")
}

pub fn hs256_token(key: &Jwk, payload: &[u8]) -> Jws {
    hmac_token(HmacAlgorithm::hs256(), key, json!({"alg": "HS256"}), payload)
}

/// Token signed over a detached payload; the token itself embeds nothing.
pub fn detached_hs256_token(key: &Jwk, payload: &[u8]) -> (Jws, String) {
    let encoded_header = Jws::encode_headers(&object(json!({"alg": "HS256"}))).expect("header");
    let encoded_payload = Jws::encode_payload(payload);
    let input = format!("{encoded_header}.{encoded_payload}");
    let signature = HmacAlgorithm::hs256()
        .sign(key, input.as_bytes())
        .expect("signature");
    let jws = Jws::from_parts(encoded_header, "", signature).expect("token");
    (jws, encoded_payload)
}

/// Same token with one bit of the signature flipped.
pub fn flip_signature_bit(jws: &Jws) -> Jws {
    let mut signature = jws.signature().to_vec();
    signature[0] ^= 0x01;
    Jws::from_parts(
        jws.encoded_protected_headers(),
        jws.encoded_payload(),
        signature,
    )
    .expect("token")
}

/// Finder returning fixed keys and remembering the masks it was asked for.
#[derive(Default)]
pub struct RecordingFinder {
    keys: Vec<Jwk>,
    masks: Mutex<Vec<KeyTypeMask>>,
}

impl RecordingFinder {
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self {
            keys,
            masks: Mutex::new(Vec::new()),
        }
    }

    pub fn masks(&self) -> Vec<KeyTypeMask> {
        self.masks.lock().expect("lock").clone()
    }
}

impl KeyFinder for RecordingFinder {
    fn find(&self, _headers: &Map<String, Value>, mask: KeyTypeMask) -> Vec<Jwk> {
        self.masks.lock().expect("lock").push(mask);
        self.keys.clone()
    }
}

/// Algorithm that is registered but cannot verify.
pub struct SignOnlyAlgorithm;

impl SignatureAlgorithm for SignOnlyAlgorithm {
    fn name(&self) -> &str {
        "SIGN-ONLY"
    }

    fn supports_verification(&self) -> bool {
        false
    }

    fn verify(&self, _key: &Jwk, _input: &[u8], _signature: &[u8]) -> cryypt_jws::Verification {
        cryypt_jws::Verification::Invalid
    }
}

pub fn verifier_with_finder(finder: Arc<dyn KeyFinder>) -> Verifier {
    Verifier::new(
        Arc::new(AlgorithmManager::default()),
        finder,
        Arc::new(NoClaimsChecks),
    )
}

pub fn verifier() -> Verifier {
    verifier_with_finder(Arc::new(RecordingFinder::default()))
}
