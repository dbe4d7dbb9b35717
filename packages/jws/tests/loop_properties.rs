//! Property tests for the verification decision loop

mod common;

use common::*;
use cryypt_jwk::JwkSet;
use cryypt_jws::{HmacAlgorithm, Jws, JwsError};
use proptest::prelude::*;
use serde_json::json;

fn header_alg() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("HS256".to_string()),
        Just("none".to_string()),
        "[A-Z]{2}[0-9]{3}",
    ]
}

proptest! {
    #[test]
    fn empty_key_set_never_verifies(
        alg in header_alg(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let key = oct_key(&SECRET_A, json!({}));
        let jws = hmac_token(HmacAlgorithm::hs256(), &key, json!({"alg": alg}), &payload);

        prop_assert_eq!(verifier().verify(&jws, Some(&JwkSet::default()), None), Ok(false));
        prop_assert_eq!(verifier().verify(&jws, None, None), Ok(false));
    }

    #[test]
    fn detached_and_embedded_payload_is_ambiguous(
        payload in prop::collection::vec(any::<u8>(), 1..64),
        detached in "[A-Za-z0-9_-]{0,32}",
    ) {
        let key = oct_key(&SECRET_A, json!({}));
        let jws = hs256_token(&key, &payload);

        prop_assert_eq!(
            verifier().verify(&jws, Some(&key_set(vec![key])), Some(&detached)),
            Err(JwsError::AmbiguousPayload)
        );
    }

    #[test]
    fn any_flipped_signature_bit_fails(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        bit in 0usize..256,
    ) {
        let key = oct_key(&SECRET_A, json!({}));
        let keys = key_set(vec![key.clone()]);
        let jws = hs256_token(&key, &payload);
        prop_assert_eq!(verifier().verify(&jws, Some(&keys), None), Ok(true));

        let mut signature = jws.signature().to_vec();
        signature[bit / 8] ^= 1 << (bit % 8);
        let forged = Jws::from_parts(
            jws.encoded_protected_headers(),
            jws.encoded_payload(),
            signature,
        )
        .unwrap();
        prop_assert_eq!(verifier().verify(&forged, Some(&keys), None), Ok(false));
    }
}
