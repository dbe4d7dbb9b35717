//! Key usage and key algorithm compatibility checks

use cryypt_jwk::Jwk;
use serde_json::Value;

/// Operation a key is about to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    /// Checking a signature
    Verification,
    /// Producing a signature
    Signature,
    /// Encrypting content or wrapping a key
    Encryption,
    /// Decrypting content or unwrapping a key
    Decryption,
}

impl KeyUsage {
    fn use_value(self) -> &'static str {
        match self {
            KeyUsage::Verification | KeyUsage::Signature => "sig",
            KeyUsage::Encryption | KeyUsage::Decryption => "enc",
        }
    }

    fn key_ops_values(self) -> &'static [&'static str] {
        match self {
            KeyUsage::Verification => &["verify"],
            KeyUsage::Signature => &["sign"],
            KeyUsage::Encryption => &["encrypt", "wrapKey"],
            KeyUsage::Decryption => &["decrypt", "unwrapKey"],
        }
    }
}

/// Decides whether a key may be tried for an operation.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait KeyChecker: Send + Sync {
    /// Whether the key's `use` and `key_ops` permit `usage`.
    fn check_usage(&self, key: &Jwk, usage: KeyUsage) -> bool;

    /// Whether the key's `alg`, if any, matches `algorithm`.
    fn check_algorithm(&self, key: &Jwk, algorithm: &str) -> bool;
}

/// [`KeyChecker`] following the `use`, `key_ops` and `alg` key parameters.
///
/// A key without `use` and `key_ops` may be used for anything. When both are
/// present both must permit the operation. A constraint that is present but
/// not a string never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardKeyChecker;

impl KeyChecker for StandardKeyChecker {
    fn check_usage(&self, key: &Jwk, usage: KeyUsage) -> bool {
        let use_ok = declared(key, "use").is_none_or(|value| value == Some(usage.use_value()));
        let ops_ok = key.key_ops().is_none_or(|ops| {
            usage
                .key_ops_values()
                .iter()
                .any(|wanted| ops.contains(wanted))
        });
        use_ok && ops_ok
    }

    fn check_algorithm(&self, key: &Jwk, algorithm: &str) -> bool {
        declared(key, "alg").is_none_or(|alg| alg == Some(algorithm))
    }
}

/// `None` when `name` is absent, `Some(None)` when it is present but not a string.
fn declared<'a>(key: &'a Jwk, name: &str) -> Option<Option<&'a str>> {
    key.get(name).ok().map(Value::as_str)
}
