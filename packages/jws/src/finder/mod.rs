//! Key discovery from token headers
//!
//! A [`KeyFinder`] turns a token's headers into candidate keys. Finders are
//! combined with [`KeyFinderChain`], which keeps the order of its members.

mod embedded;
mod key_set;
mod none;

pub use embedded::EmbeddedJwkFinder;
pub use key_set::KeySetFinder;
pub use none::NoneKeyFinder;

use cryypt_jwk::{Jwk, KeyTypeMask};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Source of candidate keys for a token.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait KeyFinder: Send + Sync {
    /// Keys matching `headers` whose kind is admitted by `mask`, in trial order.
    fn find(&self, headers: &Map<String, Value>, mask: KeyTypeMask) -> Vec<Jwk>;
}

/// Ordered composition of finders; results are concatenated.
#[derive(Clone, Default)]
pub struct KeyFinderChain {
    finders: Vec<Arc<dyn KeyFinder>>,
}

impl KeyFinderChain {
    /// Create an empty chain that finds nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finder.
    #[must_use]
    pub fn with_finder(mut self, finder: impl KeyFinder + 'static) -> Self {
        self.finders.push(Arc::new(finder));
        self
    }

    /// Number of finders in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.finders.len()
    }

    /// Whether the chain has no finders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }
}

impl KeyFinder for KeyFinderChain {
    fn find(&self, headers: &Map<String, Value>, mask: KeyTypeMask) -> Vec<Jwk> {
        self.finders
            .iter()
            .flat_map(|finder| finder.find(headers, mask))
            .collect()
    }
}

impl std::fmt::Debug for KeyFinderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyFinderChain")
            .field("finders", &self.finders.len())
            .finish()
    }
}
