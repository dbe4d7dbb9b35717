//! Ordered JSON Web Key Set

use crate::error::Result;
use crate::jwk::Jwk;
use serde::{Deserialize, Serialize};

/// Ordered collection of [`Jwk`]s.
///
/// Keys keep the order they were supplied in; nothing is deduplicated or
/// sorted, since callers rely on that order for trial precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    keys: Vec<Jwk>,
}

impl JwkSet {
    /// Create a set from keys in trial order.
    #[must_use]
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    /// Parse a set from its `{"keys": [...]}` JSON form.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or when any key lacks `kty`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of keys.
    #[must_use]
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in order.
    #[must_use]
    pub fn keys(&self) -> &[Jwk] {
        &self.keys
    }

    /// Key at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Jwk> {
        self.keys.get(index)
    }

    /// Iterate keys in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Jwk> {
        self.keys.iter()
    }

    /// Keys whose `kid` equals `kid`, in order.
    pub fn find_by_kid<'a>(&'a self, kid: &'a str) -> impl Iterator<Item = &'a Jwk> + 'a {
        self.keys.iter().filter(move |jwk| jwk.key_id() == Some(kid))
    }
}

impl From<Vec<Jwk>> for JwkSet {
    fn from(keys: Vec<Jwk>) -> Self {
        Self::new(keys)
    }
}

impl FromIterator<Jwk> for JwkSet {
    fn from_iter<I: IntoIterator<Item = Jwk>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a JwkSet {
    type Item = &'a Jwk;
    type IntoIter = std::slice::Iter<'a, Jwk>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl IntoIterator for JwkSet {
    type Item = Jwk;
    type IntoIter = std::vec::IntoIter<Jwk>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_duplicates_and_order() {
        let a = Jwk::from_json(r#"{"kty":"oct","kid":"a"}"#).unwrap();
        let b = Jwk::from_json(r#"{"kty":"oct","kid":"b"}"#).unwrap();
        let set = JwkSet::new(vec![b.clone(), a.clone(), b.clone()]);

        assert_eq!(set.count(), 3);
        let kids: Vec<_> = set.iter().filter_map(Jwk::key_id).collect();
        assert_eq!(kids, vec!["b", "a", "b"]);
        assert_eq!(set.find_by_kid("b").count(), 2);
    }

    #[test]
    fn parses_rfc7517_set() {
        let set = JwkSet::from_json(
            r#"{"keys":[{"kty":"EC","crv":"P-256","x":"eA","y":"eQ","kid":"1"},{"kty":"oct","k":"AA"}]}"#,
        )
        .unwrap();
        assert_eq!(set.count(), 2);
        assert_eq!(set.get(0).and_then(Jwk::key_id), Some("1"));
        assert_eq!(set.get(1).and_then(Jwk::key_type), Some("oct"));
    }

    #[test]
    fn rejects_set_with_key_missing_kty() {
        assert!(JwkSet::from_json(r#"{"keys":[{"k":"AA"}]}"#).is_err());
    }

    #[test]
    fn empty_set() {
        let set = JwkSet::default();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert!(set.keys().is_empty());
    }
}
