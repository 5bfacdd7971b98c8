//! Foreign-key exclusion map built from `--dont-follow-fk` tokens.
//!
//! A token is either `field` (excluded in every collection) or
//! `collection:field` (excluded only in that collection). The map always
//! carries the [`WILDCARD_KEY`] entry, possibly empty.

use serde::Serialize;
use std::collections::BTreeMap;

/// Sentinel collection key meaning "any collection".
pub const WILDCARD_KEY: &str = "__ANY__";

/// Two-level lookup: collection (or wildcard) -> field -> excluded marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExclusionMap {
    entries: BTreeMap<String, BTreeMap<String, bool>>,
}

impl Default for ExclusionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionMap {
    /// Creates a map holding only the empty wildcard entry.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(WILDCARD_KEY.to_string(), BTreeMap::new());
        Self { entries }
    }

    /// Builds the map from raw tokens, in order.
    ///
    /// Splitting happens on the first `:` only, so `a:b:c` excludes field
    /// `b:c` in collection `a`. Names are accepted verbatim.
    ///
    /// # Example
    /// ```rust
    /// use mongoschema_core::exclusion::{ExclusionMap, WILDCARD_KEY};
    ///
    /// let map = ExclusionMap::from_tokens(["owner", "posts:authorId"]);
    /// assert!(map.fields(WILDCARD_KEY).is_some_and(|f| f.contains_key("owner")));
    /// assert!(map.is_excluded("posts", "authorId"));
    /// assert!(!map.is_excluded("comments", "authorId"));
    /// ```
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for token in tokens {
            map.insert_token(token.as_ref());
        }
        map
    }

    /// Records a single `field` or `collection:field` token.
    pub fn insert_token(&mut self, token: &str) {
        let (collection, field) = token.split_once(':').unwrap_or((WILDCARD_KEY, token));
        tracing::trace!("Excluding foreign key '{}' in '{}'", field, collection);
        self.entries
            .entry(collection.to_string())
            .or_default()
            .insert(field.to_string(), true);
    }

    /// Fields excluded under `collection` (use [`WILDCARD_KEY`] for the
    /// collection-independent entries).
    pub fn fields(&self, collection: &str) -> Option<&BTreeMap<String, bool>> {
        self.entries.get(collection)
    }

    /// Whether following `field` as a foreign key in `collection` is suppressed,
    /// either specifically or through the wildcard entry.
    pub fn is_excluded(&self, collection: &str, field: &str) -> bool {
        [collection, WILDCARD_KEY].iter().any(|key| {
            self.entries
                .get(*key)
                .and_then(|fields| fields.get(field))
                .copied()
                .unwrap_or(false)
        })
    }

    /// Iterates collection keys, including the wildcard.
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
