//! The merge target: an ordered, case-insensitive map of key paths to values.
//!
//! Sources are merged in registration order. Within one source a repeated key
//! path is fatal; across sources the later source silently wins.

use std::collections::{BTreeMap, HashSet};

use uncased::{Uncased, UncasedStr};

use crate::bind::{Bind, Node};
use crate::{DELIMITER, FlatEntry, KeyPath, StrataError, StrataResult};

/// Flattened configuration produced by merging every source.
///
/// Keys are serialised [`KeyPath`]s compared without regard to ASCII case.
/// The spelling of the first insertion is the one reported back.
///
/// # Examples
///
/// ```
/// use strata_config::{FlatConfigMap, FlatEntry, KeyPath};
///
/// let mut map = FlatConfigMap::new();
/// map.merge_source("a", vec![FlatEntry::new(KeyPath::parse("client:apiKey:id"), "foo")])?;
/// map.merge_source("b", vec![FlatEntry::new(KeyPath::parse("CLIENT:APIKEY:ID"), "bar")])?;
/// assert_eq!(map.get_str("client:apiKey:id"), Some(Some("bar")));
/// assert_eq!(map.iter().next(), Some(("client:apiKey:id", Some("bar"))));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatConfigMap {
    entries: BTreeMap<Uncased<'static>, Option<String>>,
}

impl FlatConfigMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Look up `path`.
    ///
    /// The outer `Option` reports presence; the inner one distinguishes an
    /// explicit null from a value.
    #[must_use]
    pub fn get(&self, path: &KeyPath) -> Option<Option<&str>> {
        self.get_str(&path.to_string())
    }

    /// Look up a serialised key path such as `client:apiKey:id`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .get(UncasedStr::new(key))
            .map(Option::as_deref)
    }

    /// Whether `path` holds a value or an explicit null.
    #[must_use]
    pub fn contains(&self, path: &KeyPath) -> bool {
        self.entries
            .contains_key(UncasedStr::new(&path.to_string()))
    }

    /// Insert or overwrite `path`, returning the previous value if any.
    pub fn insert(&mut self, path: &KeyPath, value: Option<String>) -> Option<Option<String>> {
        self.entries.insert(Uncased::from(path.to_string()), value)
    }

    /// Merge one source's entries over the current contents.
    ///
    /// Returns the number of entries merged.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::DuplicateKey`] naming the first key path that
    /// `entries` produces twice. Nothing is merged in that case.
    pub fn merge_source(&mut self, origin: &str, entries: Vec<FlatEntry>) -> StrataResult<usize> {
        let mut seen = HashSet::with_capacity(entries.len());
        if let Some(repeat) = entries.iter().find(|entry| !seen.insert(&entry.path)) {
            return Err(StrataError::duplicate_key(origin, repeat.path.to_string()));
        }
        let count = entries.len();
        for FlatEntry { path, value } in entries {
            self.insert(&path, value);
        }
        Ok(count)
    }

    /// Whether any key equals `prefix` or lies beneath it.
    ///
    /// Every key lies beneath the root, so for the root this reports whether
    /// the map is non-empty.
    #[must_use]
    pub fn has_subtree(&self, prefix: &KeyPath) -> bool {
        let base = prefix.to_string();
        self.entries.keys().any(|key| {
            key.as_str().eq_ignore_ascii_case(&base) || relative(key.as_str(), &base).is_some()
        })
    }

    /// Distinct first-level segments directly beneath `prefix`.
    ///
    /// Segments are deduplicated without regard to case and reported in map
    /// order using the first spelling seen.
    #[must_use]
    pub fn child_segments(&self, prefix: &KeyPath) -> Vec<String> {
        let base = prefix.to_string();
        let mut seen = HashSet::new();
        self.entries
            .keys()
            .filter_map(|key| relative(key.as_str(), &base))
            .map(|rest| rest.split(DELIMITER).next().unwrap_or(rest))
            .filter(|segment| seen.insert(segment.to_ascii_lowercase()))
            .map(str::to_owned)
            .collect()
    }

    /// Every entry strictly beneath `prefix`, keyed relative to it.
    #[must_use]
    pub fn subtree(&self, prefix: &KeyPath) -> Vec<(KeyPath, Option<String>)> {
        let base = prefix.to_string();
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                relative(key.as_str(), &base).map(|rest| (KeyPath::parse(rest), value.clone()))
            })
            .collect()
    }

    /// Iterate over serialised keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bind this map onto a typed configuration, falling back to `defaults`.
    ///
    /// `defaults` is only read; every value taken from it is cloned.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::BindType`] naming the first leaf whose text
    /// cannot be converted to its declared type.
    pub fn bind<T: Bind>(&self, defaults: &T) -> StrataResult<T> {
        T::bind(&Node::root(self), defaults)
    }
}

/// Remainder of `key` after `prefix` and one delimiter, when `key` lies
/// strictly beneath `prefix`.
fn relative<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    if prefix.is_empty() {
        return (!key.is_empty()).then_some(key);
    }
    let head = key.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    key.get(prefix.len()..)?.strip_prefix(DELIMITER)
}
