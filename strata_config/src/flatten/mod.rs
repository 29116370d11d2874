//! Flatteners that turn each source shape into ordered key-path entries.
//!
//! Every flattener feeds a [`FlatEntries`] collector, so a key path produced
//! twice by one source is rejected at the point it is produced. Traversal
//! order is stable: flattening the same input twice yields the same sequence.

mod environment;
mod object;
mod properties;
mod tree;

pub use environment::flatten_environment;
pub use object::{NullPolicy, flatten_object};
pub use properties::flatten_properties;
pub use tree::{TreeNode, flatten_tree};

use std::collections::HashSet;
use std::sync::Arc;

use crate::{KeyPath, StrataError, StrataResult};

/// Leading marker some editors write at the start of UTF-8 files.
pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

/// One flattened configuration value.
///
/// `value` is `None` for an explicit null, which is distinct from the key
/// being absent altogether.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatEntry {
    /// Fully qualified key path.
    pub path: KeyPath,
    /// Scalar text, or `None` for an explicit null.
    pub value: Option<String>,
}

impl FlatEntry {
    /// Construct an entry holding `value`.
    #[must_use]
    pub fn new(path: KeyPath, value: impl Into<String>) -> Self {
        Self {
            path,
            value: Some(value.into()),
        }
    }

    /// Construct an explicit null entry.
    #[must_use]
    pub const fn null(path: KeyPath) -> Self {
        Self { path, value: None }
    }
}

/// Ordered collector that rejects repeated key paths within one source.
///
/// # Examples
///
/// ```
/// use strata_config::{KeyPath, StrataError};
/// use strata_config::flatten::FlatEntries;
///
/// let mut entries = FlatEntries::new("inline");
/// entries.push(KeyPath::parse("foo"), Some("bar".into()))?;
/// let err = entries.push(KeyPath::parse("FOO"), Some("baz".into())).unwrap_err();
/// assert!(matches!(&*err, StrataError::DuplicateKey { key, .. } if key == "FOO"));
/// # Ok::<_, std::sync::Arc<StrataError>>(())
/// ```
#[derive(Debug)]
pub struct FlatEntries {
    origin: String,
    entries: Vec<FlatEntry>,
    seen: HashSet<KeyPath>,
}

impl FlatEntries {
    /// Create an empty collector for the source named `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Name of the source being flattened.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Append an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::DuplicateKey`] when `path` was already pushed
    /// (ignoring ASCII case), and [`StrataError::MalformedSource`] when `path`
    /// is the root and therefore has no key.
    pub fn push(&mut self, path: KeyPath, value: Option<String>) -> StrataResult<()> {
        if path.is_root() {
            return Err(StrataError::malformed(
                self.origin.as_str(),
                "a scalar value has no key",
            ));
        }
        if !self.seen.insert(path.clone()) {
            return Err(self.duplicate(&path));
        }
        self.entries.push(FlatEntry { path, value });
        Ok(())
    }

    /// Finish collecting and return the entries in production order.
    #[must_use]
    pub fn into_entries(self) -> Vec<FlatEntry> {
        self.entries
    }

    fn duplicate(&self, path: &KeyPath) -> Arc<StrataError> {
        StrataError::duplicate_key(self.origin.as_str(), path.to_string())
    }
}
