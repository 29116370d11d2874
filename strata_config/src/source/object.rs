//! In-memory object source.

use serde::Serialize;
use serde_json::Value;

use super::{ConfigSource, Provenance};
use crate::flatten::{NullPolicy, flatten_object};
use crate::{FlatEntry, KeyPath, StrataResult, StrataResultExt};

/// A snapshot of an in-memory value, flattened by shape.
///
/// The value is captured when the source is built, so later changes to the
/// original object are not observed.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata_config::{ConfigSource, ObjectSource};
///
/// let source = ObjectSource::from_value(json!({"client": {"apiKey": {"id": "abc"}}}));
/// let entries = source.flatten()?;
/// assert_eq!(entries[0].path.to_string(), "client:apiKey:id");
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ObjectSource {
    value: Value,
    root: KeyPath,
    nulls: NullPolicy,
    name: String,
}

impl ObjectSource {
    /// Snapshot any serialisable value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::UnsupportedShape`] when the value cannot
    /// be serialised, for example a map with non-string keys.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> StrataResult<Self> {
        serde_json::to_value(value).into_strata().map(Self::from_value)
    }

    /// Wrap an existing JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self {
            value,
            root: KeyPath::root(),
            nulls: NullPolicy::Skip,
            name: String::from("object"),
        }
    }

    /// Emit null fields as explicit null entries instead of skipping them.
    #[must_use]
    pub const fn keep_nulls(mut self) -> Self {
        self.nulls = NullPolicy::Keep;
        self
    }

    /// Place every entry under `root`.
    #[must_use]
    pub fn with_root(mut self, root: KeyPath) -> Self {
        self.root = root;
        self
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl ConfigSource for ObjectSource {
    fn origin(&self) -> String {
        self.name.clone()
    }

    fn provenance(&self) -> Provenance {
        Provenance::Object
    }

    fn flatten(&self) -> StrataResult<Vec<FlatEntry>> {
        flatten_object(&self.value, &self.root, self.nulls, &self.name)
    }
}
