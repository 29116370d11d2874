//! Inline document source.

use super::{ConfigSource, Provenance, SourceFormat};
use crate::{FlatEntry, KeyPath, StrataResult};

/// A document held in memory, such as an embedded defaults file.
///
/// # Examples
///
/// ```
/// use strata_config::{ConfigSource, SourceFormat, TextSource};
///
/// let source = TextSource::new("inline", SourceFormat::Json, r#"{"a": {"b": 1}}"#);
/// let entries = source.flatten()?;
/// assert_eq!(entries[0].path.to_string(), "a:b");
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct TextSource {
    name: String,
    format: SourceFormat,
    text: String,
    root: KeyPath,
}

impl TextSource {
    /// Create a source named `name` holding `text` in `format`.
    #[must_use]
    pub fn new(name: impl Into<String>, format: SourceFormat, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format,
            text: text.into(),
            root: KeyPath::root(),
        }
    }

    /// Place every entry under `root`.
    #[must_use]
    pub fn with_root(mut self, root: KeyPath) -> Self {
        self.root = root;
        self
    }
}

impl ConfigSource for TextSource {
    fn origin(&self) -> String {
        self.name.clone()
    }

    fn provenance(&self) -> Provenance {
        Provenance::Inline
    }

    fn flatten(&self) -> StrataResult<Vec<FlatEntry>> {
        self.format.flatten(&self.text, &self.root, &self.name)
    }
}
