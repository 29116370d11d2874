//! Constructors for `StrataError` values shared through [`Arc`].

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use super::StrataError;

impl StrataError {
    /// Construct a duplicate key error for `key` produced by `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::StrataError;
    /// let e = StrataError::duplicate_key("app.yaml", "client:apiKey:id");
    /// assert_eq!(e.to_string(), "duplicate key 'client:apiKey:id' in app.yaml");
    /// ```
    #[must_use]
    pub fn duplicate_key(origin: impl Into<String>, key: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::DuplicateKey {
            origin: origin.into(),
            key: key.into(),
        })
    }

    /// Construct a malformed source error wrapping a parser diagnostic.
    #[must_use]
    pub fn malformed(
        origin: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Arc<Self> {
        Arc::new(Self::MalformedSource {
            origin: origin.into(),
            source: source.into(),
        })
    }

    /// Construct a not-found error for a required file.
    #[must_use]
    pub fn not_found(path: &Path) -> Arc<Self> {
        Arc::new(Self::SourceNotFound {
            path: path.to_path_buf(),
        })
    }

    /// Construct an I/O error for `path`, promoting `NotFound` to
    /// [`StrataError::SourceNotFound`].
    #[must_use]
    pub fn file(path: &Path, source: std::io::Error) -> Arc<Self> {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::not_found(path);
        }
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Construct a binding failure for the leaf at `key`.
    #[must_use]
    pub fn bind_type(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::BindType {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        })
    }

    /// Construct an unsupported shape error for the object path `key`.
    #[must_use]
    pub fn unsupported_shape(key: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::UnsupportedShape {
            key: key.into(),
            message: message.into(),
        })
    }

    /// Construct a validation failure for `key`.
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Validation {
            key: key.into(),
            message: message.into(),
        })
    }
}

/// Route a parser diagnostic to the matching error kind.
///
/// YAML and TOML parsers reject repeated mapping keys themselves, before the
/// flattener sees them. Those diagnostics become
/// [`StrataError::DuplicateKey`]; everything else is
/// [`StrataError::MalformedSource`].
pub(crate) fn classify_parse_error<E>(origin: &str, err: E) -> Arc<StrataError>
where
    E: Error + Send + Sync + 'static,
{
    let message = err.to_string();
    match duplicate_key_from_message(&message) {
        Some(key) => StrataError::duplicate_key(origin, key),
        None => StrataError::malformed(origin, err),
    }
}

// Matches the duplicate-key wording of serde-saphyr 0.0.16 ("duplicate
// mapping key `k`") and toml 0.9 ("duplicate key `k`"). Keep the cases in
// error/tests.rs in step when either parser is upgraded.
fn duplicate_key_from_message(message: &str) -> Option<String> {
    let lowered = message.to_ascii_lowercase();
    let marker = ["duplicate mapping key", "duplicate key"]
        .into_iter()
        .find_map(|needle| lowered.find(needle).map(|at| at + needle.len()))?;
    let detail = message
        .get(marker..)
        .unwrap_or_default()
        .trim_start_matches([':', ' ', '`', '\''])
        .lines()
        .next()
        .unwrap_or_default();
    let key = detail
        .split(['`', '\''])
        .next()
        .unwrap_or_default()
        .split(" at ")
        .next()
        .unwrap_or_default()
        .trim();
    if key.is_empty() {
        Some(message.lines().next().unwrap_or(message).to_owned())
    } else {
        Some(key.to_owned())
    }
}
