//! Flattening of environment-style name/value pairs.

use super::FlatEntries;
use crate::{FlatEntry, KeyPath, StrataResult};

/// Flatten `(name, value)` pairs whose names start with `prefix`.
///
/// The prefix match ignores ASCII case; an empty prefix keeps every pair.
/// After the prefix and at most one leading `separator` are stripped, the
/// remaining name is split on `separator` and lowercased, so
/// `APP_CLIENT_APIKEY_ID` with prefix `APP` and separator `_` becomes
/// `client:apikey:id`. Pairs outside the prefix are dropped silently.
///
/// # Errors
///
/// Returns [`crate::StrataError::DuplicateKey`] when two names map to the
/// same key path, for example names that differ only in case.
///
/// # Examples
///
/// ```
/// use strata_config::flatten::flatten_environment;
///
/// let vars = [("FOO_BAR_BAZ", "1"), ("OTHER", "2")];
/// let entries = flatten_environment(vars, "FOO", "_", "environment")?;
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].path.to_string(), "bar:baz");
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn flatten_environment<I, K, V>(
    vars: I,
    prefix: &str,
    separator: &str,
    origin: &str,
) -> StrataResult<Vec<FlatEntry>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut out = FlatEntries::new(origin);
    for (name, value) in vars {
        let Some(path) = key_path_for(name.as_ref(), prefix, separator) else {
            continue;
        };
        out.push(path, Some(value.into()))?;
    }
    Ok(out.into_entries())
}

fn key_path_for(name: &str, prefix: &str, separator: &str) -> Option<KeyPath> {
    let after_prefix = strip_prefix_ignore_case(name, prefix)?;
    let rest = if separator.is_empty() {
        after_prefix
    } else {
        after_prefix.strip_prefix(separator).unwrap_or(after_prefix)
    };
    if rest.is_empty() {
        return None;
    }
    let lowered = rest.to_ascii_lowercase();
    if separator.is_empty() {
        return Some(KeyPath::from_segments([lowered]));
    }
    Some(KeyPath::from_segments(
        lowered.split(&separator.to_ascii_lowercase()),
    ))
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        name.get(prefix.len()..)
    } else {
        None
    }
}
