//! Line-oriented `.properties` flattening.
//!
//! Each non-comment line holds `key = value`. Dots in the key become path
//! delimiters, so `apiKey.id = abc` flattens to `apiKey:id`.

use super::{BYTE_ORDER_MARK, FlatEntries};
use crate::{DELIMITER, FlatEntry, KeyPath, StrataError, StrataResult};

/// Flatten `.properties` text, prefixing every key with `root`.
///
/// Blank lines and lines whose first non-blank character is `#` or `!` are
/// skipped. The first `=` not preceded by a backslash splits the key from the
/// value; both sides are trimmed.
///
/// # Errors
///
/// - [`StrataError::MalformedSource`] for a line without `=` or with an empty
///   key, carrying the raw line.
/// - [`StrataError::DuplicateKey`] when a key repeats, or when a raw key
///   already contains the `:` delimiter.
///
/// # Examples
///
/// ```
/// use strata_config::KeyPath;
/// use strata_config::flatten::flatten_properties;
///
/// let entries = flatten_properties("# creds\napiKey.id = abc\n", &KeyPath::parse("client"), "apiKey.properties")?;
/// assert_eq!(entries[0].path.to_string(), "client:apiKey:id");
/// assert_eq!(entries[0].value.as_deref(), Some("abc"));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn flatten_properties(text: &str, root: &KeyPath, origin: &str) -> StrataResult<Vec<FlatEntry>> {
    let mut out = FlatEntries::new(origin);
    let body = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    for (idx, raw_line) in body.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }
        let Some((raw_key, raw_value)) = split_line(line) else {
            return Err(malformed_line(origin, idx, raw_line, "expected 'key = value'"));
        };
        let key = raw_key.trim();
        if key.is_empty() {
            return Err(malformed_line(origin, idx, raw_line, "missing key"));
        }
        // A literal delimiter would be indistinguishable from a rewritten dot.
        if key.contains(DELIMITER) {
            return Err(StrataError::duplicate_key(origin, key));
        }
        let path = KeyPath::join(root, &KeyPath::from_segments(key.split('.')));
        out.push(path, Some(raw_value.trim().to_owned()))?;
    }
    Ok(out.into_entries())
}

/// Split at the first unescaped `=`, unescaping the key.
fn split_line(line: &str) -> Option<(String, &str)> {
    let mut key = String::new();
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        if escaped {
            key.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' => return Some((key, line.get(idx + 1..)?)),
            other => key.push(other),
        }
    }
    None
}

fn malformed_line(
    origin: &str,
    idx: usize,
    raw_line: &str,
    reason: &str,
) -> std::sync::Arc<StrataError> {
    StrataError::malformed(
        origin,
        format!("line {}: {reason}: '{raw_line}'", idx + 1),
    )
}
