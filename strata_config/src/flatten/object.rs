//! Shape-based flattening of in-memory values.
//!
//! Values arrive as [`serde_json::Value`], which is the closed shape set this
//! walk understands: scalars, sequences and mappings. Structs and maps both
//! serialise to mappings and recurse by key. `serde_json` is built with
//! `preserve_order`, so struct fields are visited in declaration order.

use serde_json::Value;

use super::FlatEntries;
use crate::{FlatEntry, KeyPath, StrataError, StrataResult};

/// How null fields in an object are treated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NullPolicy {
    /// Null fields are absent; lower-precedence values survive.
    #[default]
    Skip,
    /// Null fields produce explicit null entries.
    Keep,
}

/// Flatten an object graph under `root`.
///
/// A null root produces no entries. Lists may only hold scalars (or nulls,
/// which always produce explicit null entries so indices stay contiguous).
///
/// # Errors
///
/// Returns [`StrataError::UnsupportedShape`] when the root is a scalar or a
/// list, or when a list holds a nested list or object, and
/// [`StrataError::DuplicateKey`] when two keys collide ignoring case.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata_config::KeyPath;
/// use strata_config::flatten::{NullPolicy, flatten_object};
///
/// let value = json!({"a": {"b": [1, 2, 3]}});
/// let entries = flatten_object(&value, &KeyPath::root(), NullPolicy::Skip, "object")?;
/// let rendered: Vec<_> = entries
///     .iter()
///     .map(|e| format!("{}={}", e.path, e.value.as_deref().unwrap_or_default()))
///     .collect();
/// assert_eq!(rendered, ["a:b:0=1", "a:b:1=2", "a:b:2=3"]);
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn flatten_object(
    value: &Value,
    root: &KeyPath,
    nulls: NullPolicy,
    origin: &str,
) -> StrataResult<Vec<FlatEntry>> {
    let mut out = FlatEntries::new(origin);
    match value {
        Value::Null => {}
        Value::Object(fields) => {
            for (name, field) in fields {
                walk(field, &root.child(name.as_str()), nulls, &mut out)?;
            }
        }
        Value::Array(_) => {
            return Err(StrataError::unsupported_shape(
                root.to_string(),
                "a list cannot be flattened without a field name",
            ));
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            return Err(StrataError::unsupported_shape(
                root.to_string(),
                "a scalar cannot be flattened without a field name",
            ));
        }
    }
    Ok(out.into_entries())
}

fn walk(value: &Value, path: &KeyPath, nulls: NullPolicy, out: &mut FlatEntries) -> StrataResult<()> {
    match value {
        Value::Null => match nulls {
            NullPolicy::Skip => Ok(()),
            NullPolicy::Keep => out.push(path.clone(), None),
        },
        Value::Object(fields) => fields
            .iter()
            .try_for_each(|(name, field)| walk(field, &path.child(name.as_str()), nulls, out)),
        Value::Array(items) => items.iter().enumerate().try_for_each(|(idx, item)| {
            let item_path = path.child(idx.to_string());
            match item {
                Value::Null => out.push(item_path, None),
                Value::Array(_) | Value::Object(_) => Err(StrataError::unsupported_shape(
                    path.to_string(),
                    "lists may only contain scalar values",
                )),
                scalar => out.push(item_path, scalar_text(scalar)),
            }
        }),
        scalar => out.push(path.clone(), scalar_text(scalar)),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
