//! Tree-document flattening shared by JSON, YAML and TOML sources.
//!
//! Documents are first deserialised into the closed [`TreeNode`] shape set
//! through a `deserialize_any` visitor, so every backend that implements
//! `serde::Deserializer` targets the same flattening walk.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use super::FlatEntries;
use crate::{FlatEntry, KeyPath, StrataError, StrataResult};

/// Private key the `toml` crate uses to smuggle datetimes through serde.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Parsed shape of a tree document node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    /// Explicit null: an empty scalar, `~`, `null` or a null tag.
    Null,
    /// Any scalar, rendered to text.
    Scalar(String),
    /// Ordered sequence of nodes.
    Sequence(Vec<TreeNode>),
    /// Mapping in document order. Null keys are stored as empty strings.
    Mapping(Vec<(String, TreeNode)>),
}

/// Flatten a parsed document into entries under `root`.
///
/// Scalars become one entry keyed by their path, nulls become empty strings,
/// and sequence elements are keyed by their zero-based index. A document that
/// is empty produces no entries.
///
/// # Errors
///
/// Returns [`StrataError::DuplicateKey`] when a key path repeats and
/// [`StrataError::MalformedSource`] when the document root is a bare scalar.
///
/// # Examples
///
/// ```
/// use strata_config::KeyPath;
/// use strata_config::flatten::{TreeNode, flatten_tree};
///
/// let doc = TreeNode::Mapping(vec![(
///     "a".into(),
///     TreeNode::Sequence(vec![TreeNode::Scalar("x".into()), TreeNode::Null]),
/// )]);
/// let entries = flatten_tree(&doc, &KeyPath::root(), "inline")?;
/// let rendered: Vec<_> = entries
///     .iter()
///     .map(|e| format!("{}={}", e.path, e.value.as_deref().unwrap_or("<null>")))
///     .collect();
/// assert_eq!(rendered, ["a:0=x", "a:1="]);
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
pub fn flatten_tree(node: &TreeNode, root: &KeyPath, origin: &str) -> StrataResult<Vec<FlatEntry>> {
    let mut out = FlatEntries::new(origin);
    match node {
        TreeNode::Null => {}
        TreeNode::Scalar(_) if root.is_root() => {
            return Err(StrataError::malformed(
                origin,
                "document root must be a mapping or a sequence",
            ));
        }
        other => walk(other, root, &mut out)?,
    }
    Ok(out.into_entries())
}

fn walk(node: &TreeNode, path: &KeyPath, out: &mut FlatEntries) -> StrataResult<()> {
    match node {
        TreeNode::Null => out.push(path.clone(), Some(String::new())),
        TreeNode::Scalar(text) => out.push(path.clone(), Some(text.clone())),
        TreeNode::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(idx, item)| walk(item, &path.child(idx.to_string()), out)),
        TreeNode::Mapping(entries) => entries
            .iter()
            .try_for_each(|(key, value)| walk(value, &path.child(key.as_str()), out)),
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = TreeNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(TreeNode::Scalar(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TreeNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TreeNode::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        TreeNode::deserialize(deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        TreeNode::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<TreeNode>()? {
            items.push(item);
        }
        Ok(TreeNode::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(TreeKey(key)) = map.next_key::<TreeKey>()? {
            let value = map.next_value::<TreeNode>()?;
            entries.push((key, value));
        }
        Ok(unwrap_toml_datetime(entries))
    }
}

fn unwrap_toml_datetime(mut entries: Vec<(String, TreeNode)>) -> TreeNode {
    let is_datetime = matches!(
        entries.as_slice(),
        [(key, TreeNode::Scalar(_))] if key == TOML_DATETIME_KEY
    );
    match entries.pop() {
        Some((_, scalar)) if is_datetime => scalar,
        Some(last) => {
            entries.push(last);
            TreeNode::Mapping(entries)
        }
        None => TreeNode::Mapping(entries),
    }
}

/// Mapping key rendered to a path segment.
struct TreeKey(String);

impl<'de> Deserialize<'de> for TreeKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor).map(TreeKey)
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }
}
