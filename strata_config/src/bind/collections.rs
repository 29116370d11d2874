//! Dictionaries and lists.

use std::collections::BTreeMap;

use crate::StrataResult;

use super::{Bind, Node};

/// Dictionaries are all or nothing: any key beneath the field replaces the
/// whole fallback dictionary.
impl<V: Bind + Default> Bind for BTreeMap<String, V> {
    fn bind(node: &Node<'_>, fallback: &Self) -> StrataResult<Self> {
        let keys = node.child_segments();
        if keys.is_empty() {
            return Ok(fallback.clone());
        }
        keys.into_iter()
            .map(|key| {
                let value = V::bind(&node.child(&key), &V::default())?;
                Ok((key, value))
            })
            .collect()
    }
}

/// Lists read contiguous indices from `0` and stop at the first gap. The
/// fallback list is used only when index `0` is absent.
impl<V: Bind + Default> Bind for Vec<V> {
    fn bind(node: &Node<'_>, fallback: &Self) -> StrataResult<Self> {
        if !node.child("0").is_present() {
            return Ok(fallback.clone());
        }
        (0_usize..)
            .map(|index| node.child(&index.to_string()))
            .take_while(Node::is_present)
            .map(|element| V::bind(&element, &V::default()))
            .collect()
    }
}
