//! Scalar leaves and their text conversions.

use crate::{StrataError, StrataResult};

use super::{Bind, Node};

/// A scalar that can be parsed from the text of one flat entry.
pub trait Leaf: Clone {
    /// Whether blank text is a legitimate value rather than "no value".
    ///
    /// Non-textual leaves treat blank or null entries as absent and keep the
    /// fallback.
    const TEXTUAL: bool = false;

    /// Convert raw entry text.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when `raw` is not a valid value.
    fn parse_leaf(raw: &str) -> Result<Self, String>;
}

/// Bind a scalar leaf at `node`, cloning `fallback` when it is absent.
///
/// An explicit null binds to the empty string for textual leaves and to the
/// fallback otherwise.
///
/// # Errors
///
/// Returns [`StrataError::BindType`] naming the node's path when the stored
/// text does not parse.
pub fn bind_leaf<T: Leaf>(node: &Node<'_>, fallback: &T) -> StrataResult<T> {
    match node.value() {
        Some(Some(raw)) if T::TEXTUAL || !raw.trim().is_empty() => parse_at(node, raw),
        Some(None) if T::TEXTUAL => parse_at(node, ""),
        _ => Ok(fallback.clone()),
    }
}

fn parse_at<T: Leaf>(node: &Node<'_>, raw: &str) -> StrataResult<T> {
    T::parse_leaf(raw).map_err(|message| StrataError::bind_type(node.path().to_string(), raw, message))
}

impl<T: Leaf> Bind for Option<T> {
    fn bind(node: &Node<'_>, fallback: &Self) -> StrataResult<Self> {
        match node.value() {
            None => Ok(fallback.clone()),
            Some(None) => Ok(None),
            Some(Some(raw)) if !T::TEXTUAL && raw.trim().is_empty() => Ok(None),
            Some(Some(raw)) => parse_at(node, raw).map(Some),
        }
    }
}

impl Leaf for String {
    const TEXTUAL: bool = true;

    fn parse_leaf(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }
}

impl Leaf for bool {
    fn parse_leaf(raw: &str) -> Result<Self, String> {
        let text = raw.trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err("expected true or false".to_owned())
        }
    }
}

macro_rules! parsed_leaf {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Leaf for $ty {
                fn parse_leaf(raw: &str) -> Result<Self, String> {
                    raw.trim().parse().map_err(|err| format!("{err}"))
                }
            }
        )+
    };
}

parsed_leaf!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

macro_rules! leaf_bind {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Bind for $ty {
                fn bind(node: &Node<'_>, fallback: &Self) -> StrataResult<Self> {
                    bind_leaf(node, fallback)
                }
            }
        )+
    };
}

leaf_bind!(String, bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
