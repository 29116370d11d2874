//! Rebuild typed configuration from a [`FlatConfigMap`] and a defaults tree.
//!
//! Every schema type implements [`Bind`]. A binder looks up the keys that
//! belong to it beneath a [`Node`] and takes anything absent from the
//! `fallback` value by cloning it, so the defaults tree is never shared with
//! or mutated through the bound result.
//!
//! Sections are usually implemented with [`bind_section!`](crate::bind_section)
//! and enumerations with [`leaf_enum!`](crate::leaf_enum):
//!
//! ```
//! use strata_config::{FlatConfigMap, FlatEntry, KeyPath, bind_section, leaf_enum};
//!
//! #[derive(Clone, Debug, Default, PartialEq, Eq)]
//! enum Scheme {
//!     #[default]
//!     Digest,
//!     Basic,
//! }
//! leaf_enum!(Scheme { Digest => "DIGEST", Basic => "BASIC" });
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Client {
//!     timeout: u32,
//!     scheme: Scheme,
//!     base_url: Option<String>,
//! }
//! bind_section!(Client {
//!     timeout => "connectionTimeout",
//!     scheme => "authenticationScheme",
//!     base_url => "baseUrl",
//! });
//!
//! let mut map = FlatConfigMap::new();
//! map.merge_source("env", vec![FlatEntry::new(KeyPath::parse("authenticationscheme"), "basic")])?;
//! let defaults = Client { timeout: 30, ..Client::default() };
//! let client = map.bind(&defaults)?;
//! assert_eq!(client, Client { timeout: 30, scheme: Scheme::Basic, base_url: None });
//! # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
//! ```

mod collections;
mod leaf;

pub use leaf::{Leaf, bind_leaf};

use crate::{FlatConfigMap, KeyPath, StrataResult};

/// A type that can be rebuilt from flattened configuration.
pub trait Bind: Sized + Clone {
    /// Build a value from the keys beneath `node`, cloning from `fallback`
    /// whatever is absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::BindType`] when a present value cannot be
    /// converted to the declared type. Absent values are never an error.
    fn bind(node: &Node<'_>, fallback: &Self) -> StrataResult<Self>;
}

/// A position in a [`FlatConfigMap`] during binding.
#[derive(Clone, Debug)]
pub struct Node<'a> {
    map: &'a FlatConfigMap,
    path: KeyPath,
}

impl<'a> Node<'a> {
    /// The root of `map`.
    #[must_use]
    pub const fn root(map: &'a FlatConfigMap) -> Self {
        Self {
            map,
            path: KeyPath::root(),
        }
    }

    /// The node one segment below this one.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self {
            map: self.map,
            path: self.path.child(segment),
        }
    }

    /// Full key path of this node.
    #[must_use]
    pub const fn path(&self) -> &KeyPath {
        &self.path
    }

    /// Scalar stored exactly at this node, if any.
    #[must_use]
    pub fn value(&self) -> Option<Option<&'a str>> {
        self.map.get(&self.path)
    }

    /// Whether this node or anything beneath it holds a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.map.has_subtree(&self.path)
    }

    /// Distinct segments directly beneath this node.
    #[must_use]
    pub fn child_segments(&self) -> Vec<String> {
        self.map.child_segments(&self.path)
    }

    /// Bind the field stored under `name`.
    ///
    /// # Errors
    ///
    /// Propagates the field's binding error.
    pub fn field<T: Bind>(&self, name: &str, fallback: &T) -> StrataResult<T> {
        T::bind(&self.child(name), fallback)
    }
}

/// Implement [`Bind`](crate::Bind) for a struct section by naming the key of every field.
///
/// Each field binds beneath `<section path>:<key>` and falls back to the
/// same field of the fallback value. Every field must be listed.
#[macro_export]
macro_rules! bind_section {
    ($ty:ty { $($field:ident => $key:literal),* $(,)? }) => {
        impl $crate::Bind for $ty {
            fn bind(
                node: &$crate::Node<'_>,
                fallback: &Self,
            ) -> $crate::StrataResult<Self> {
                ::core::result::Result::Ok(Self {
                    $($field: node.field($key, &fallback.$field)?,)*
                })
            }
        }
    };
}

/// Implement [`Leaf`](crate::Leaf) and [`Bind`](crate::Bind) for a fieldless enum.
///
/// Variant names match without regard to ASCII case after trimming.
#[macro_export]
macro_rules! leaf_enum {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::Leaf for $ty {
            fn parse_leaf(raw: &str) -> ::core::result::Result<Self, ::std::string::String> {
                let text = raw.trim();
                $(
                    if text.eq_ignore_ascii_case($name) {
                        return ::core::result::Result::Ok(Self::$variant);
                    }
                )+
                ::core::result::Result::Err(::std::format!(
                    "expected one of {}",
                    [$($name),+].join(", ")
                ))
            }
        }

        impl $crate::Bind for $ty {
            fn bind(
                node: &$crate::Node<'_>,
                fallback: &Self,
            ) -> $crate::StrataResult<Self> {
                $crate::bind_leaf(node, fallback)
            }
        }
    };
}
