//! Flat key representation shared by every source and by the binder.
//!
//! A [`KeyPath`] is an ordered sequence of segments. Its serialised form
//! joins the segments with [`DELIMITER`], so `client`, `apiKey`, `id` renders
//! as `client:apiKey:id`. Comparison, ordering and hashing ignore ASCII case.
//!
//! Flatteners thread a `KeyPath` through their recursive calls and derive
//! child paths with [`KeyPath::child`], so no shared traversal stack exists.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical delimiter between key path segments.
pub const DELIMITER: char = ':';

/// Ordered sequence of key segments.
///
/// The empty path is the root of a document. A blank segment is valid and
/// distinct from a missing one; it represents a null mapping key.
///
/// # Examples
///
/// ```
/// use strata_config::KeyPath;
///
/// let path = KeyPath::parse("client").child("apiKey").child("id");
/// assert_eq!(path.to_string(), "client:apiKey:id");
/// assert_eq!(path, KeyPath::parse("CLIENT:APIKEY:ID"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty root path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Split a serialised path on [`DELIMITER`].
    ///
    /// An empty string parses to the root path.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self {
            segments: text.split(DELIMITER).map(str::to_owned).collect(),
        }
    }

    /// Build a path from pre-split segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Prepend `parent` to this path.
    ///
    /// Used to namespace a whole source, for example placing every entry of a
    /// `.properties` file under `client`.
    #[must_use]
    pub fn join(parent: &Self, child: &Self) -> Self {
        Self {
            segments: parent
                .segments
                .iter()
                .chain(child.segments.iter())
                .cloned()
                .collect(),
        }
    }

    /// Return the remainder of this path after `prefix`, if it starts with it.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Self) -> Option<Self> {
        let head = self.segments.get(..prefix.segments.len())?;
        let matches = head
            .iter()
            .zip(&prefix.segments)
            .all(|(a, b)| a.eq_ignore_ascii_case(b));
        if !matches {
            return None;
        }
        Some(Self {
            segments: self.segments.get(prefix.segments.len()..)?.to_vec(),
        })
    }

    /// Whether this is the root path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments. Same as [`KeyPath::is_root`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Borrow the segments in root-to-leaf order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, "{DELIMITER}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl PartialEq for KeyPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for KeyPath {}

impl Hash for KeyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.len().hash(state);
        for segment in &self.segments {
            for byte in segment.bytes() {
                state.write_u8(byte.to_ascii_lowercase());
            }
            state.write_u8(0xff);
        }
    }
}

impl Ord for KeyPath {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.segments.iter().zip(&other.segments) {
            let ordering = a
                .bytes()
                .map(|byte| byte.to_ascii_lowercase())
                .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.segments.len().cmp(&other.segments.len())
    }
}

impl PartialOrd for KeyPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
