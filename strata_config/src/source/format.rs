//! Format selection and tree-document parsing.

use camino::Utf8Path;

use crate::error::classify_parse_error;
use crate::flatten::{BYTE_ORDER_MARK, TreeNode, flatten_properties, flatten_tree};
use crate::{FlatEntry, KeyPath, StrataError, StrataResult};

/// Syntax of a textual source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SourceFormat {
    /// JSON document.
    Json,
    /// YAML document (requires the `yaml` feature).
    Yaml,
    /// TOML document (requires the `toml` feature).
    Toml,
    /// Line-oriented `key = value` text.
    Properties,
}

impl SourceFormat {
    /// Select the format from a file extension.
    ///
    /// Unknown or missing extensions are treated as TOML.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use strata_config::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_path(Utf8Path::new("app.YML")), SourceFormat::Yaml);
    /// assert_eq!(SourceFormat::from_path(Utf8Path::new("apiKey.properties")), SourceFormat::Properties);
    /// assert_eq!(SourceFormat::from_path(Utf8Path::new(".apprc")), SourceFormat::Toml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            Some("properties") => Self::Properties,
            _ => Self::Toml,
        }
    }

    /// Parse and flatten `text` in this format, prefixing keys with `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::MalformedSource`] or
    /// [`StrataError::DuplicateKey`] when the text cannot be parsed or
    /// repeats a key.
    pub fn flatten(self, text: &str, root: &KeyPath, origin: &str) -> StrataResult<Vec<FlatEntry>> {
        match self {
            Self::Properties => flatten_properties(text, root, origin),
            tree => {
                let document = parse_tree(tree, text, origin)?;
                flatten_tree(&document, root, origin)
            }
        }
    }
}

/// Parse a tree document into a [`TreeNode`].
///
/// # Errors
///
/// Returns [`StrataError::MalformedSource`] for syntax errors, for the
/// `.properties` format (which is not a tree), or when the format's feature is
/// disabled. Parser-detected duplicate keys become
/// [`StrataError::DuplicateKey`].
pub fn parse_tree(format: SourceFormat, text: &str, origin: &str) -> StrataResult<TreeNode> {
    let body = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    match format {
        SourceFormat::Json => {
            if body.trim().is_empty() {
                return Ok(TreeNode::Null);
            }
            serde_json::from_str(body).map_err(|err| classify_parse_error(origin, err))
        }
        SourceFormat::Yaml => parse_yaml(body, origin),
        SourceFormat::Toml => parse_toml(body, origin),
        SourceFormat::Properties => Err(StrataError::malformed(
            origin,
            "properties text is line oriented and has no document tree",
        )),
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(text: &str, origin: &str) -> StrataResult<TreeNode> {
    use serde_saphyr::Options;

    if is_blank_yaml(text) {
        return Ok(TreeNode::Null);
    }
    serde_saphyr::from_str_with_options(
        text,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|err| classify_parse_error(origin, err))
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_text: &str, origin: &str) -> StrataResult<TreeNode> {
    Err(StrataError::malformed(
        origin,
        "yaml feature disabled: enable the 'yaml' feature to support this file format",
    ))
}

/// A document holding only comments, blank lines or a document marker.
#[cfg(feature = "yaml")]
fn is_blank_yaml(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
}

#[cfg(feature = "toml")]
fn parse_toml(text: &str, origin: &str) -> StrataResult<TreeNode> {
    toml::from_str(text).map_err(|err| classify_parse_error(origin, err))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(_text: &str, origin: &str) -> StrataResult<TreeNode> {
    Err(StrataError::malformed(
        origin,
        "toml feature disabled: enable the 'toml' feature to support this file format",
    ))
}
