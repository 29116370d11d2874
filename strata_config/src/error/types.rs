//! Primary error enum for configuration loading flows.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
///
/// Every variant is fatal: the pipeline stops at the first error and never
/// returns a partially merged configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// The same fully qualified key path was produced twice by one source.
    ///
    /// Also raised by the `.properties` flattener when a raw key already
    /// contains the canonical `:` delimiter.
    #[error("duplicate key '{key}' in {origin}")]
    DuplicateKey {
        /// Source that produced the duplicate.
        origin: String,
        /// Offending key path, or the raw key for `.properties` input.
        key: String,
    },

    /// A source document or line could not be parsed at all.
    #[error("malformed configuration in {origin}: {source}")]
    MalformedSource {
        /// Source that failed to parse.
        origin: String,
        /// Underlying parser diagnostic.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A required file source does not exist.
    #[error("configuration file '{}' not found", path.display())]
    SourceNotFound {
        /// Resolved path of the missing file.
        path: PathBuf,
    },

    /// A scalar could not be converted to its declared type during binding.
    #[error("cannot bind '{value}' at '{key}': {message}")]
    BindType {
        /// Key path of the offending leaf.
        key: String,
        /// Raw text that failed to convert.
        value: String,
        /// Human-readable explanation of the conversion failure.
        message: String,
    },

    /// An in-memory object contained a shape the flattener does not handle.
    #[error("unsupported shape at '{key}': {message}")]
    UnsupportedShape {
        /// Key path where the shape was encountered (empty at the root).
        key: String,
        /// Description of the unsupported shape.
        message: String,
    },

    /// I/O failure while reading a configuration file.
    #[error("configuration file error in '{}': {source}", path.display())]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Validation failures in a bound configuration.
    #[error("validation failed for '{key}': {message}")]
    Validation {
        /// Configuration key that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },
}
