//! Configuration sources and the formats they understand.
//!
//! A source knows where its data lives and which flattener to apply. The
//! merge engine only ever sees the flattened entries, in the order the
//! sources were registered.

mod environment;
mod file;
mod format;
mod object;
mod text;

pub use environment::EnvSource;
pub use file::{FileSource, expand_home};
pub use format::{SourceFormat, parse_tree};
pub use object::ObjectSource;
pub use text::TextSource;

use std::fmt;

use crate::{FlatEntry, StrataResult};

/// Where a source's values came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Provenance {
    /// Values loaded from a configuration file.
    File,
    /// Values supplied as an in-memory document.
    Inline,
    /// Values collected from environment variables.
    Environment,
    /// Values flattened from an in-memory object.
    Object,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Inline => "inline",
            Self::Environment => "environment",
            Self::Object => "object",
        })
    }
}

/// One origin of configuration data.
///
/// Implementations must be deterministic: flattening twice yields the same
/// entries in the same order.
pub trait ConfigSource: fmt::Debug + Send + Sync {
    /// Human-readable name used in diagnostics.
    fn origin(&self) -> String;

    /// Category of the source.
    fn provenance(&self) -> Provenance;

    /// Produce the flattened entries for this source.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::StrataError`] when the source cannot be read,
    /// parsed or flattened.
    fn flatten(&self) -> StrataResult<Vec<FlatEntry>>;
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn origin(&self) -> String {
        (**self).origin()
    }

    fn provenance(&self) -> Provenance {
        (**self).provenance()
    }

    fn flatten(&self) -> StrataResult<Vec<FlatEntry>> {
        (**self).flatten()
    }
}

#[cfg(test)]
mod tests;
