//! Builder for [`ConfigLoader`].

use camino::Utf8PathBuf;

use super::{ConfigLoader, KeyPromotion, SecondaryFile};
use crate::{
    ConfigSource, EnvSource, FileSource, KeyPath, ObjectSource, SourceFormat, TextSource,
};

#[derive(Debug)]
enum PendingSource {
    File(FileSource),
    Other(Box<dyn ConfigSource>),
}

/// Collects sources and post-merge rules in precedence order.
///
/// A home directory set with [`ConfigLoaderBuilder::home_dir`] applies to
/// every file registered through the builder, whichever order the calls are
/// made in.
#[derive(Debug, Default)]
pub struct ConfigLoaderBuilder {
    sources: Vec<PendingSource>,
    promotions: Vec<KeyPromotion>,
    secondary_files: Vec<SecondaryFile>,
    home_dir: Option<Utf8PathBuf>,
}

impl ConfigLoaderBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file that must exist.
    #[must_use]
    pub fn file(self, path: impl Into<Utf8PathBuf>) -> Self {
        self.file_source(FileSource::required(path))
    }

    /// Register a file that is skipped when absent.
    #[must_use]
    pub fn optional_file(self, path: impl Into<Utf8PathBuf>) -> Self {
        self.file_source(FileSource::optional(path))
    }

    /// Register a configured file source, for example one with a root.
    #[must_use]
    pub fn file_source(mut self, source: FileSource) -> Self {
        self.sources.push(PendingSource::File(source));
        self
    }

    /// Register an inline document.
    #[must_use]
    pub fn text(
        self,
        name: impl Into<String>,
        format: SourceFormat,
        text: impl Into<String>,
    ) -> Self {
        self.source(TextSource::new(name, format, text))
    }

    /// Register the process environment filtered by `prefix`.
    #[must_use]
    pub fn environment(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.source(EnvSource::new(prefix, separator))
    }

    /// Register explicit name/value pairs treated as environment variables.
    #[must_use]
    pub fn environment_from<I, K, V>(
        self,
        vars: I,
        prefix: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.source(EnvSource::from_vars(vars, prefix, separator))
    }

    /// Register an in-memory object.
    #[must_use]
    pub fn object(self, source: ObjectSource) -> Self {
        self.source(source)
    }

    /// Register any other source.
    #[must_use]
    pub fn source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(PendingSource::Other(Box::new(source)));
        self
    }

    /// Copy keys beneath `from` to the same relative keys beneath `to`
    /// wherever the target is absent.
    #[must_use]
    pub fn promote(mut self, from: &str, to: &str) -> Self {
        self.promotions
            .push(KeyPromotion::new(KeyPath::parse(from), KeyPath::parse(to)));
        self
    }

    /// Load the file named by `trigger`, when set, beneath `root`.
    #[must_use]
    pub fn secondary_file(self, trigger: &str, root: &str) -> Self {
        self.secondary(SecondaryFile::new(KeyPath::parse(trigger), KeyPath::parse(root)))
    }

    /// Register a configured secondary file rule.
    #[must_use]
    pub fn secondary(mut self, rule: SecondaryFile) -> Self {
        self.secondary_files.push(rule);
        self
    }

    /// Directory substituted for a leading `~` in file paths.
    #[must_use]
    pub fn home_dir(mut self, home_dir: impl Into<Utf8PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    /// Finish the loader.
    #[must_use]
    pub fn build(self) -> ConfigLoader {
        let home_dir = self.home_dir;
        let sources = self
            .sources
            .into_iter()
            .map(|pending| match pending {
                PendingSource::File(file) => {
                    let resolved = match home_dir.as_deref() {
                        Some(home) => file.inherit_home_dir(home),
                        None => file,
                    };
                    Box::new(resolved) as Box<dyn ConfigSource>
                }
                PendingSource::Other(source) => source,
            })
            .collect();
        ConfigLoader {
            sources,
            promotions: self.promotions,
            secondary_files: self.secondary_files,
            home_dir,
        }
    }
}
