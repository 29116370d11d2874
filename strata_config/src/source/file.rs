//! File-backed sources.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::debug;

use super::{ConfigSource, Provenance, SourceFormat};
use crate::{FlatEntry, KeyPath, StrataError, StrataResult};

/// A configuration file, either required or optional.
///
/// Optional files that do not exist contribute no entries. Required files
/// that do not exist fail with [`StrataError::SourceNotFound`] before any
/// parsing is attempted.
///
/// # Examples
///
/// ```rust,no_run
/// use strata_config::{ConfigSource, FileSource, KeyPath};
///
/// let source = FileSource::optional("~/.app/apiKey.properties")
///     .with_root(KeyPath::parse("client"));
/// let entries = source.flatten()?;
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct FileSource {
    path: Utf8PathBuf,
    format: SourceFormat,
    root: KeyPath,
    required: bool,
    home_dir: Option<Utf8PathBuf>,
}

impl FileSource {
    fn new(path: Utf8PathBuf, required: bool) -> Self {
        let format = SourceFormat::from_path(&path);
        Self {
            path,
            format,
            root: KeyPath::root(),
            required,
            home_dir: None,
        }
    }

    /// A file that must exist.
    #[must_use]
    pub fn required(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(path.into(), true)
    }

    /// A file that is skipped when absent.
    #[must_use]
    pub fn optional(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(path.into(), false)
    }

    /// Place every entry under `root`.
    #[must_use]
    pub fn with_root(mut self, root: KeyPath) -> Self {
        self.root = root;
        self
    }

    /// Override the format inferred from the extension.
    #[must_use]
    pub const fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    /// Directory substituted for a leading `~`.
    ///
    /// When unset, the user's home directory is used.
    #[must_use]
    pub fn with_home_dir(mut self, home_dir: impl Into<Utf8PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    /// Use `home_dir` unless a home directory was already chosen.
    pub(crate) fn inherit_home_dir(mut self, home_dir: &Utf8Path) -> Self {
        if self.home_dir.is_none() {
            self.home_dir = Some(home_dir.to_path_buf());
        }
        self
    }

    /// Whether the file must exist.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Path after `~` expansion.
    #[must_use]
    pub fn resolved_path(&self) -> Utf8PathBuf {
        expand_home(&self.path, self.home_dir.as_deref())
    }

    /// Read the file, returning `None` when an optional file is absent.
    fn read(&self, path: &Utf8Path) -> StrataResult<Option<String>> {
        match read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !self.required => {
                debug!(path = %path, "optional configuration file absent");
                Ok(None)
            }
            Err(err) => Err(StrataError::file(path.as_std_path(), err)),
        }
    }
}

impl ConfigSource for FileSource {
    fn origin(&self) -> String {
        self.resolved_path().into_string()
    }

    fn provenance(&self) -> Provenance {
        Provenance::File
    }

    fn flatten(&self) -> StrataResult<Vec<FlatEntry>> {
        let path = self.resolved_path();
        let Some(text) = self.read(&path)? else {
            return Ok(Vec::new());
        };
        self.format.flatten(&text, &self.root, path.as_str())
    }
}

/// Replace a leading `~` with `home_dir`, or the user's home directory.
///
/// Paths without a leading `~`, and paths for which no home directory can be
/// determined, are returned unchanged.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use strata_config::expand_home;
///
/// let home = Utf8Path::new("/home/ada");
/// assert_eq!(expand_home(Utf8Path::new("~/.app/key"), Some(home)), "/home/ada/.app/key");
/// assert_eq!(expand_home(Utf8Path::new("/etc/app"), Some(home)), "/etc/app");
/// ```
#[must_use]
pub fn expand_home(path: &Utf8Path, home_dir: Option<&Utf8Path>) -> Utf8PathBuf {
    let text = path.as_str();
    let rest = if text == "~" {
        ""
    } else if let Some(rest) = text.strip_prefix("~/").or_else(|| text.strip_prefix("~\\")) {
        rest
    } else {
        return path.to_path_buf();
    };
    let home = home_dir
        .map(Utf8Path::to_path_buf)
        .or_else(|| dirs::home_dir().and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok()));
    match home {
        Some(dir) if rest.is_empty() => dir,
        Some(dir) => dir.join(rest),
        None => path.to_path_buf(),
    }
}

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read `path` through a `cap-std` handle on its parent directory.
///
/// Both handles are dropped before this returns, on success and on error.
fn read_to_string(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::other("cannot determine file name for configuration file path")
    })?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    dir.read_to_string(file_name)
}
