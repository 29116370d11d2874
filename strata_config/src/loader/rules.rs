//! Rules applied to the merged map before binding.

use camino::Utf8Path;
use tracing::{debug, info};

use crate::{ConfigSource, FileSource, FlatConfigMap, KeyPath, SourceFormat, StrataResult};

/// Copy a legacy key group into its canonical location.
///
/// Each key is copied on its own and only when the canonical key is absent,
/// so a canonical value always beats its legacy spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPromotion {
    from: KeyPath,
    to: KeyPath,
}

impl KeyPromotion {
    /// Promote keys beneath `from` to the same keys beneath `to`.
    #[must_use]
    pub const fn new(from: KeyPath, to: KeyPath) -> Self {
        Self { from, to }
    }

    /// Apply the promotion, returning how many keys were copied.
    pub fn apply(&self, map: &mut FlatConfigMap) -> usize {
        let mut promoted = 0;
        for (rest, value) in map.subtree(&self.from) {
            let target = KeyPath::join(&self.to, &rest);
            if map.contains(&target) {
                continue;
            }
            debug!(from = %KeyPath::join(&self.from, &rest), to = %target, "promoted legacy key");
            map.insert(&target, value);
            promoted += 1;
        }
        promoted
    }
}

/// Load one more file when a merged key names it.
///
/// The file is required: once the trigger key holds a path, a missing file
/// is an error. Its entries are merged over everything loaded so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecondaryFile {
    trigger: KeyPath,
    root: KeyPath,
    format: Option<SourceFormat>,
}

impl SecondaryFile {
    /// Load the file named by `trigger` with every entry placed beneath `root`.
    ///
    /// The format follows the file extension unless set with
    /// [`SecondaryFile::with_format`].
    #[must_use]
    pub const fn new(trigger: KeyPath, root: KeyPath) -> Self {
        Self {
            trigger,
            root,
            format: None,
        }
    }

    /// Parse the file as `format` whatever its extension.
    #[must_use]
    pub const fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Key whose value names the file.
    #[must_use]
    pub const fn trigger(&self) -> &KeyPath {
        &self.trigger
    }

    /// Apply the rule, returning how many entries the file contributed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::SourceNotFound`] when the named file does
    /// not exist, or any error raised while parsing or merging it.
    pub fn apply(&self, map: &mut FlatConfigMap, home_dir: Option<&Utf8Path>) -> StrataResult<usize> {
        let Some(path) = map
            .get(&self.trigger)
            .flatten()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_owned)
        else {
            return Ok(0);
        };
        let mut source = FileSource::required(path).with_root(self.root.clone());
        if let Some(format) = self.format {
            source = source.with_format(format);
        }
        if let Some(home) = home_dir {
            source = source.with_home_dir(home);
        }
        let origin = source.origin();
        info!(trigger = %self.trigger, path = %origin, "loading secondary configuration file");
        let entries = source.flatten()?;
        map.merge_source(&origin, entries)
    }
}
