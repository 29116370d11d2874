//! The load pipeline: flatten every source, merge, apply post-merge rules,
//! then bind.
//!
//! Registration order is precedence order. A source registered later wins
//! over every source registered before it.

mod builder;
mod rules;

pub use builder::ConfigLoaderBuilder;
pub use rules::{KeyPromotion, SecondaryFile};

use camino::Utf8PathBuf;
use tracing::debug;

use crate::{Bind, ConfigSource, FlatConfigMap, StrataResult};

/// An ordered set of sources plus the rules applied after merging them.
///
/// A loader holds no mutable state, so one loader may be shared between
/// threads and each call to [`ConfigLoader::merge`] starts from scratch.
///
/// # Examples
///
/// ```
/// use strata_config::{ConfigLoader, SourceFormat};
///
/// let loader = ConfigLoader::builder()
///     .text("a", SourceFormat::Json, r#"{"client": {"apiKey": {"id": "foo"}}}"#)
///     .text("b", SourceFormat::Properties, "client.apiKey.id = bar\nclient.apiKey.secret = baz")
///     .build();
/// let map = loader.merge()?;
/// assert_eq!(map.get_str("client:apiKey:id"), Some(Some("bar")));
/// assert_eq!(map.get_str("client:apiKey:secret"), Some(Some("baz")));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
    promotions: Vec<KeyPromotion>,
    secondary_files: Vec<SecondaryFile>,
    home_dir: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Start assembling a loader.
    #[must_use]
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::new()
    }

    /// Registered sources, lowest precedence first.
    pub fn sources(&self) -> impl Iterator<Item = &dyn ConfigSource> + '_ {
        self.sources.iter().map(|source| &**source)
    }

    /// Flatten and merge every source, then apply promotions and secondary
    /// files in that order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any source or rule. No partially
    /// merged map is ever returned.
    pub fn merge(&self) -> StrataResult<FlatConfigMap> {
        let mut map = FlatConfigMap::new();
        for source in &self.sources {
            let origin = source.origin();
            let entries = source.flatten()?;
            let merged = map.merge_source(&origin, entries)?;
            debug!(
                origin = %origin,
                provenance = %source.provenance(),
                entries = merged,
                "merged configuration source"
            );
        }
        for promotion in &self.promotions {
            promotion.apply(&mut map);
        }
        for secondary in &self.secondary_files {
            secondary.apply(&mut map, self.home_dir.as_deref())?;
        }
        Ok(map)
    }

    /// Merge and bind onto `defaults`.
    ///
    /// # Errors
    ///
    /// Returns any merge error, or [`crate::StrataError::BindType`] when a
    /// merged value does not fit its declared type.
    pub fn load<T: Bind>(&self, defaults: &T) -> StrataResult<T> {
        self.merge()?.bind(defaults)
    }
}
