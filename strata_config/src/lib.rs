//! Layered configuration loading built on a hierarchical key-path merge.
//!
//! Every source is flattened into `(key path, value)` entries, for example
//! `client:apiKey:id = abc`. Sources are merged in registration order so a
//! later source wins, post-merge rules run over the merged map, and the
//! result is bound onto a typed configuration whose absent values are cloned
//! from a defaults tree.
//!
//! ```
//! use strata_config::{ConfigLoader, SourceFormat, bind_section};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct ApiKey {
//!     id: Option<String>,
//!     secret: Option<String>,
//! }
//! bind_section!(ApiKey { id => "id", secret => "secret" });
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Settings {
//!     api_key: ApiKey,
//! }
//! bind_section!(Settings { api_key => "apiKey" });
//!
//! let settings = ConfigLoader::builder()
//!     .text("a", SourceFormat::Yaml, "apiKey:\n  id: foo\n")
//!     .text("b", SourceFormat::Properties, "apiKey.id = bar\napiKey.secret = baz")
//!     .build()
//!     .load(&Settings::default())?;
//! assert_eq!(settings.api_key.id.as_deref(), Some("bar"));
//! assert_eq!(settings.api_key.secret.as_deref(), Some("baz"));
//! # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
//! ```

mod bind;
pub mod client;
mod error;
mod flat_map;
pub mod flatten;
mod key_path;
mod loader;
mod result_ext;
mod source;

pub use bind::{Bind, Leaf, Node, bind_leaf};
pub use error::StrataError;
pub use flat_map::FlatConfigMap;
pub use flatten::FlatEntry;
pub use key_path::{DELIMITER, KeyPath};
pub use loader::{ConfigLoader, ConfigLoaderBuilder, KeyPromotion, SecondaryFile};
pub use result_ext::{StrataResult, StrataResultExt};
pub use source::{
    ConfigSource, EnvSource, FileSource, ObjectSource, Provenance, SourceFormat, TextSource,
    expand_home, parse_tree,
};
