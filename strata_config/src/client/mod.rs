//! Client configuration built on the generic pipeline.
//!
//! [`ClientConfigLoader`] registers the standard file, environment and
//! override sources, then binds the result onto [`ClientConfiguration`]
//! against the shared [`defaults`].

mod defaults;
mod loader;
mod schema;
mod validate;

pub use defaults::{DEFAULT_BASE_URL, defaults};
pub use loader::{API_KEY_FILE_KEY, ClientConfigLoader, ENV_PREFIX, ENV_SEPARATOR};
pub use schema::{
    ApiKeySettings, ApplicationSettings, AuthenticationScheme, CacheManagerSettings,
    CacheSettings, ClientConfiguration, ClientSettings, OAuth2Settings, ProxySettings,
    RouteSettings, WebSettings,
};
pub use validate::validate;
