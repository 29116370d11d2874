//! Typed client configuration.
//!
//! Field names serialise in camelCase, which is also the spelling of their
//! flat keys, so `client.api_key.id` binds from `client:apiKey:id`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{bind_section, leaf_enum};

/// Complete client configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientConfiguration {
    /// API client settings.
    pub client: ClientSettings,
    /// The application this client acts for.
    pub application: ApplicationSettings,
    /// Web integration routes.
    pub web: WebSettings,
}

bind_section!(ClientConfiguration {
    client => "client",
    application => "application",
    web => "web",
});

/// Connection, credential and caching settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// API key credentials.
    pub api_key: ApiKeySettings,
    /// Response cache.
    pub cache_manager: CacheManagerSettings,
    /// Base URL of the API.
    pub base_url: String,
    /// Connection timeout in seconds.
    pub connection_timeout: u32,
    /// Request signing scheme.
    pub authentication_scheme: AuthenticationScheme,
    /// Outbound HTTP proxy.
    pub proxy: ProxySettings,
}

bind_section!(ClientSettings {
    api_key => "apiKey",
    cache_manager => "cacheManager",
    base_url => "baseUrl",
    connection_timeout => "connectionTimeout",
    authentication_scheme => "authenticationScheme",
    proxy => "proxy",
});

/// API key credentials, or the file that holds them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ApiKeySettings {
    /// Path to a `.properties` file with `apiKey.id` and `apiKey.secret`.
    pub file: Option<String>,
    /// API key identifier.
    pub id: Option<String>,
    /// API key secret.
    pub secret: Option<String>,
}

bind_section!(ApiKeySettings {
    file => "file",
    id => "id",
    secret => "secret",
});

/// Response cache settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheManagerSettings {
    /// Whether responses are cached at all.
    pub enabled: bool,
    /// Default time to live, in seconds.
    pub default_ttl: u64,
    /// Default time to idle, in seconds.
    pub default_tti: u64,
    /// Per-region overrides keyed by region name.
    pub caches: BTreeMap<String, CacheSettings>,
}

bind_section!(CacheManagerSettings {
    enabled => "enabled",
    default_ttl => "defaultTtl",
    default_tti => "defaultTti",
    caches => "caches",
});

/// Expiry overrides for one cache region.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheSettings {
    /// Time to live, in seconds.
    pub ttl: Option<u64>,
    /// Time to idle, in seconds.
    pub tti: Option<u64>,
}

bind_section!(CacheSettings { ttl => "ttl", tti => "tti" });

/// Request signing scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AuthenticationScheme {
    /// Digest-based request signing.
    #[default]
    #[serde(rename = "SAUTHC1")]
    Sauthc1,
    /// HTTP basic authentication.
    #[serde(rename = "BASIC")]
    Basic,
}

leaf_enum!(AuthenticationScheme {
    Sauthc1 => "SAUTHC1",
    Basic => "BASIC",
});

/// Outbound HTTP proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProxySettings {
    /// Proxy port.
    pub port: Option<u16>,
    /// Proxy host name.
    pub host: Option<String>,
    /// Proxy user.
    pub username: Option<String>,
    /// Proxy password.
    pub password: Option<String>,
}

bind_section!(ProxySettings {
    port => "port",
    host => "host",
    username => "username",
    password => "password",
});

/// Application identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationSettings {
    /// Application name.
    pub name: Option<String>,
    /// Application resource URL.
    pub href: Option<String>,
}

bind_section!(ApplicationSettings {
    name => "name",
    href => "href",
});

/// Web integration settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSettings {
    /// Prefix for every route.
    pub base_path: String,
    /// Media types served, in preference order.
    pub produces: Vec<String>,
    /// Token endpoint.
    pub oauth2: OAuth2Settings,
    /// Login route.
    pub login: RouteSettings,
    /// Logout route.
    pub logout: RouteSettings,
    /// Registration route.
    pub register: RouteSettings,
}

bind_section!(WebSettings {
    base_path => "basePath",
    produces => "produces",
    oauth2 => "oauth2",
    login => "login",
    logout => "logout",
    register => "register",
});

/// Token endpoint settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OAuth2Settings {
    /// Whether the endpoint is served.
    pub enabled: bool,
    /// Endpoint path.
    pub uri: String,
}

bind_section!(OAuth2Settings {
    enabled => "enabled",
    uri => "uri",
});

/// One web route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSettings {
    /// Whether the route is served.
    pub enabled: bool,
    /// Route path.
    pub uri: String,
    /// Where to redirect after the route completes.
    pub next_uri: Option<String>,
}

bind_section!(RouteSettings {
    enabled => "enabled",
    uri => "uri",
    next_uri => "nextUri",
});
