//! Built-in client defaults.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::schema::{
    ApiKeySettings, ApplicationSettings, AuthenticationScheme, CacheManagerSettings,
    ClientConfiguration, ClientSettings, OAuth2Settings, ProxySettings, RouteSettings,
    WebSettings,
};

/// Base URL of the hosted API.
pub const DEFAULT_BASE_URL: &str = "https://api.stormpath.com/v1";

static DEFAULTS: LazyLock<ClientConfiguration> = LazyLock::new(build);

/// Process-wide defaults, built on first use and never mutated.
///
/// Binding clones whatever it takes from here.
///
/// # Examples
///
/// ```
/// use strata_config::client::{AuthenticationScheme, defaults};
///
/// assert_eq!(defaults().client.connection_timeout, 30);
/// assert_eq!(defaults().client.authentication_scheme, AuthenticationScheme::Sauthc1);
/// ```
#[must_use]
pub fn defaults() -> &'static ClientConfiguration {
    &DEFAULTS
}

fn route(uri: &str) -> RouteSettings {
    RouteSettings {
        enabled: true,
        uri: uri.to_owned(),
        next_uri: Some("/".to_owned()),
    }
}

fn build() -> ClientConfiguration {
    ClientConfiguration {
        client: ClientSettings {
            api_key: ApiKeySettings::default(),
            cache_manager: CacheManagerSettings {
                enabled: true,
                default_ttl: 300,
                default_tti: 300,
                caches: BTreeMap::new(),
            },
            base_url: DEFAULT_BASE_URL.to_owned(),
            connection_timeout: 30,
            authentication_scheme: AuthenticationScheme::Sauthc1,
            proxy: ProxySettings::default(),
        },
        application: ApplicationSettings::default(),
        web: WebSettings {
            base_path: "/".to_owned(),
            produces: vec!["application/json".to_owned(), "text/html".to_owned()],
            oauth2: OAuth2Settings {
                enabled: true,
                uri: "/oauth/token".to_owned(),
            },
            login: route("/login"),
            logout: route("/logout"),
            register: route("/register"),
        },
    }
}
