//! The standard client source layout.

use camino::Utf8PathBuf;

use super::defaults::defaults;
use super::schema::ClientConfiguration;
use super::validate::validate;
use crate::{ConfigLoader, FileSource, KeyPath, ObjectSource, SecondaryFile, SourceFormat, StrataResult};

/// Prefix of the environment variables read by the client loader.
pub const ENV_PREFIX: &str = "STORMPATH";

/// Separator between segments of an environment variable name.
pub const ENV_SEPARATOR: &str = "_";

/// Directory, relative to the home directory, holding per-user files.
const HOME_CONFIG_DIR: &str = "~/.stormpath";

/// Key whose value names an API key `.properties` file.
pub const API_KEY_FILE_KEY: &str = "client:apiKey:file";

/// Loads [`ClientConfiguration`] from the standard locations.
///
/// Sources, lowest precedence first:
///
/// 1. `~/.stormpath/apiKey.properties` beneath `client`
/// 2. `~/.stormpath/stormpath.json`
/// 3. `~/.stormpath/stormpath.yaml`
/// 4. `apiKey.properties` in the working directory, beneath `client`
/// 5. `stormpath.json` in the working directory
/// 6. `stormpath.yaml` in the working directory
/// 7. `STORMPATH_*` environment variables
/// 8. the override object, when one is given
///
/// Every file is optional. After merging, legacy `apiKey:*` and `api:key:*`
/// keys are promoted to `client:apiKey:*`, and a set `client:apiKey:file`
/// loads that `.properties` file beneath `client`.
///
/// # Examples
///
/// ```rust,no_run
/// use strata_config::client::ClientConfigLoader;
///
/// let config = ClientConfigLoader::new().load()?;
/// println!("{}", config.client.base_url);
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfigLoader {
    home_dir: Option<Utf8PathBuf>,
    working_dir: Utf8PathBuf,
    environment: Option<Vec<(String, String)>>,
    overrides: Option<ObjectSource>,
}

impl Default for ClientConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfigLoader {
    /// Read the user's home directory, the current directory and the process
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home_dir: None,
            working_dir: Utf8PathBuf::from("."),
            environment: None,
            overrides: None,
        }
    }

    /// Use `dir` in place of the user's home directory.
    #[must_use]
    pub fn home_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Look for working-directory files in `dir`.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Read these name/value pairs instead of the process environment.
    #[must_use]
    pub fn environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Apply `overrides` above every other source.
    #[must_use]
    pub fn overrides(mut self, overrides: ObjectSource) -> Self {
        self.overrides = Some(overrides.named("overrides"));
        self
    }

    /// Assemble the generic loader for this layout.
    #[must_use]
    pub fn loader(&self) -> ConfigLoader {
        let client_root = KeyPath::parse("client");
        let home = Utf8PathBuf::from(HOME_CONFIG_DIR);
        let mut builder = ConfigLoader::builder()
            .file_source(
                FileSource::optional(home.join("apiKey.properties")).with_root(client_root.clone()),
            )
            .optional_file(home.join("stormpath.json"))
            .optional_file(home.join("stormpath.yaml"))
            .file_source(
                FileSource::optional(self.working_dir.join("apiKey.properties"))
                    .with_root(client_root.clone()),
            )
            .optional_file(self.working_dir.join("stormpath.json"))
            .optional_file(self.working_dir.join("stormpath.yaml"));
        builder = match &self.environment {
            Some(vars) => builder.environment_from(vars.iter().cloned(), ENV_PREFIX, ENV_SEPARATOR),
            None => builder.environment(ENV_PREFIX, ENV_SEPARATOR),
        };
        if let Some(overrides) = &self.overrides {
            builder = builder.object(overrides.clone());
        }
        if let Some(home_dir) = &self.home_dir {
            builder = builder.home_dir(home_dir.clone());
        }
        builder
            .promote("apiKey", "client:apiKey")
            .promote("api:key", "client:apiKey")
            .secondary(
                SecondaryFile::new(KeyPath::parse(API_KEY_FILE_KEY), client_root)
                    .with_format(SourceFormat::Properties),
            )
            .build()
    }

    /// Merge and bind without validating.
    ///
    /// # Errors
    ///
    /// Returns any error raised while loading or binding.
    pub fn load_unvalidated(&self) -> StrataResult<ClientConfiguration> {
        self.loader().load(defaults())
    }

    /// Merge, bind and validate.
    ///
    /// # Errors
    ///
    /// Returns any error raised while loading or binding, or
    /// [`crate::StrataError::Validation`] when the result is unusable.
    pub fn load(&self) -> StrataResult<ClientConfiguration> {
        let config = self.load_unvalidated()?;
        validate(&config)?;
        Ok(config)
    }
}
