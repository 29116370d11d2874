//! Environment variable source.

use figment::providers::Env;

use super::{ConfigSource, Provenance};
use crate::flatten::flatten_environment;
use crate::{FlatEntry, StrataResult};

/// Environment variables filtered by a prefix and split on a separator.
///
/// By default the process environment is read each time the source is
/// flattened. [`EnvSource::from_vars`] pins an explicit list instead, which
/// keeps tests and embedded callers independent of the process state.
///
/// # Examples
///
/// ```
/// use strata_config::{ConfigSource, EnvSource};
///
/// let source = EnvSource::from_vars([("APP_DB_HOST", "db")], "APP", "_");
/// let entries = source.flatten()?;
/// assert_eq!(entries[0].path.to_string(), "db:host");
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Read the process environment.
    #[must_use]
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: None,
        }
    }

    /// Read the given name/value pairs instead of the process environment.
    #[must_use]
    pub fn from_vars<I, K, V>(vars: I, prefix: impl Into<String>, separator: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: Some(
                vars.into_iter()
                    .map(|(name, value)| (name.into(), value.into()))
                    .collect(),
            ),
        }
    }

    fn process_vars() -> Vec<(String, String)> {
        Env::raw()
            .iter()
            .map(|(name, value)| (name.as_str().to_owned(), value))
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn origin(&self) -> String {
        if self.prefix.is_empty() {
            String::from("environment")
        } else {
            format!("environment ({}*)", self.prefix)
        }
    }

    fn provenance(&self) -> Provenance {
        Provenance::Environment
    }

    fn flatten(&self) -> StrataResult<Vec<FlatEntry>> {
        let origin = self.origin();
        match &self.vars {
            Some(vars) => flatten_environment(
                vars.iter().map(|(name, value)| (name.as_str(), value.as_str())),
                &self.prefix,
                &self.separator,
                &origin,
            ),
            None => flatten_environment(Self::process_vars(), &self.prefix, &self.separator, &origin),
        }
    }
}
