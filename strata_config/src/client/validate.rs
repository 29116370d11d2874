//! Semantic checks run after binding.

use crate::{StrataError, StrataResult};

use super::schema::ClientConfiguration;

const APPLICATIONS_SEGMENT: &str = "/applications/";

/// Check that a bound configuration is usable.
///
/// The API key id and secret must be present and non-blank. When
/// `application.href` is set it must be an `http` or `https` URL that names
/// an application, as in `https://api.example.com/v1/applications/<id>`.
///
/// # Errors
///
/// Returns [`StrataError::Validation`] naming the first offending key.
pub fn validate(config: &ClientConfiguration) -> StrataResult<()> {
    let api_key = &config.client.api_key;
    require_text("client:apiKey:id", api_key.id.as_deref())?;
    require_text("client:apiKey:secret", api_key.secret.as_deref())?;
    if let Some(href) = config
        .application
        .href
        .as_deref()
        .map(str::trim)
        .filter(|href| !href.is_empty())
    {
        check_application_href(href)?;
    }
    Ok(())
}

fn require_text(key: &str, value: Option<&str>) -> StrataResult<()> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(StrataError::validation(key, "a non-blank value is required")),
    }
}

fn check_application_href(href: &str) -> StrataResult<()> {
    let lowered = href.to_ascii_lowercase();
    let Some(rest) = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
    else {
        return Err(StrataError::validation(
            "application:href",
            format!("'{href}' is not an http or https URL"),
        ));
    };
    let id = rest
        .find(APPLICATIONS_SEGMENT)
        .and_then(|at| rest.get(at + APPLICATIONS_SEGMENT.len()..))
        .and_then(|tail| tail.split(['/', '?', '#']).next())
        .unwrap_or_default();
    if id.is_empty() {
        return Err(StrataError::validation(
            "application:href",
            format!("'{href}' does not name an application"),
        ));
    }
    Ok(())
}
