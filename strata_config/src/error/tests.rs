//! Unit tests for error construction and parser diagnostic routing.

use std::io;
use std::path::Path;

use rstest::rstest;

use super::*;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Diagnostic(&'static str);

// Message shapes emitted by serde-saphyr 0.0.16 and toml 0.9.
#[rstest]
#[case("duplicate mapping key `foo` at line 2 column 1", "foo")]
#[case("TOML parse error at line 2, column 1\nduplicate key `foo`", "foo")]
#[case("invalid table header\nduplicate key `server` in document root", "server")]
fn duplicate_diagnostics_become_duplicate_key(#[case] message: &'static str, #[case] expected: &str) {
    let err = classify_parse_error("app.yaml", Diagnostic(message));
    assert!(
        matches!(&*err, StrataError::DuplicateKey { origin, key } if origin == "app.yaml" && key == expected),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn other_diagnostics_are_malformed_and_keep_their_source() {
    let err = classify_parse_error("app.json", Diagnostic("expected value at line 1 column 7"));
    assert!(matches!(&*err, StrataError::MalformedSource { .. }));
    assert_eq!(
        err.to_string(),
        "malformed configuration in app.json: expected value at line 1 column 7"
    );
    assert!(std::error::Error::source(&*err).is_some());
}

#[rstest]
fn missing_files_become_not_found() {
    let path = Path::new("/etc/app/apiKey.properties");
    let err = StrataError::file(path, io::Error::from(io::ErrorKind::NotFound));
    assert!(matches!(&*err, StrataError::SourceNotFound { path: p } if p == path));
    assert_eq!(
        err.to_string(),
        "configuration file '/etc/app/apiKey.properties' not found"
    );
}

#[rstest]
fn other_io_failures_stay_file_errors() {
    let err = StrataError::file(
        Path::new("app.yaml"),
        io::Error::from(io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(&*err, StrataError::File { .. }));
    assert!(
        err.to_string().starts_with("configuration file error in 'app.yaml'"),
        "unexpected message: {err}"
    );
}

#[rstest]
fn validation_errors_name_the_key() {
    let err = StrataError::validation("application:href", "expected an http(s) URL");
    assert_eq!(
        err.to_string(),
        "validation failed for 'application:href': expected an http(s) URL"
    );
}

#[rstest]
fn bind_errors_name_path_and_value() {
    let err = StrataError::bind_type("client:connectionTimeout", "soon", "invalid digit found in string");
    assert_eq!(
        err.to_string(),
        "cannot bind 'soon' at 'client:connectionTimeout': invalid digit found in string"
    );
}

#[rstest]
fn serialisation_failures_are_unsupported_shapes() {
    let json_err = serde_json::from_str::<u8>("x").expect_err("invalid json");
    let err: StrataError = json_err.into();
    assert!(matches!(err, StrataError::UnsupportedShape { .. }));
}
