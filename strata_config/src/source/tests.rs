//! Unit tests for sources, format selection and tree-document parsing.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde::Serialize;

use super::*;
use crate::{KeyPath, StrataError};

fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| {
        f(j).map_err(|err| {
            // Jail errors only convert from strings.
            figment::Error::from(err.to_string())
        })
    })
    .map_err(|err| anyhow!(err.to_string()))
}

fn rendered(entries: &[crate::FlatEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| format!("{}={}", e.path, e.value.as_deref().unwrap_or("<null>")))
        .collect()
}

fn flatten_text(format: SourceFormat, text: &str) -> Result<Vec<String>> {
    let entries = format
        .flatten(text, &KeyPath::root(), "inline")
        .map_err(|err| anyhow!(err.to_string()))?;
    Ok(rendered(&entries))
}

#[cfg(feature = "yaml")]
mod yaml {
    use super::*;

    #[rstest]
    #[case("secret:")]
    #[case("secret: ~")]
    #[case("secret: null")]
    #[case("secret: Null")]
    #[case("secret: NULL")]
    #[case("secret: !!null")]
    fn null_scalars_flatten_to_empty_strings(#[case] text: &str) -> Result<()> {
        let entries = flatten_text(SourceFormat::Yaml, text)?;
        ensure!(entries == ["secret="], "got {entries:?}");
        Ok(())
    }

    #[rstest]
    #[case("secret: 'null'")]
    #[case("secret: \"null\"")]
    fn quoted_null_stays_text(#[case] text: &str) -> Result<()> {
        let entries = flatten_text(SourceFormat::Yaml, text)?;
        ensure!(entries == ["secret=null"], "got {entries:?}");
        Ok(())
    }

    #[rstest]
    fn null_mapping_key_is_a_blank_segment() -> Result<()> {
        let entries = SourceFormat::Yaml
            .flatten("~: foo\n", &KeyPath::parse("client"), "inline")
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(rendered(&entries) == ["client:=foo"], "got {:?}", rendered(&entries));
        let segments: Vec<&str> = entries
            .iter()
            .flat_map(|entry| entry.path.segments().iter().map(String::as_str))
            .collect();
        ensure!(segments == ["client", ""], "got {segments:?}");
        Ok(())
    }

    #[rstest]
    fn byte_order_mark_is_ignored() -> Result<()> {
        let entries = flatten_text(SourceFormat::Yaml, "\u{feff}id: foo\n")?;
        ensure!(entries == ["id=foo"], "got {entries:?}");
        Ok(())
    }

    #[rstest]
    fn nested_document_flattens_in_order() -> Result<()> {
        let text = "client:\n  apiKey:\n    id: foo\n  hosts:\n    - a\n    - b\nenabled: yes\n";
        let entries = flatten_text(SourceFormat::Yaml, text)?;
        ensure!(
            entries == ["client:apiKey:id=foo", "client:hosts:0=a", "client:hosts:1=b", "enabled=yes"],
            "got {entries:?}"
        );
        Ok(())
    }

    #[rstest]
    fn sequences_of_mappings_recurse_with_index() -> Result<()> {
        let text = "routes:\n  - uri: /login\n    enabled: true\n  - uri: /logout\n";
        let entries = flatten_text(SourceFormat::Yaml, text)?;
        ensure!(
            entries == ["routes:0:uri=/login", "routes:0:enabled=true", "routes:1:uri=/logout"],
            "got {entries:?}"
        );
        Ok(())
    }

    #[rstest]
    fn duplicate_mapping_keys_are_duplicate_key_errors() {
        let err = SourceFormat::Yaml
            .flatten("foo: bar\nfoo: baz\n", &KeyPath::root(), "app.yaml")
            .expect_err("duplicate key");
        assert!(
            matches!(&*err, StrataError::DuplicateKey { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[rstest]
    fn broken_syntax_is_malformed() {
        let err = SourceFormat::Yaml
            .flatten("foo: [", &KeyPath::root(), "app.yaml")
            .expect_err("malformed");
        assert!(matches!(&*err, StrataError::MalformedSource { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("# only a comment\n")]
    #[case("---\n")]
    fn blank_documents_are_empty(#[case] text: &str) -> Result<()> {
        ensure!(flatten_text(SourceFormat::Yaml, text)?.is_empty());
        Ok(())
    }
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_tables_flatten_by_path() -> Result<()> {
    let entries = flatten_text(
        SourceFormat::Toml,
        "[client.cacheManager]\ndefaultTtl = 300\nenabled = false\n",
    )?;
    ensure!(
        entries == ["client:cacheManager:defaultTtl=300", "client:cacheManager:enabled=false"],
        "got {entries:?}"
    );
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_duplicate_keys_are_duplicate_key_errors() {
    let err = SourceFormat::Toml
        .flatten("foo = 1\nfoo = 2\n", &KeyPath::root(), "app.toml")
        .expect_err("duplicate key");
    assert!(
        matches!(&*err, StrataError::DuplicateKey { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn json_null_flattens_to_empty_string() -> Result<()> {
    let entries = flatten_text(SourceFormat::Json, r#"{"application": {"href": null}}"#)?;
    ensure!(entries == ["application:href="], "got {entries:?}");
    Ok(())
}

#[rstest]
fn json_byte_order_mark_is_ignored() -> Result<()> {
    let entries = flatten_text(SourceFormat::Json, "\u{feff}{\"apiKey\": {\"id\": \"x\"}}")?;
    ensure!(entries == ["apiKey:id=x"], "got {entries:?}");
    Ok(())
}

#[rstest]
fn properties_file_with_byte_order_mark_keeps_first_key() -> Result<()> {
    with_jail(|j| {
        j.create_file("apiKey.properties", "\u{feff}apiKey.id = x\napiKey.secret = y\n")?;
        let entries = FileSource::required("apiKey.properties")
            .flatten()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(
            rendered(&entries) == ["apiKey:id=x", "apiKey:secret=y"],
            "got {:?}",
            rendered(&entries)
        );
        Ok(())
    })
}

#[rstest]
fn json_syntax_errors_are_malformed() {
    let err = SourceFormat::Json
        .flatten("{\"a\": ", &KeyPath::root(), "app.json")
        .expect_err("malformed");
    assert!(matches!(&*err, StrataError::MalformedSource { origin, .. } if origin == "app.json"));
}

#[rstest]
fn properties_are_not_a_tree() {
    assert!(parse_tree(SourceFormat::Properties, "a=1", "p").is_err());
}

#[rstest]
fn optional_missing_file_contributes_nothing() -> Result<()> {
    with_jail(|_| {
        let entries = FileSource::optional("absent.json")
            .flatten()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(entries.is_empty());
        let nested = FileSource::optional("no/such/dir/app.yaml")
            .flatten()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(nested.is_empty());
        Ok(())
    })
}

#[rstest]
fn required_missing_file_is_not_found() -> Result<()> {
    with_jail(|_| {
        let err = FileSource::required("absent.properties")
            .flatten()
            .expect_err("missing file");
        ensure!(
            matches!(&*err, StrataError::SourceNotFound { path } if path.ends_with("absent.properties")),
            "unexpected error: {err:?}"
        );
        Ok(())
    })
}

#[rstest]
fn properties_file_is_rooted() -> Result<()> {
    with_jail(|j| {
        j.create_file("apiKey.properties", "apiKey.id = foo\napiKey.secret = bar\n")?;
        let entries = FileSource::required("apiKey.properties")
            .with_root(KeyPath::parse("client"))
            .flatten()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(rendered(&entries) == ["client:apiKey:id=foo", "client:apiKey:secret=bar"]);
        Ok(())
    })
}

#[rstest]
fn parse_failure_names_the_file() -> Result<()> {
    with_jail(|j| {
        j.create_file("broken.json", "{ not json")?;
        let err = FileSource::required("broken.json")
            .flatten()
            .expect_err("malformed");
        ensure!(err.to_string().contains("broken.json"), "message was {err}");
        Ok(())
    })
}

#[rstest]
fn format_override_beats_extension() -> Result<()> {
    with_jail(|j| {
        j.create_file("credentials.txt", "apiKey.id = foo\n")?;
        let entries = FileSource::required("credentials.txt")
            .with_format(SourceFormat::Properties)
            .flatten()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(rendered(&entries) == ["apiKey:id=foo"]);
        Ok(())
    })
}

#[rstest]
fn home_directory_is_expanded() -> Result<()> {
    with_jail(|j| {
        let home = camino::Utf8PathBuf::from_path_buf(j.directory().to_path_buf())
            .map_err(|_| anyhow!("jail directory is not UTF-8"))?;
        j.create_file("settings.json", r#"{"a": "b"}"#)?;
        let source = FileSource::required("~/settings.json").with_home_dir(home.clone());
        ensure!(source.resolved_path() == home.join("settings.json"));
        let entries = source.flatten().map_err(|err| anyhow!(err.to_string()))?;
        ensure!(rendered(&entries) == ["a=b"]);
        Ok(())
    })
}

#[rstest]
fn env_source_reads_process_environment() -> Result<()> {
    with_jail(|j| {
        j.set_env("STRATATEST_CLIENT_BASEURL", "https://example.test");
        j.set_env("UNRELATED_CLIENT_BASEURL", "ignored");
        let entries = EnvSource::new("STRATATEST", "_")
            .flatten()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(rendered(&entries) == ["client:baseurl=https://example.test"]);
        Ok(())
    })
}

#[derive(Serialize)]
struct Override<'a> {
    client: ClientOverride<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientOverride<'a> {
    connection_timeout: Option<u32>,
    base_url: &'a str,
}

#[rstest]
fn object_source_snapshots_serialisable_values() -> Result<()> {
    let value = Override {
        client: ClientOverride {
            connection_timeout: None,
            base_url: "https://override.test",
        },
    };
    let source = ObjectSource::from_serialize(&value).map_err(|err| anyhow!(err.to_string()))?;
    let entries = source.flatten().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(rendered(&entries) == ["client:baseUrl=https://override.test"]);
    let kept = source.keep_nulls().flatten().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        rendered(&kept) == ["client:connectionTimeout=<null>", "client:baseUrl=https://override.test"],
        "got {:?}",
        rendered(&kept)
    );
    Ok(())
}

#[rstest]
fn text_source_applies_root() -> Result<()> {
    let entries = TextSource::new("inline", SourceFormat::Properties, "id = 1")
        .with_root(KeyPath::parse("client:apiKey"))
        .flatten()
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(rendered(&entries) == ["client:apiKey:id=1"]);
    Ok(())
}

#[rstest]
fn provenance_is_reported() {
    assert_eq!(EnvSource::new("A", "_").provenance(), Provenance::Environment);
    assert_eq!(FileSource::optional("a.json").provenance(), Provenance::File);
    assert_eq!(Provenance::Object.to_string(), "object");
}
