//! End-to-end loads through the public API: flatten, merge, rules, bind.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::json;
use strata_config::{
    ConfigLoader, ConfigSource, FlatConfigMap, KeyPath, ObjectSource, SourceFormat, StrataError,
    TextSource, bind_section,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ApiKey {
    id: Option<String>,
    secret: Option<String>,
}

bind_section!(ApiKey { id => "id", secret => "secret" });

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Client {
    api_key: ApiKey,
}

bind_section!(Client { api_key => "apiKey" });

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Settings {
    client: Client,
}

bind_section!(Settings { client => "client" });

fn strata(err: &std::sync::Arc<StrataError>) -> anyhow::Error {
    anyhow!(err.to_string())
}

#[rstest]
fn later_source_overrides_earlier_source() -> Result<()> {
    let settings: Settings = ConfigLoader::builder()
        .text("a", SourceFormat::Properties, "client.apiKey.id = foo")
        .text(
            "b",
            SourceFormat::Yaml,
            "client:\n  apiKey:\n    id: bar\n    secret: baz\n",
        )
        .build()
        .load(&Settings::default())
        .map_err(|err| strata(&err))?;
    ensure!(settings.client.api_key.id.as_deref() == Some("bar"));
    ensure!(settings.client.api_key.secret.as_deref() == Some("baz"));
    Ok(())
}

#[rstest]
fn object_lists_flatten_by_index() -> Result<()> {
    let entries = ObjectSource::from_value(json!({ "a": { "b": [1, 2, 3] } }))
        .flatten()
        .map_err(|err| strata(&err))?;
    let rendered: Vec<String> = entries
        .iter()
        .map(|entry| format!("{}={}", entry.path, entry.value.as_deref().unwrap_or_default()))
        .collect();
    ensure!(rendered == ["a:b:0=1", "a:b:1=2", "a:b:2=3"], "got {rendered:?}");
    Ok(())
}

#[rstest]
fn repeated_properties_key_is_rejected() {
    let err = TextSource::new("apiKey.properties", SourceFormat::Properties, "foo = 1\nfoo=2")
        .flatten()
        .expect_err("duplicate key");
    assert!(matches!(&*err, StrataError::DuplicateKey { key, .. } if key == "foo"));
}

#[rstest]
#[case(SourceFormat::Yaml, "foo: bar\nfoo: baz\n")]
#[case(SourceFormat::Json, r#"{"foo": "bar", "foo": "baz"}"#)]
#[case(SourceFormat::Toml, "foo = \"bar\"\nfoo = \"baz\"\n")]
#[case(SourceFormat::Properties, "foo = bar\nFOO = baz\n")]
fn repeated_keys_are_rejected_in_every_format(#[case] format: SourceFormat, #[case] text: &str) {
    let err = ConfigLoader::builder()
        .text("doc", format, text)
        .build()
        .merge()
        .expect_err("duplicate key");
    assert!(
        matches!(&*err, StrataError::DuplicateKey { .. }),
        "{format:?} produced {err:?}"
    );
}

#[rstest]
#[case(SourceFormat::Yaml, "client:\n  apiKey:\n    id: [unclosed\n")]
#[case(SourceFormat::Json, "{\"client\": ")]
#[case(SourceFormat::Toml, "[client\n")]
#[case(SourceFormat::Properties, "client.apiKey.id\n")]
fn broken_documents_are_malformed(#[case] format: SourceFormat, #[case] text: &str) {
    let err = ConfigLoader::builder()
        .text("doc", format, text)
        .build()
        .merge()
        .expect_err("malformed");
    assert!(
        matches!(&*err, StrataError::MalformedSource { origin, .. } if origin == "doc"),
        "{format:?} produced {err:?}"
    );
}

#[rstest]
#[case("secret:\n")]
#[case("secret: ~\n")]
#[case("secret: null\n")]
fn yaml_nulls_are_present_and_empty(#[case] text: &str) -> Result<()> {
    let map: FlatConfigMap = ConfigLoader::builder()
        .text("doc", SourceFormat::Yaml, text)
        .build()
        .merge()
        .map_err(|err| strata(&err))?;
    ensure!(map.get(&KeyPath::parse("secret")) == Some(Some("")));
    Ok(())
}

#[rstest]
fn environment_names_become_key_paths() -> Result<()> {
    let map = ConfigLoader::builder()
        .environment_from(
            [("FOO_BAR_BAZ", "1"), ("FOO_", "ignored"), ("OTHER_BAR", "ignored")],
            "FOO",
            "_",
        )
        .build()
        .merge()
        .map_err(|err| strata(&err))?;
    ensure!(map.iter().collect::<Vec<_>>() == [("bar:baz", Some("1"))]);
    Ok(())
}

#[rstest]
fn failed_load_returns_no_partial_configuration() {
    let err = ConfigLoader::builder()
        .text("good", SourceFormat::Properties, "client.apiKey.id = foo")
        .text("bad", SourceFormat::Properties, "client:apiKey:secret = bar")
        .build()
        .load(&Settings::default())
        .expect_err("delimiter in a raw properties key");
    assert!(matches!(&*err, StrataError::DuplicateKey { origin, .. } if origin == "bad"));
}
