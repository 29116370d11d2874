//! Concurrent loads share the static defaults without interfering.

use std::thread;

use anyhow::{Result, anyhow, ensure};
use serde_json::json;
use strata_config::ObjectSource;
use strata_config::client::{ClientConfigLoader, ClientConfiguration, defaults};
use tempfile::TempDir;

fn isolated_loader(dir: &TempDir) -> Result<ClientConfigLoader> {
    let root = camino::Utf8Path::from_path(dir.path())
        .ok_or_else(|| anyhow!("temp path is not UTF-8"))?;
    Ok(ClientConfigLoader::new()
        .home_dir(root.join("home"))
        .working_dir(root.join("work"))
        .environment(Vec::<(String, String)>::new()))
}

#[test]
fn parallel_loads_with_different_overrides_are_independent() -> Result<()> {
    let dir = TempDir::new()?;
    let pristine = defaults().clone();
    let loaders = (0_u32..8)
        .map(|n| {
            let overrides = ObjectSource::from_value(json!({
                "client": {"connectionTimeout": n, "apiKey": {"id": format!("key-{n}")}},
                "web": {"produces": [format!("type/{n}")]}
            }));
            Ok((n, isolated_loader(&dir)?.overrides(overrides)))
        })
        .collect::<Result<Vec<_>>>()?;

    let results: Vec<(u32, ClientConfiguration)> = thread::scope(|scope| {
        let handles: Vec<_> = loaders
            .iter()
            .map(|(n, loader)| {
                scope.spawn(move || {
                    loader
                        .load_unvalidated()
                        .map(|mut config| {
                            config.web.produces.push("mutated".to_owned());
                            config.client.cache_manager.caches.clear();
                            (*n, config)
                        })
                        .map_err(|err| anyhow!(err.to_string()))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| anyhow!("load thread panicked"))?)
            .collect::<Result<Vec<_>>>()
    })?;

    for (n, config) in &results {
        ensure!(config.client.connection_timeout == *n);
        ensure!(config.client.api_key.id.as_deref() == Some(format!("key-{n}").as_str()));
        ensure!(config.web.produces == [format!("type/{n}"), "mutated".to_owned()]);
    }
    ensure!(defaults() == &pristine, "shared defaults were modified");
    Ok(())
}
