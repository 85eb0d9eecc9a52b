pub mod render;
pub mod text;

use crate::sources::InlinePropertySource;
use anyhow::{Context, Result};
use listcell_runtime::{Config, resolve_config_path};
use listcell_sdk::{CellRequest, Client, FieldPropertySource};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Request document: a `CellRequest` plus inline field properties
pub(crate) struct LoadedRequest {
    pub request: CellRequest,
    pub properties: InlinePropertySource,
}

pub(crate) fn read_request(input: Option<&Path>) -> Result<LoadedRequest> {
    let raw = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let request = CellRequest::from_json(&raw)?;
    let document: Value = serde_json::from_str(&raw)?;
    let properties = match document.get("properties") {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::Null) | None => Default::default(),
        Some(other) => anyhow::bail!("`properties` must be an object, got {}", other),
    };

    Ok(LoadedRequest {
        request,
        properties: InlinePropertySource::new(properties),
    })
}

pub(crate) fn build_client(config_path: Option<&str>, properties: InlinePropertySource) -> Result<Client> {
    let path = resolve_config_path(config_path)?;
    let config = Config::load_from(&path)?;
    tracing::debug!(path = %path.display(), "config loaded");

    let source: Arc<dyn FieldPropertySource> = Arc::new(properties);
    Ok(Client::builder()
        .config(config)
        .property_source(source)
        .build()?)
}

/// End the session. A configured `session_dir` outlives the run so the next
/// invocation reuses its cached settings and field properties.
pub(crate) fn finish(client: &Client) {
    if client.config().session_dir.is_none() {
        client.dispose();
    } else {
        tracing::debug!("keeping persisted session caches");
    }
}

pub(crate) fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
