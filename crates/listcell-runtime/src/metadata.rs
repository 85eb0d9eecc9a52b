//! Field metadata accessor.
//!
//! Field properties (`RichText`, `Format`, `LookupList`, `SchemaXml`) are
//! fetched lazily from the remote source and cached per `(view, field)`.
//! The cache is persisted to the session store as one JSON document, so a
//! property is fetched at most once per view and session.
//!
//! Concurrent misses for the same `(view, field, property)` share a single
//! pending fetch.

use crate::{Error, Result};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use listcell_format::query_param;
use listcell_providers::{FieldPropertySource, ListRef, RowData, SessionStore};
use listcell_types::{FieldId, FieldProperties, PageContext, ViewId};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fetched field properties, partitioned by view
pub type ViewFieldCache = BTreeMap<ViewId, BTreeMap<FieldId, FieldProperties>>;

type FetchKey = (ViewId, FieldId, String);
type PendingFetch = Shared<BoxFuture<'static, Option<Value>>>;

/// View the user is looking at: the `viewid` query parameter, else the
/// legacy page view id. Bare GUIDs are wrapped in braces.
///
/// Pages reporting no view at all share the `{}` partition.
pub fn resolve_view_id(ctx: &PageContext) -> ViewId {
    let from_query = ctx
        .query_string
        .as_deref()
        .and_then(|query| query_param(query, "viewid"))
        .filter(|id| !id.is_empty());

    match from_query {
        Some(id) => ViewId::normalized(&id),
        None => ViewId::normalized(ctx.legacy_view_id.as_deref().unwrap_or_default()),
    }
}

/// List addressed by title when the page reports one, else by id
pub fn list_ref(ctx: &PageContext) -> ListRef {
    if ctx.list_title.is_empty() {
        ListRef::Id(ctx.list_id.clone())
    } else {
        ListRef::Title(ctx.list_title.clone())
    }
}

/// Row value under the composite key `{field_name}.{suffix}`
/// (`Created.FriendlyDisplay`, `Created.ifnew`, `URL.desc`)
pub fn row_value(row: &RowData, field_name: &str, suffix: &str) -> Option<Value> {
    row.get(&format!("{}.{}", field_name, suffix)).cloned()
}

/// String form of [`row_value`]; `None` for missing and null values
pub fn row_text(row: &RowData, field_name: &str, suffix: &str) -> Option<String> {
    row.get_str(&format!("{}.{}", field_name, suffix))
}

#[derive(Clone)]
pub struct FieldMetadataAccessor {
    state: Arc<AccessorState>,
}

struct AccessorState {
    source: Option<Arc<dyn FieldPropertySource>>,
    store: Arc<dyn SessionStore>,
    key: String,
    timeout: Duration,
    // None until first read from the session store
    cache: Mutex<Option<ViewFieldCache>>,
    in_flight: Mutex<HashMap<FetchKey, PendingFetch>>,
}

impl FieldMetadataAccessor {
    pub fn new(
        source: Option<Arc<dyn FieldPropertySource>>,
        store: Arc<dyn SessionStore>,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            state: Arc::new(AccessorState {
                source,
                store,
                key: key.into(),
                timeout,
                cache: Mutex::new(None),
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Property of a field as seen from the page's current view.
    ///
    /// Returns `None` when the field has no value for the property, when no
    /// remote source is configured, or when the fetch fails. Failures are
    /// logged and not cached.
    pub async fn field_property(
        &self,
        field_id: &FieldId,
        property: &str,
        ctx: &PageContext,
    ) -> Option<Value> {
        let view = resolve_view_id(ctx);

        let pending = {
            let mut in_flight = self.state.in_flight.lock().unwrap();

            if let Some(value) = self.state.cached(&view, field_id, property) {
                tracing::debug!(view = %view, field = %field_id, property, "field property cache hit");
                return present(value);
            }

            let Some(source) = self.state.source.clone() else {
                tracing::debug!(field = %field_id, property, "no field property source configured");
                return None;
            };

            let key = (view, field_id.clone(), property.to_string());
            match in_flight.get(&key) {
                Some(pending) => {
                    tracing::debug!(field = %field_id, property, "joining pending field property fetch");
                    pending.clone()
                }
                None => {
                    let pending = self.start_fetch(key.clone(), source, list_ref(ctx));
                    in_flight.insert(key, pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// Schema XML of a field, empty when unknown
    pub async fn field_schema_xml(&self, field_id: &FieldId, ctx: &PageContext) -> String {
        self.field_property(field_id, "SchemaXml", ctx)
            .await
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Cached properties of a field in a view, without fetching
    pub fn cached_properties(&self, view: &ViewId, field_id: &FieldId) -> Option<FieldProperties> {
        self.state
            .with_cache(|cache| cache.get(view).and_then(|fields| fields.get(field_id)).cloned())
    }

    /// Drop the cache and remove it from the session store
    pub fn dispose(&self) {
        *self.state.cache.lock().unwrap() = None;
        if let Err(err) = self.state.store.remove_item(&self.state.key) {
            tracing::warn!(key = %self.state.key, error = %err, "failed to clear field property cache");
        }
    }

    fn start_fetch(
        &self,
        key: FetchKey,
        source: Arc<dyn FieldPropertySource>,
        list: ListRef,
    ) -> PendingFetch {
        let state = Arc::clone(&self.state);

        async move {
            let (view, field_id, property) = &key;

            let value = match state.fetch(source.as_ref(), &list, field_id, property).await {
                Ok(value) => {
                    let value = value.unwrap_or(Value::Null);
                    state.merge(view, field_id, property, value.clone());
                    present(value)
                }
                Err(err) => {
                    tracing::warn!(
                        field = %field_id,
                        property = property.as_str(),
                        error = %err,
                        "field property unavailable"
                    );
                    None
                }
            };

            state.in_flight.lock().unwrap().remove(&key);
            value
        }
        .boxed()
        .shared()
    }
}

impl AccessorState {
    async fn fetch(
        &self,
        source: &dyn FieldPropertySource,
        list: &ListRef,
        field_id: &FieldId,
        property: &str,
    ) -> Result<Option<Value>> {
        tracing::debug!(field = %field_id, property, "fetching field property");

        let value = tokio::time::timeout(self.timeout, source.fetch_property(list, field_id, property))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "property {} of field {} after {} ms",
                    property,
                    field_id,
                    self.timeout.as_millis()
                ))
            })??;

        Ok(value)
    }

    fn with_cache<R>(&self, f: impl FnOnce(&mut ViewFieldCache) -> R) -> R {
        let mut cache = self.cache.lock().unwrap();
        let cache = cache.get_or_insert_with(|| self.load_persisted());
        f(cache)
    }

    /// Cached value, `Some(Value::Null)` when the property is known to be empty
    fn cached(&self, view: &ViewId, field_id: &FieldId, property: &str) -> Option<Value> {
        self.with_cache(|cache| {
            cache
                .get(view)
                .and_then(|fields| fields.get(field_id))
                .and_then(|properties| properties.get(property))
                .cloned()
        })
    }

    fn merge(&self, view: &ViewId, field_id: &FieldId, property: &str, value: Value) {
        let persisted = self.with_cache(|cache| {
            cache
                .entry(view.clone())
                .or_default()
                .entry(field_id.clone())
                .or_default()
                .insert(property.to_string(), value);

            serde_json::to_string(cache)
                .map_err(Error::from)
                .and_then(|json| self.store.set_item(&self.key, &json).map_err(Error::from))
        });

        if let Err(err) = persisted {
            tracing::warn!(key = %self.key, error = %err, "failed to persist field property cache");
        }
    }

    fn load_persisted(&self) -> ViewFieldCache {
        let json = match self.store.get_item(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return ViewFieldCache::new(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to read field property cache");
                return ViewFieldCache::new();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|err| {
            tracing::warn!(key = %self.key, error = %err, "ignoring malformed field property cache");
            ViewFieldCache::new()
        })
    }
}

fn present(value: Value) -> Option<Value> {
    (!value.is_null()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use listcell_providers::MemorySessionStore;
    use serde_json::json;

    fn page(query: Option<&str>, legacy: Option<&str>) -> PageContext {
        PageContext {
            list_title: "Documents".to_string(),
            query_string: query.map(str::to_string),
            legacy_view_id: legacy.map(str::to_string),
            ..PageContext::default()
        }
    }

    #[test]
    fn test_view_id_from_query_is_braced() {
        let ctx = page(Some("viewid=5a3b-77&id=2"), Some("{LEGACY}"));
        assert_eq!(resolve_view_id(&ctx).as_str(), "{5a3b-77}");

        let ctx = page(Some("viewid=%7B5A3B%7D"), None);
        assert_eq!(resolve_view_id(&ctx).as_str(), "{5A3B}");
    }

    #[test]
    fn test_view_id_falls_back_to_legacy() {
        assert_eq!(resolve_view_id(&page(Some("id=2"), Some("{LEGACY}"))).as_str(), "{LEGACY}");
        assert_eq!(resolve_view_id(&page(Some("viewid="), Some("{LEGACY}"))).as_str(), "{LEGACY}");
        assert_eq!(resolve_view_id(&page(None, None)).as_str(), "{}");
    }

    #[test]
    fn test_list_ref_prefers_title() {
        assert_eq!(list_ref(&page(None, None)), ListRef::Title("Documents".to_string()));

        let ctx = PageContext {
            list_id: "{B1}".to_string(),
            ..PageContext::default()
        };
        assert_eq!(list_ref(&ctx), ListRef::Id("{B1}".to_string()));
    }

    #[test]
    fn test_row_value_composite_key() {
        let row = RowData::direct([("Created.ifnew", json!("1")), ("URL.desc", Value::Null)]);
        assert_eq!(row_value(&row, "Created", "ifnew"), Some(json!("1")));
        assert_eq!(row_text(&row, "Created", "ifnew").as_deref(), Some("1"));
        assert_eq!(row_text(&row, "URL", "desc"), None);
        assert_eq!(row_value(&RowData::Unavailable, "Created", "ifnew"), None);
    }

    #[tokio::test]
    async fn test_without_source_returns_none() {
        let accessor = FieldMetadataAccessor::new(
            None,
            Arc::new(MemorySessionStore::new()),
            "fields",
            Duration::from_secs(1),
        );
        let value = accessor
            .field_property(&FieldId::new("f1"), "RichText", &page(None, Some("{V}")))
            .await;
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_persisted_cache_is_used() -> Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        store.set_item("fields", r#"{"{V}":{"f1":{"Format":"Image"}}}"#)?;

        let accessor = FieldMetadataAccessor::new(None, store, "fields", Duration::from_secs(1));
        let ctx = page(None, Some("{V}"));
        let value = accessor.field_property(&FieldId::new("f1"), "Format", &ctx).await;
        assert_eq!(value, Some(json!("Image")));

        // another view has its own partition
        let other = page(None, Some("{W}"));
        assert_eq!(accessor.field_property(&FieldId::new("f1"), "Format", &other).await, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_dispose_clears_store() -> Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        store.set_item("fields", r#"{"{V}":{"f1":{"Format":"Image"}}}"#)?;

        let accessor = FieldMetadataAccessor::new(None, store.clone(), "fields", Duration::from_secs(1));
        accessor.dispose();

        assert_eq!(store.get_item("fields")?, None);
        let ctx = page(None, Some("{V}"));
        assert_eq!(accessor.field_property(&FieldId::new("f1"), "Format", &ctx).await, None);
        Ok(())
    }
}
