//! Row and page fixtures.

use listcell_providers::{LegacyRowTable, RowData};
use listcell_types::PageContext;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Page context of a document library with a known view
pub fn sample_page() -> PageContext {
    PageContext {
        web_url: "https://contoso.example/sites/team".to_string(),
        list_id: "{6B4C6B0D-1C2B-4D1F-9A36-7E1F5A8C2D11}".to_string(),
        list_title: "Documents".to_string(),
        legacy_view_id: Some("{0C8B2E7A-5D5E-4C8A-8F0B-3C2C1E0D9A44}".to_string()),
        query_string: None,
    }
}

/// Builder for the values of one row.
#[derive(Debug, Clone, Default)]
pub struct RowFixture {
    values: Map<String, Value>,
}

impl RowFixture {
    pub fn new(id: i64) -> Self {
        let mut values = Map::new();
        values.insert("ID".to_string(), json!(id.to_string()));
        Self { values }
    }

    pub fn value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Encoded relative date (`Created.FriendlyDisplay`)
    pub fn friendly_date(self, field_name: &str, encoded: &str) -> Self {
        self.value(&format!("{}.FriendlyDisplay", field_name), json!(encoded))
    }

    /// Document at `file_ref`; `FileLeafRef` is its last path segment
    pub fn document(self, file_ref: &str) -> Self {
        let leaf = file_ref.rsplit('/').next().unwrap_or(file_ref).to_string();
        self.value("FileRef", json!(file_ref))
            .value("FileLeafRef", json!(leaf))
            .value("FSObjType", json!("0"))
    }

    pub fn folder(self, file_ref: &str) -> Self {
        self.document(file_ref).value("FSObjType", json!("1"))
    }

    /// Item created recently enough to carry the "new" marker
    pub fn new_item(self) -> Self {
        self.value("Created_x0020_Date.ifnew", json!("1"))
    }

    /// Row backed by its own value map
    pub fn build(self) -> RowData {
        RowData::Direct(self.values.into_iter().collect())
    }

    /// Row resolved through a page-global table holding this row and `others`
    pub fn build_legacy(self, others: Vec<RowFixture>) -> RowData {
        let item_id = self
            .values
            .get("ID")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut table: LegacyRowTable = others.into_iter().map(|row| row.values).collect();
        table.push(self.values);

        RowData::Legacy {
            item_id,
            table: Arc::new(table),
        }
    }
}
