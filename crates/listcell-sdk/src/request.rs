use crate::error::{Error, Result};
use listcell_providers::{LegacyRowTable, RowData};
use listcell_runtime::describe_field;
use listcell_types::{FieldDescriptor, FieldType, PageContext, RenderOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Field as reported by the host; the stored name is derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub id: String,
    pub internal_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Self-contained description of one cell render, as exchanged in JSON.
///
/// Row values come either from `row` (the item's own value map) or from
/// `legacyRows` plus `itemId` (a page-global row table).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRequest {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub field: Option<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_rows: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub page: PageContext,
    #[serde(default)]
    pub options: RenderOptions,
}

impl CellRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(format!("cell request: {}", e)))
    }

    pub fn field(&self) -> Option<FieldDescriptor> {
        self.field
            .as_ref()
            .map(|f| describe_field(f.id.as_str(), f.internal_name.as_str(), f.field_type.clone()))
    }

    pub fn row_data(&self) -> RowData {
        if let Some(row) = &self.row {
            return RowData::Direct(row.clone().into_iter().collect());
        }

        match (&self.legacy_rows, &self.item_id) {
            (Some(rows), Some(item_id)) => {
                let table: LegacyRowTable = rows.clone();
                RowData::Legacy {
                    item_id: item_id.clone(),
                    table: Arc::new(table),
                }
            }
            _ => RowData::Unavailable,
        }
    }
}
