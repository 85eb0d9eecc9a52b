use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Page-global row table: one JSON object per row, keyed by column name
pub type LegacyRowTable = Vec<Map<String, Value>>;

/// Row-scoped values for the cell being rendered.
///
/// The variant is chosen once when the host hands over the row, instead of
/// probing the accessor's shape on every lookup.
#[derive(Debug, Clone)]
pub enum RowData {
    /// The host exposes the row's full value map, including derived
    /// display strings such as `Created.FriendlyDisplay`
    Direct(HashMap<String, Value>),
    /// Only the item id is known; values come from the page-global row table
    Legacy {
        item_id: String,
        table: Arc<LegacyRowTable>,
    },
    /// No backing store; every lookup yields `None`
    Unavailable,
}

impl RowData {
    pub fn direct<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        RowData::Direct(values.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Value by composite key (`"Created.FriendlyDisplay"`, `"FSObjType"`)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            RowData::Direct(values) => values.get(key),
            RowData::Legacy { item_id, table } => table
                .iter()
                .find(|row| row.get("ID").is_some_and(|id| value_as_string(id) == *item_id))
                .and_then(|row| row.get(key)),
            RowData::Unavailable => None,
        }
    }

    /// Value rendered as a string; numbers and booleans are stringified
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_null())
            .map(value_as_string)
    }

    /// The item id of the row
    pub fn item_id(&self) -> Option<String> {
        match self {
            RowData::Legacy { item_id, .. } => Some(item_id.clone()),
            _ => self.get_str("ID"),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, RowData::Unavailable)
    }
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_lookup() {
        let row = RowData::direct([
            ("ID", json!(4)),
            ("Created.FriendlyDisplay", json!("1|0|9")),
        ]);
        assert_eq!(row.get_str("Created.FriendlyDisplay").as_deref(), Some("1|0|9"));
        assert_eq!(row.item_id().as_deref(), Some("4"));
        assert_eq!(row.get("Missing"), None);
    }

    #[test]
    fn test_legacy_lookup_by_item_id() {
        let table: LegacyRowTable = vec![
            json!({"ID": "1", "FSObjType": "0"}).as_object().unwrap().clone(),
            json!({"ID": "2", "FSObjType": "1"}).as_object().unwrap().clone(),
        ];
        let row = RowData::Legacy {
            item_id: "2".to_string(),
            table: Arc::new(table),
        };
        assert_eq!(row.get_str("FSObjType").as_deref(), Some("1"));
        assert_eq!(row.item_id().as_deref(), Some("2"));
    }

    #[test]
    fn test_legacy_missing_row() {
        let row = RowData::Legacy {
            item_id: "9".to_string(),
            table: Arc::new(vec![]),
        };
        assert_eq!(row.get("FSObjType"), None);
    }

    #[test]
    fn test_unavailable_returns_none() {
        let row = RowData::Unavailable;
        assert!(!row.is_available());
        assert_eq!(row.get_str("ID"), None);
        assert_eq!(row.item_id(), None);
    }

    #[test]
    fn test_null_is_treated_as_missing_string() {
        let row = RowData::direct([("URL.desc", Value::Null)]);
        assert_eq!(row.get_str("URL.desc"), None);
    }
}
