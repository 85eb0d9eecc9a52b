use listcell_format::encode_text;
use listcell_providers::RowData;
use listcell_runtime::row_text;
use listcell_types::{FieldDescriptor, PageContext};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One cell handed over by the host: the raw value plus everything needed
/// to classify it
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    pub value: &'a Value,
    pub field: &'a FieldDescriptor,
    pub row: &'a RowData,
    pub page: &'a PageContext,
}

impl<'a> Cell<'a> {
    pub fn new(
        value: &'a Value,
        field: &'a FieldDescriptor,
        row: &'a RowData,
        page: &'a PageContext,
    ) -> Self {
        Self {
            value,
            field,
            row,
            page,
        }
    }

    pub fn text(&self) -> String {
        value_to_text(self.value)
    }

    pub fn encoded_text(&self) -> String {
        encode_text(&self.text())
    }

    /// Row value derived from this field (`{internal_name}.{suffix}`)
    pub fn row_text(&self, suffix: &str) -> Option<String> {
        row_text(self.row, &self.field.internal_name, suffix)
    }

    /// Values of a multi-value field; a single object is treated as a
    /// one-element list. `None` for null or unparsable values.
    pub(crate) fn list_of<T: DeserializeOwned>(&self) -> Option<Vec<T>> {
        let parsed = match self.value {
            Value::Null => return None,
            Value::Array(_) => serde_json::from_value(self.value.clone()),
            single => serde_json::from_value(single.clone()).map(|item| vec![item]),
        };

        match parsed {
            Ok(items) => Some(items),
            Err(err) => {
                tracing::warn!(
                    field = %self.field.internal_name,
                    field_type = %self.field.field_type,
                    error = %err,
                    "unexpected value shape"
                );
                None
            }
        }
    }
}

/// Display string of a raw value: null is empty, strings are taken as is,
/// numbers and booleans are stringified and arrays are comma-joined
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Truthiness of a field property flag (`"TRUE"` or `true`)
pub(crate) fn is_flag_set(property: Option<&Value>) -> bool {
    match property {
        Some(Value::String(s)) => s == "TRUE",
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}
