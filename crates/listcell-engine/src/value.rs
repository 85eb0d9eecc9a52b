use crate::cell::Cell;
use chrono::NaiveDate;
use listcell_format::{parse_date, parse_float};
use listcell_types::{FieldType, RegionalSettings};
use serde_json::Value;

/// Typed value of a cell
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// DateTime fields, parsed with the web date format; `None` if unparsable
    Date(Option<NaiveDate>),
    /// Numeric fields; NaN when the value is not a number
    Number(f64),
    /// Every other field type, as received
    Raw(Value),
}

/// Typed value of a cell.
///
/// Numeric fields prefer the row's invariant rendering (`{field}.`) over the
/// locale-formatted cell value.
pub fn field_value(cell: &Cell<'_>, settings: &RegionalSettings) -> FieldValue {
    match &cell.field.field_type {
        FieldType::DateTime => FieldValue::Date(parse_date(&cell.text(), &settings.web_date_format)),
        FieldType::Integer | FieldType::Counter | FieldType::Number | FieldType::Currency => {
            let invariant = cell
                .row_text("")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| cell.text());
            FieldValue::Number(parse_float(&invariant).unwrap_or(f64::NAN))
        }
        _ => FieldValue::Raw(cell.value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listcell_providers::RowData;
    use listcell_runtime::describe_field;
    use listcell_types::PageContext;
    use serde_json::json;

    #[test]
    fn test_numeric_prefers_invariant_row_value() {
        let field = describe_field("f1", "Price", FieldType::Currency);
        let row = RowData::direct([("Price.", json!("1234.5"))]);
        let value = json!("$1,234.50");
        let page = PageContext::default();
        let cell = Cell::new(&value, &field, &row, &page);

        assert_eq!(field_value(&cell, &RegionalSettings::default()), FieldValue::Number(1234.5));
    }

    #[test]
    fn test_numeric_falls_back_to_cell_value() {
        let field = describe_field("f1", "Qty", FieldType::Integer);
        let value = json!(42);
        let (row, page) = (RowData::Unavailable, PageContext::default());
        let cell = Cell::new(&value, &field, &row, &page);

        assert_eq!(field_value(&cell, &RegionalSettings::default()), FieldValue::Number(42.0));
    }

    #[test]
    fn test_date_uses_web_date_format() {
        let field = describe_field("f1", "Due", FieldType::DateTime);
        let value = json!("06.04.1999");
        let (row, page) = (RowData::Unavailable, PageContext::default());
        let cell = Cell::new(&value, &field, &row, &page);
        let settings = RegionalSettings {
            web_date_format: "DD.MM.YYYY".to_string(),
            ..RegionalSettings::default()
        };

        assert_eq!(
            field_value(&cell, &settings),
            FieldValue::Date(NaiveDate::from_ymd_opt(1999, 4, 6))
        );
    }

    #[test]
    fn test_other_types_are_raw() {
        let field = describe_field("f1", "Tags", FieldType::MultiChoice);
        let value = json!(["a", "b"]);
        let (row, page) = (RowData::Unavailable, PageContext::default());
        let cell = Cell::new(&value, &field, &row, &page);

        assert_eq!(field_value(&cell, &RegionalSettings::default()), FieldValue::Raw(value.clone()));
    }
}
