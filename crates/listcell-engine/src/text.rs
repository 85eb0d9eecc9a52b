use crate::cell::Cell;
use crate::dispatch::Dispatcher;
use listcell_format::text_from_html;
use listcell_types::{FieldType, LookupValue, Principal, Term};

impl Dispatcher {
    /// Plain text of a cell, as used for tooltips, export and sorting.
    ///
    /// Multi-value fields are joined with newlines.
    pub async fn field_text(&self, cell: &Cell<'_>) -> String {
        let text = cell.text();

        match &cell.field.field_type {
            FieldType::Note => {
                if self.is_rich_text(cell).await {
                    text_from_html(&text)
                } else {
                    text
                }
            }
            FieldType::DateTime => self.date_text(cell, text),
            FieldType::User | FieldType::UserMulti => cell
                .list_of::<Principal>()
                .map(|users| join_lines(users.into_iter().map(|u| u.title)))
                .unwrap_or_default(),
            FieldType::Lookup | FieldType::LookupMulti => cell
                .list_of::<LookupValue>()
                .map(|lookups| join_lines(lookups.into_iter().map(|l| l.lookup_value)))
                .unwrap_or_default(),
            FieldType::Url => {
                if self.is_image_url(cell).await {
                    String::new()
                } else {
                    cell.row_text("desc").unwrap_or_default()
                }
            }
            FieldType::Taxonomy
            | FieldType::TaxonomyFieldType
            | FieldType::TaxonomyFieldTypeMulti => cell
                .list_of::<Term>()
                .map(|terms| join_lines(terms.into_iter().map(|t| t.label)))
                .unwrap_or_default(),
            FieldType::Attachments => String::new(),
            FieldType::Computed if cell.field.stored_name == "URL" => cell
                .row
                .get_str("URL.desc")
                .filter(|desc| !desc.is_empty())
                .unwrap_or(text),
            _ => text,
        }
    }
}

fn join_lines(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join("\n")
}
