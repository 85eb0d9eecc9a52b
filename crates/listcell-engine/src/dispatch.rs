//! Field renderer dispatch.
//!
//! Every cell ends up with exactly one renderer: unknown field types,
//! missing row data and missing metadata all degrade to plain text.

use crate::cell::{Cell, is_flag_set};
use listcell_format::{
    DefaultStrings, Overlay, file_icon_name, parse_int, relative_date_time_string, trim_slash,
};
use listcell_runtime::{FieldMetadataAccessor, is_title_link};
use listcell_types::{
    AttachmentsContent, DateContent, DisplayPayload, FieldType, FileTypeContent, LookupContent,
    LookupValue, NameContent, Principal, RenderOptions, RendererContent, TaxonomyContent, Term,
    TextContent, TitleContent, UrlContent, UserContent,
};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Rich text longer than this is shown truncated
const MAX_NOTE_LENGTH: usize = 255;
/// Notes with more lines than this are shown truncated
const MAX_NOTE_LINES: usize = 4;

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r|\r\n|\n|<br>").unwrap());

pub struct Dispatcher {
    metadata: FieldMetadataAccessor,
    string_overrides: BTreeMap<String, String>,
}

impl Dispatcher {
    pub fn new(metadata: FieldMetadataAccessor) -> Self {
        Self {
            metadata,
            string_overrides: BTreeMap::new(),
        }
    }

    /// Replace built-in localized strings by key
    pub fn with_strings(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.string_overrides = overrides;
        self
    }

    pub fn metadata(&self) -> &FieldMetadataAccessor {
        &self.metadata
    }

    pub fn strings(&self) -> Overlay<'_, DefaultStrings> {
        Overlay {
            overrides: &self.string_overrides,
            base: &DefaultStrings,
        }
    }

    /// Select the renderer for a cell and derive its display data.
    ///
    /// Suspends only when a field property (`RichText`, `Format`,
    /// `LookupList`) is not cached yet for the current view.
    pub async fn dispatch(&self, cell: &Cell<'_>, options: &RenderOptions) -> DisplayPayload {
        let content = match &cell.field.field_type {
            FieldType::Text
            | FieldType::Choice
            | FieldType::Boolean
            | FieldType::MultiChoice
            | FieldType::Computed => by_stored_name(cell),
            FieldType::Integer | FieldType::Counter | FieldType::Number | FieldType::Currency => {
                RendererContent::Text(TextContent {
                    text: cell.encoded_text(),
                    is_safe_for_inner_html: true,
                    is_truncated: false,
                })
            }
            FieldType::Note => self.note(cell).await,
            FieldType::DateTime => RendererContent::Date(DateContent {
                text: self.date_text(cell, cell.encoded_text()),
            }),
            FieldType::Lookup | FieldType::LookupMulti => self.lookup(cell).await,
            FieldType::Url => self.url(cell).await,
            FieldType::Taxonomy
            | FieldType::TaxonomyFieldType
            | FieldType::TaxonomyFieldTypeMulti => match cell.list_of::<Term>() {
                Some(terms) => RendererContent::Taxonomy(TaxonomyContent { terms }),
                None => empty_text(),
            },
            FieldType::User | FieldType::UserMulti => match cell.list_of::<Principal>() {
                Some(users) => RendererContent::User(UserContent {
                    users,
                    context: cell.page.clone(),
                }),
                None => empty_text(),
            },
            FieldType::Attachments => RendererContent::Attachments(AttachmentsContent {
                count: parse_int(&cell.text()).unwrap_or(0),
            }),
            FieldType::Other(_) => plain_text(cell),
        };

        tracing::debug!(
            field = %cell.field.internal_name,
            field_type = %cell.field.field_type,
            renderer = ?content.selection(),
            "dispatched cell"
        );

        DisplayPayload::new(content, options)
    }

    /// Display form of the list a lookup field points at, empty when unknown
    pub async fn lookup_disp_form_url(&self, cell: &Cell<'_>) -> String {
        let lookup_list = self
            .metadata
            .field_property(&cell.field.id, "LookupList", cell.page)
            .await;

        match lookup_list.as_ref().and_then(Value::as_str) {
            Some(list_id) if !list_id.is_empty() => format!(
                "{}/_layouts/15/listform.aspx?PageType=4&ListId={}",
                trim_slash(&cell.page.web_url),
                list_id
            ),
            _ => String::new(),
        }
    }

    /// Relative phrase from the row's friendly display, else `fallback`
    pub(crate) fn date_text(&self, cell: &Cell<'_>, fallback: String) -> String {
        match cell.row_text("FriendlyDisplay").filter(|f| !f.is_empty()) {
            Some(friendly) => relative_date_time_string(&friendly, &self.strings()).unwrap_or_default(),
            None => fallback,
        }
    }

    pub(crate) async fn is_rich_text(&self, cell: &Cell<'_>) -> bool {
        let rich_text = self
            .metadata
            .field_property(&cell.field.id, "RichText", cell.page)
            .await;
        is_flag_set(rich_text.as_ref())
    }

    pub(crate) async fn is_image_url(&self, cell: &Cell<'_>) -> bool {
        let format = self
            .metadata
            .field_property(&cell.field.id, "Format", cell.page)
            .await;
        format.as_ref().and_then(Value::as_str) == Some("Image")
    }

    async fn note(&self, cell: &Cell<'_>) -> RendererContent {
        let html = if self.is_rich_text(cell).await {
            cell.text()
        } else {
            cell.encoded_text().replace('\n', "<br>")
        };

        let is_truncated = html.chars().count() > MAX_NOTE_LENGTH
            || LINE_BREAK.split(&html).count() > MAX_NOTE_LINES;

        RendererContent::Text(TextContent {
            text: html,
            is_safe_for_inner_html: true,
            is_truncated,
        })
    }

    async fn lookup(&self, cell: &Cell<'_>) -> RendererContent {
        let Some(lookups) = cell.list_of::<LookupValue>() else {
            return empty_text();
        };

        RendererContent::Lookup(LookupContent {
            lookups,
            disp_form_url: self.lookup_disp_form_url(cell).await,
        })
    }

    async fn url(&self, cell: &Cell<'_>) -> RendererContent {
        RendererContent::Url(UrlContent {
            is_image_url: self.is_image_url(cell).await,
            url: cell.text(),
            text: cell.row_text("desc").unwrap_or_default(),
        })
    }
}

/// Built-in columns get dedicated renderers; everything else is plain text
fn by_stored_name(cell: &Cell<'_>) -> RendererContent {
    let row = cell.row;

    match cell.field.stored_name.as_str() {
        "Title" => RendererContent::Title(TitleContent {
            text: cell.encoded_text(),
            is_link: is_title_link(&cell.field.internal_name),
            list_id: cell.page.list_id.clone(),
            item_id: row.item_id(),
            base_url: trim_slash(&cell.page.web_url).to_string(),
        }),
        "DocIcon" => {
            let path = row.get_str("FileLeafRef").unwrap_or_default();
            let is_folder = row.get_str("FSObjType").as_deref() == Some("1");
            RendererContent::FileType(FileTypeContent {
                icon_name: file_icon_name(&path, is_folder).to_string(),
                path,
                is_folder,
            })
        }
        "FileLeafRef" => RendererContent::Name(NameContent {
            text: cell.encoded_text(),
            is_link: true,
            file_path: row.get_str("FileRef").unwrap_or_default(),
            is_new: row.get_str("Created_x0020_Date.ifnew").as_deref() == Some("1"),
            has_preview: true,
        }),
        "URL" => RendererContent::Url(UrlContent {
            is_image_url: false,
            url: cell.text(),
            text: row
                .get_str("URL.desc")
                .filter(|desc| !desc.is_empty())
                .unwrap_or_else(|| cell.encoded_text()),
        }),
        _ => plain_text(cell),
    }
}

fn plain_text(cell: &Cell<'_>) -> RendererContent {
    RendererContent::Text(TextContent {
        text: cell.encoded_text(),
        is_safe_for_inner_html: false,
        is_truncated: false,
    })
}

fn empty_text() -> RendererContent {
    RendererContent::Text(TextContent::default())
}
