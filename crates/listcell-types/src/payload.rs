use serde::{Deserialize, Serialize};

use crate::context::{CssProps, PageContext, RenderOptions};
use crate::values::{LookupValue, Principal, Term};

/// Which presentation component renders a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererSelection {
    Text,
    Title,
    FileType,
    Name,
    Url,
    Date,
    Lookup,
    Taxonomy,
    User,
    Attachments,
}

/// Display data handed to a renderer.
///
/// Always carries the caller's class name and style overrides next to the
/// renderer-specific content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPayload {
    /// Serialized as `null` when the caller supplied no class
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub css_props: CssProps,
    pub content: RendererContent,
}

impl DisplayPayload {
    pub fn new(content: RendererContent, options: &RenderOptions) -> Self {
        Self {
            class_name: options.class_name.clone(),
            css_props: options.css_props.clone(),
            content,
        }
    }

    pub fn selection(&self) -> RendererSelection {
        self.content.selection()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "renderer", rename_all = "snake_case")]
pub enum RendererContent {
    Text(TextContent),
    Title(TitleContent),
    FileType(FileTypeContent),
    Name(NameContent),
    Url(UrlContent),
    Date(DateContent),
    Lookup(LookupContent),
    Taxonomy(TaxonomyContent),
    User(UserContent),
    Attachments(AttachmentsContent),
}

impl RendererContent {
    pub fn selection(&self) -> RendererSelection {
        match self {
            RendererContent::Text(_) => RendererSelection::Text,
            RendererContent::Title(_) => RendererSelection::Title,
            RendererContent::FileType(_) => RendererSelection::FileType,
            RendererContent::Name(_) => RendererSelection::Name,
            RendererContent::Url(_) => RendererSelection::Url,
            RendererContent::Date(_) => RendererSelection::Date,
            RendererContent::Lookup(_) => RendererSelection::Lookup,
            RendererContent::Taxonomy(_) => RendererSelection::Taxonomy,
            RendererContent::User(_) => RendererSelection::User,
            RendererContent::Attachments(_) => RendererSelection::Attachments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    /// Text may be injected as markup without further encoding
    pub is_safe_for_inner_html: bool,
    pub is_truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleContent {
    pub text: String,
    pub is_link: bool,
    pub list_id: String,
    pub item_id: Option<String>,
    pub base_url: String,
}

impl TitleContent {
    /// Display form of the item the title belongs to
    pub fn display_form_url(&self) -> String {
        format!(
            "{}/_layouts/15/listform.aspx?PageType=4&ListId={}&ID={}",
            self.base_url,
            self.list_id,
            self.item_id.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTypeContent {
    pub path: String,
    pub is_folder: bool,
    /// Icon resolved from the folder flag or the file extension
    pub icon_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameContent {
    pub text: String,
    pub is_link: bool,
    pub file_path: String,
    pub is_new: bool,
    pub has_preview: bool,
}

impl NameContent {
    /// Link target: the preview hash for previewable documents, the path otherwise
    pub fn href(&self) -> String {
        if self.has_preview {
            let parent = match self.file_path.rfind('/') {
                Some(idx) => &self.file_path[..idx],
                None => "",
            };
            format!("#id={}&parent={}", self.file_path, parent)
        } else {
            self.file_path.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlContent {
    pub is_image_url: bool,
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupContent {
    pub lookups: Vec<LookupValue>,
    pub disp_form_url: String,
}

impl LookupContent {
    /// Display form dialog URL for one of the referenced items
    pub fn item_url(&self, lookup: &LookupValue) -> String {
        format!(
            "{}&ID={}&RootFolder=*&IsDlg=1",
            self.disp_form_url, lookup.lookup_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyContent {
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContent {
    pub users: Vec<Principal>,
    /// Page context passed through for user cards
    pub context: PageContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentsContent {
    pub count: i64,
}

impl AttachmentsContent {
    pub fn has_attachments(&self) -> bool {
        self.count > 0
    }
}
