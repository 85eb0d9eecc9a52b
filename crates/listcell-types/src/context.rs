use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page-level information supplied by the host when a cell is rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Absolute URL of the current web
    pub web_url: String,
    pub list_id: String,
    pub list_title: String,
    /// View id reported by the legacy page context
    #[serde(default)]
    pub legacy_view_id: Option<String>,
    /// Query string of the page URL (without the leading `?`)
    #[serde(default)]
    pub query_string: Option<String>,
}

/// Style overrides applied to every payload (`backgroundColor` → `#f00`)
pub type CssProps = BTreeMap<String, String>;

/// Caller-supplied presentation options copied into each payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub css_props: CssProps,
}

impl RenderOptions {
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.css_props.insert(key.into(), value.into());
        self
    }
}
