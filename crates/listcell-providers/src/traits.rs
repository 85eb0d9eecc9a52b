use async_trait::async_trait;
use chrono::NaiveDateTime;
use listcell_types::FieldId;
use serde_json::Value;

use crate::Result;

/// List addressed either by title or by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRef {
    Title(String),
    Id(String),
}

/// Remote field metadata service
///
/// Responsibilities:
/// - Fetch a single named property (`RichText`, `Format`, `LookupList`, `SchemaXml`)
///   of one field in one list
/// - Report `Ok(None)` when the field has no value for the property
#[async_trait]
pub trait FieldPropertySource: Send + Sync {
    async fn fetch_property(
        &self,
        list: &ListRef,
        field_id: &FieldId,
        property: &str,
    ) -> Result<Option<Value>>;
}

/// Web regional settings as reported by the server
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRegionalSettings {
    pub decimal_separator: String,
    pub thousand_separator: String,
    pub work_days: u32,
    pub first_day_of_week: u32,
    pub first_week_of_year: u32,
    /// Server rendering of 6 April 1999 in its short date format
    pub sample_date: String,
    /// Server local time for the reference instant passed to `fetch`
    pub server_time: NaiveDateTime,
}

/// Remote regional settings service
///
/// Responsibilities:
/// - Load the web's locale settings
/// - Convert the client's reference time to server local time, so the
///   caller can derive the hour offset between both clocks
#[async_trait]
pub trait RegionalSettingsSource: Send + Sync {
    async fn fetch(&self, reference: NaiveDateTime) -> Result<RemoteRegionalSettings>;
}
