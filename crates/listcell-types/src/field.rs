use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field identifier (GUID string as reported by the host)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// View identifier, always in braced GUID form (`{...}`) once normalized
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    /// Wrap a view id, adding braces around bare GUIDs
    pub fn normalized(raw: &str) -> Self {
        if raw.starts_with('{') {
            Self(raw.to_string())
        } else {
            Self(format!("{{{}}}", raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field type tag as reported by the host list view.
///
/// Unknown tags are kept in `Other` so dispatch can fall back to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Choice,
    Boolean,
    MultiChoice,
    Computed,
    Integer,
    Counter,
    Number,
    Currency,
    Note,
    DateTime,
    Lookup,
    LookupMulti,
    Url,
    Taxonomy,
    TaxonomyFieldType,
    TaxonomyFieldTypeMulti,
    User,
    UserMulti,
    Attachments,
    Other(String),
}

impl FieldType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Text" => FieldType::Text,
            "Choice" => FieldType::Choice,
            "Boolean" => FieldType::Boolean,
            "MultiChoice" => FieldType::MultiChoice,
            "Computed" => FieldType::Computed,
            "Integer" => FieldType::Integer,
            "Counter" => FieldType::Counter,
            "Number" => FieldType::Number,
            "Currency" => FieldType::Currency,
            "Note" => FieldType::Note,
            "DateTime" => FieldType::DateTime,
            "Lookup" => FieldType::Lookup,
            "LookupMulti" => FieldType::LookupMulti,
            "URL" => FieldType::Url,
            "Taxonomy" => FieldType::Taxonomy,
            "TaxonomyFieldType" => FieldType::TaxonomyFieldType,
            "TaxonomyFieldTypeMulti" => FieldType::TaxonomyFieldTypeMulti,
            "User" => FieldType::User,
            "UserMulti" => FieldType::UserMulti,
            "Attachments" => FieldType::Attachments,
            other => FieldType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "Text",
            FieldType::Choice => "Choice",
            FieldType::Boolean => "Boolean",
            FieldType::MultiChoice => "MultiChoice",
            FieldType::Computed => "Computed",
            FieldType::Integer => "Integer",
            FieldType::Counter => "Counter",
            FieldType::Number => "Number",
            FieldType::Currency => "Currency",
            FieldType::Note => "Note",
            FieldType::DateTime => "DateTime",
            FieldType::Lookup => "Lookup",
            FieldType::LookupMulti => "LookupMulti",
            FieldType::Url => "URL",
            FieldType::Taxonomy => "Taxonomy",
            FieldType::TaxonomyFieldType => "TaxonomyFieldType",
            FieldType::TaxonomyFieldTypeMulti => "TaxonomyFieldTypeMulti",
            FieldType::User => "User",
            FieldType::UserMulti => "UserMulti",
            FieldType::Attachments => "Attachments",
            FieldType::Other(tag) => tag,
        }
    }

    /// Numeric types whose values arrive pre-formatted by the host
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldType::Integer | FieldType::Counter | FieldType::Number | FieldType::Currency
        )
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::parse(&s)
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        FieldType::parse(s)
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The field being rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub internal_name: String,
    /// Normalized logical name (e.g. `LinkTitleNoMenu` resolves to `Title`)
    pub stored_name: String,
    pub field_type: FieldType,
}

/// Properties fetched for a field, keyed by property name (`RichText`, `Format`, ...)
pub type FieldProperties = BTreeMap<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parse_known_tags() {
        assert_eq!(FieldType::parse("URL"), FieldType::Url);
        assert_eq!(FieldType::parse("TaxonomyFieldTypeMulti"), FieldType::TaxonomyFieldTypeMulti);
        assert_eq!(FieldType::parse("Currency"), FieldType::Currency);
    }

    #[test]
    fn test_field_type_unknown_tag_is_preserved() {
        let t = FieldType::parse("Geolocation");
        assert_eq!(t, FieldType::Other("Geolocation".to_string()));
        assert_eq!(t.as_str(), "Geolocation");
    }

    #[test]
    fn test_field_type_serde_as_tag_string() {
        let json = serde_json::to_string(&FieldType::Url).unwrap();
        assert_eq!(json, "\"URL\"");
        let back: FieldType = serde_json::from_str("\"UserMulti\"").unwrap();
        assert_eq!(back, FieldType::UserMulti);
    }

    #[test]
    fn test_view_id_normalization() {
        assert_eq!(ViewId::normalized("abc").as_str(), "{abc}");
        assert_eq!(ViewId::normalized("{abc}").as_str(), "{abc}");
    }
}
