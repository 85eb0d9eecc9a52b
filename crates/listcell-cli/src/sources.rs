use async_trait::async_trait;
use listcell_providers::{FieldPropertySource, ListRef, Result};
use listcell_types::FieldId;
use serde_json::{Map, Value};

/// Field schema supplied inline with a request (`"properties": {"RichText": true}`)
#[derive(Debug, Clone, Default)]
pub struct InlinePropertySource {
    properties: Map<String, Value>,
}

impl InlinePropertySource {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self { properties }
    }
}

#[async_trait]
impl FieldPropertySource for InlinePropertySource {
    async fn fetch_property(
        &self,
        _list: &ListRef,
        _field_id: &FieldId,
        property: &str,
    ) -> Result<Option<Value>> {
        Ok(self.properties.get(property).cloned())
    }
}
