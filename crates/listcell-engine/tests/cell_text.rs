use listcell_engine::{Cell, Dispatcher};
use listcell_providers::{FieldPropertySource, MemorySessionStore, RowData};
use listcell_runtime::{FieldMetadataAccessor, describe_field};
use listcell_testing::{CountingPropertySource, RowFixture, sample_page};
use listcell_types::FieldType;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

fn dispatcher(source: CountingPropertySource) -> Dispatcher {
    let source: Arc<dyn FieldPropertySource> = Arc::new(source);
    Dispatcher::new(FieldMetadataAccessor::new(
        Some(source),
        Arc::new(MemorySessionStore::new()),
        "listcell.loadedViewFields",
        Duration::from_secs(5),
    ))
}

async fn text_of(
    dispatcher: &Dispatcher,
    value: Value,
    internal_name: &str,
    field_type: FieldType,
    row: &RowData,
) -> String {
    let field = describe_field("f1", internal_name, field_type);
    let page = sample_page();
    dispatcher
        .field_text(&Cell::new(&value, &field, row, &page))
        .await
}

#[tokio::test]
async fn test_rich_note_text_strips_markup() {
    let dispatcher =
        dispatcher(CountingPropertySource::new().with_property("f1", "RichText", json!(true)));
    let text = text_of(
        &dispatcher,
        json!("<p>Hello <b>team</b></p><script>alert(1)</script>"),
        "Body",
        FieldType::Note,
        &RowData::Unavailable,
    )
    .await;
    assert_eq!(text, "Hello team");
}

#[tokio::test]
async fn test_multi_value_fields_join_lines() {
    let dispatcher = dispatcher(CountingPropertySource::new());
    let row = RowData::Unavailable;

    let users = json!([{"id": "1", "title": "Ada"}, {"id": "2", "title": "Grace"}]);
    assert_eq!(text_of(&dispatcher, users, "Team", FieldType::UserMulti, &row).await, "Ada\nGrace");

    let lookups = json!([{"lookupId": 1, "lookupValue": "Acme"}, {"lookupId": 2, "lookupValue": "Globex"}]);
    assert_eq!(text_of(&dispatcher, lookups, "Customers", FieldType::LookupMulti, &row).await, "Acme\nGlobex");

    let term = json!({"Label": "EMEA", "TermID": "t1"});
    assert_eq!(text_of(&dispatcher, term, "Region", FieldType::Taxonomy, &row).await, "EMEA");

    assert_eq!(text_of(&dispatcher, Value::Null, "Team", FieldType::User, &row).await, "");
}

#[tokio::test]
async fn test_url_text_depends_on_format() {
    let row = RowFixture::new(1).value("Site.desc", json!("Intranet")).build();

    let hyperlink = dispatcher(CountingPropertySource::new());
    assert_eq!(
        text_of(&hyperlink, json!("https://intranet.example"), "Site", FieldType::Url, &row).await,
        "Intranet"
    );

    let image = dispatcher(CountingPropertySource::new().with_property("f1", "Format", json!("Image")));
    assert_eq!(
        text_of(&image, json!("https://intranet.example/a.png"), "Site", FieldType::Url, &row).await,
        ""
    );
}

#[tokio::test]
async fn test_computed_url_falls_back_to_value() {
    let dispatcher = dispatcher(CountingPropertySource::new());
    let with_desc = RowFixture::new(1).value("URL.desc", json!("Home")).build();

    assert_eq!(
        text_of(&dispatcher, json!("https://x.example"), "URLNoMenu", FieldType::Computed, &with_desc).await,
        "Home"
    );
    assert_eq!(
        text_of(&dispatcher, json!("https://x.example"), "URLNoMenu", FieldType::Computed, &RowData::Unavailable).await,
        "https://x.example"
    );
}

#[tokio::test]
async fn test_date_text_uses_overridden_strings() {
    let mut overrides = BTreeMap::new();
    overrides.insert("L_RelativeDateTime_Today".to_string(), "Heute".to_string());
    let dispatcher = dispatcher(CountingPropertySource::new()).with_strings(overrides);
    let row = RowFixture::new(1).friendly_date("Created", "1|0|9").build();

    assert_eq!(text_of(&dispatcher, json!("6/4/2024"), "Created", FieldType::DateTime, &row).await, "Heute");
}

#[tokio::test]
async fn test_attachments_and_unknown_types() {
    let dispatcher = dispatcher(CountingPropertySource::new());
    let row = RowData::Unavailable;

    assert_eq!(text_of(&dispatcher, json!("2"), "Attachments", FieldType::Attachments, &row).await, "");
    assert_eq!(
        text_of(&dispatcher, json!(12.5), "Score", FieldType::Other("Rating".to_string()), &row).await,
        "12.5"
    );
}
