use listcell_sdk::types::{FieldType, RendererContent, RendererSelection};
use listcell_sdk::{
    CellRequest, Client, Config, FieldPropertySource, FieldValue, MemorySessionStore,
    RegionalSettingsSource, RowData, SessionStore, describe_field,
};
use listcell_testing::{CountingPropertySource, RowFixture, StaticRegionalSource, sample_page};
use serde_json::json;
use std::sync::Arc;

fn german_source() -> Arc<StaticRegionalSource> {
    Arc::new(
        StaticRegionalSource::new(0)
            .with_separators(".", ",")
            .with_sample_date("06.04.1999"),
    )
}

#[tokio::test]
async fn test_render_request_title() -> anyhow::Result<()> {
    let client = Client::builder().build()?;
    let request = CellRequest::from_json(
        r#"{
            "value": "Quarterly plan",
            "field": {"id": "f1", "internalName": "LinkTitle", "type": "Computed"},
            "row": {"ID": "12"},
            "page": {"webUrl": "https://contoso.example/sites/team/", "listId": "{L}", "listTitle": "Tasks"},
            "options": {"className": "cell"}
        }"#,
    )?;

    let payload = client.render_request(&request).await?;
    assert_eq!(payload.selection(), RendererSelection::Title);
    assert_eq!(payload.class_name.as_deref(), Some("cell"));
    let RendererContent::Title(title) = payload.content else {
        panic!("expected title content");
    };
    assert!(title.is_link);
    assert_eq!(title.item_id.as_deref(), Some("12"));
    assert_eq!(title.base_url, "https://contoso.example/sites/team");
    Ok(())
}

#[tokio::test]
async fn test_render_request_without_field_is_rejected() -> anyhow::Result<()> {
    let client = Client::builder().build()?;
    let request = CellRequest::from_json(r#"{"value": "x"}"#)?;

    let err = client.render_request(&request).await.unwrap_err();
    assert!(matches!(err, listcell_sdk::Error::InvalidInput(_)));
    Ok(())
}

#[tokio::test]
async fn test_cell_text_without_field_is_empty() -> anyhow::Result<()> {
    let client = Client::builder().build()?;
    let text = client
        .cell_text(&json!("anything"), None, &RowData::Unavailable, &sample_page())
        .await;
    assert_eq!(text, "");
    Ok(())
}

#[tokio::test]
async fn test_regional_settings_drive_numbers_and_dates() -> anyhow::Result<()> {
    let source = german_source();
    let regional: Arc<dyn RegionalSettingsSource> = source.clone();
    let client = Client::builder().regional_source(regional).build()?;

    // invariant until resolved
    assert_eq!(client.format_number("1234567.5").as_deref(), Some("1,234,567.5"));

    let settings = client.resolve_regional_settings().await;
    assert_eq!(settings.web_date_format, "DD.MM.YYYY");
    assert_eq!(client.format_number("1234567.5").as_deref(), Some("1.234.567,5"));
    assert_eq!(client.deformat_number("1.234.567,5"), "1234567.5");

    let field = describe_field("f1", "Due", FieldType::DateTime);
    let value = client.cell_value(&json!("06.04.1999"), &field, &RowData::Unavailable, &sample_page());
    assert_eq!(
        value,
        FieldValue::Date(chrono::NaiveDate::from_ymd_opt(1999, 4, 6))
    );

    client.resolve_regional_settings().await;
    assert_eq!(source.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_dispose_clears_session_caches() -> anyhow::Result<()> {
    let properties = Arc::new(CountingPropertySource::new().with_property("f1", "Format", json!("Image")));
    let property_source: Arc<dyn FieldPropertySource> = properties.clone();
    let regional: Arc<dyn RegionalSettingsSource> = german_source();
    let store = Arc::new(MemorySessionStore::new());
    let session: Arc<dyn SessionStore> = store.clone();

    let client = Client::builder()
        .property_source(property_source)
        .regional_source(regional)
        .session_store(session)
        .build()?;
    let config = Config::default();

    let field = describe_field("f1", "Logo", FieldType::Url);
    let row = RowFixture::new(3).build();
    let page = sample_page();
    let options = Default::default();

    let payload = client
        .render_cell(&json!("https://x.example/logo.png"), &field, &row, &page, &options)
        .await;
    let RendererContent::Url(url) = payload.content else {
        panic!("expected url content");
    };
    assert!(url.is_image_url);
    client.resolve_regional_settings().await;
    assert!(store.get_item(&config.regional_settings_key)?.is_some());
    assert!(store.get_item(&config.view_fields_key)?.is_some());

    client.dispose();
    assert!(store.get_item(&config.regional_settings_key)?.is_none());
    assert!(store.get_item(&config.view_fields_key)?.is_none());
    assert_eq!(client.regional_settings().web_date_format, "MM/DD/YYYY");

    client
        .render_cell(&json!("https://x.example/logo.png"), &field, &row, &page, &options)
        .await;
    assert_eq!(properties.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_builder_loads_config_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    let config = Config {
        regional_settings_key: "custom.regional".to_string(),
        session_dir: Some(dir.path().join("session")),
        ..Config::default()
    };
    config.save_to(&path)?;

    let client = Client::builder()
        .config_path(&path)
        .regional_source(german_source())
        .build()?;
    assert_eq!(client.config().regional_settings_key, "custom.regional");

    client.resolve_regional_settings().await;
    assert!(dir.path().join("session").join("custom.regional.json").exists());
    Ok(())
}
