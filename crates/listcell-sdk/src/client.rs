use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::request::CellRequest;
use listcell_engine::{Cell, Dispatcher, FieldValue};
use listcell_format::{deformat_digit, format_digit};
use listcell_providers::{FieldPropertySource, RegionalSettingsSource, RowData, SessionStore};
use listcell_runtime::{Config, FieldMetadataAccessor, RegionalSettingsProvider};
use listcell_types::{DisplayPayload, FieldDescriptor, PageContext, RegionalSettings, RenderOptions};
use serde_json::Value;

/// Session-scoped entry point, created at host init and disposed at teardown
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: Config,
    regional: RegionalSettingsProvider,
    dispatcher: Dispatcher,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client using the config file at the default location, without remote sources
    pub fn from_default_config() -> Result<Self> {
        Self::builder().config(Config::load()?).build()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Renderer selection and display data for one cell
    pub async fn render_cell(
        &self,
        value: &Value,
        field: &FieldDescriptor,
        row: &RowData,
        page: &PageContext,
        options: &RenderOptions,
    ) -> DisplayPayload {
        let cell = Cell::new(value, field, row, page);
        self.inner.dispatcher.dispatch(&cell, options).await
    }

    /// Render a cell described by a [`CellRequest`]
    pub async fn render_request(&self, request: &CellRequest) -> Result<DisplayPayload> {
        let field = request
            .field()
            .ok_or_else(|| Error::InvalidInput("cell request has no field".to_string()))?;
        let row = request.row_data();
        Ok(self
            .render_cell(&request.value, &field, &row, &request.page, &request.options)
            .await)
    }

    /// Plain text of a cell; empty when the field is unknown
    pub async fn cell_text(
        &self,
        value: &Value,
        field: Option<&FieldDescriptor>,
        row: &RowData,
        page: &PageContext,
    ) -> String {
        let Some(field) = field else {
            tracing::debug!("no field metadata for cell, text is empty");
            return String::new();
        };
        let cell = Cell::new(value, field, row, page);
        self.inner.dispatcher.field_text(&cell).await
    }

    /// Typed value of a cell under the current regional settings
    pub fn cell_value(
        &self,
        value: &Value,
        field: &FieldDescriptor,
        row: &RowData,
        page: &PageContext,
    ) -> FieldValue {
        let cell = Cell::new(value, field, row, page);
        listcell_engine::field_value(&cell, &self.regional_settings())
    }

    /// Cached regional settings, invariant until resolved
    pub fn regional_settings(&self) -> RegionalSettings {
        self.inner.regional.settings()
    }

    pub async fn resolve_regional_settings(&self) -> RegionalSettings {
        self.inner.regional.resolve().await
    }

    /// Group an invariant number string with the web's separators
    pub fn format_number(&self, digits: &str) -> Option<String> {
        format_digit(digits, &self.regional_settings().separators())
    }

    /// Strip the web's separators back to an invariant number string
    pub fn deformat_number(&self, digits: &str) -> String {
        deformat_digit(digits, &self.regional_settings().separators())
    }

    /// Clear every session-scoped cache and its persisted copy
    pub fn dispose(&self) {
        self.inner.regional.dispose();
        self.inner.dispatcher.metadata().dispose();
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    config: Option<Config>,
    config_path: Option<PathBuf>,
    property_source: Option<Arc<dyn FieldPropertySource>>,
    regional_source: Option<Arc<dyn RegionalSettingsSource>>,
    store: Option<Arc<dyn SessionStore>>,
}

impl ClientBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the config from a TOML file (ignored when `config` is set)
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn property_source(mut self, source: Arc<dyn FieldPropertySource>) -> Self {
        self.property_source = Some(source);
        self
    }

    pub fn regional_source(mut self, source: Arc<dyn RegionalSettingsSource>) -> Self {
        self.regional_source = Some(source);
        self
    }

    /// Session store to persist caches in; defaults to the one selected by the config
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Client> {
        let config = match (self.config, &self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => Config::load_from(path)?,
            (None, None) => Config::default(),
        };
        let store = self.store.unwrap_or_else(|| config.session_store());

        let regional = RegionalSettingsProvider::new(
            self.regional_source,
            store.clone(),
            config.regional_settings_key.clone(),
            config.fetch_timeout(),
        );
        let metadata = FieldMetadataAccessor::new(
            self.property_source,
            store,
            config.view_fields_key.clone(),
            config.fetch_timeout(),
        );
        let dispatcher = Dispatcher::new(metadata).with_strings(config.strings.clone());

        tracing::debug!(
            timeout_ms = config.fetch_timeout_ms,
            persistent = config.session_dir.is_some(),
            "listcell client ready"
        );

        Ok(Client {
            inner: Arc::new(ClientInner {
                config,
                regional,
                dispatcher,
            }),
        })
    }
}
