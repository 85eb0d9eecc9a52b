//! listcell-sdk: type-aware rendering data for list view cells.
//!
//! # Overview
//!
//! A host hands over a cell (its raw value, the field it belongs to, the row
//! and the page it sits on) and gets back a [`DisplayPayload`]: which renderer
//! to use and the data that renderer needs. Field properties and regional
//! settings are fetched at most once per session and cached in a
//! [`SessionStore`].
//!
//! # Quickstart
//!
//! ```no_run
//! use listcell_sdk::{Client, CellRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder().build()?;
//! let request = CellRequest::from_json(r#"{
//!     "value": "Quarterly plan",
//!     "field": {"id": "f1", "internalName": "LinkTitle", "type": "Computed"},
//!     "row": {"ID": "12"},
//!     "page": {"webUrl": "https://contoso.example", "listId": "{L}", "listTitle": "Tasks"}
//! }"#)?;
//! let payload = client.render_request(&request).await?;
//! println!("{:?}", payload.selection());
//! client.dispose();
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! This SDK is a facade over:
//! - `listcell-types`: field, page and payload models
//! - `listcell-format`: dates, digits, HTML and URL helpers
//! - `listcell-providers`: remote collaborator traits, row data and session stores
//! - `listcell-runtime`: config, field metadata and regional settings caches
//! - `listcell-engine`: per-field-type dispatch

pub mod client;
pub mod error;
pub mod request;

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use request::{CellRequest, FieldSpec};

pub use listcell_engine::FieldValue;
pub use listcell_providers::{
    FieldPropertySource, FileSessionStore, ListRef, MemorySessionStore, RegionalSettingsSource,
    RemoteRegionalSettings, RowData, SessionStore,
};
pub use listcell_runtime::{Config, describe_field};

/// Domain models re-exported for hosts
pub mod types {
    pub use listcell_types::*;
}

pub use listcell_types::{DisplayPayload, FieldDescriptor, PageContext, RenderOptions};
