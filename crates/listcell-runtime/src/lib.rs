pub mod config;
pub mod error;
pub mod metadata;
pub mod names;
pub mod regional;

pub use config::{Config, resolve_config_path};
pub use error::{Error, Result};
pub use metadata::{
    FieldMetadataAccessor, ViewFieldCache, list_ref, resolve_view_id, row_text, row_value,
};
pub use names::{describe_field, is_title_link, stored_field_name};
pub use regional::{RegionalSettingsProvider, hours_offset};
