// Error types
pub mod error;

// Remote collaborators (field metadata, regional settings)
pub mod traits;

// Session-scoped persisted state
pub mod session;

// Row-scoped values
pub mod row;

pub use error::{Error, Result};
pub use row::{LegacyRowTable, RowData};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use traits::{FieldPropertySource, ListRef, RegionalSettingsSource, RemoteRegionalSettings};
