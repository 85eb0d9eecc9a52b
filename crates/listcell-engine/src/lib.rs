// Engine module - cell classification and payload derivation
// Sits between the runtime services (metadata, regional settings) and the host renderer

pub mod cell;
pub mod dispatch;
pub mod text;
pub mod value;

pub use cell::{Cell, value_to_text};
pub use dispatch::Dispatcher;
pub use value::{FieldValue, field_value};
