pub mod context;
pub mod field;
pub mod payload;
pub mod regional;
pub mod values;

pub use context::*;
pub use field::*;
pub use payload::*;
pub use regional::*;
pub use values::*;
