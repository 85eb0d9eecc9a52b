//! Testing infrastructure for listcell tests.
//!
//! - `sources`: scripted remote collaborators that count their calls
//! - `fixtures`: row data and page context builders

pub mod fixtures;
pub mod sources;

pub use fixtures::{RowFixture, sample_page};
pub use sources::{CountingPropertySource, StaticRegionalSource};
