// Offline front end over listcell-sdk.
//
// A cell is described by one JSON document (the SDK's CellRequest, plus an
// optional `properties` map standing in for the remote field schema), so a
// dispatch decision can be reproduced without a live list.

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod sources;

pub use args::{Cli, Commands, LogLevel};
pub use commands::run;
