use crate::args::{Cli, Commands};
use crate::handlers;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init_logging(cli.log_level)?;

    match cli.command {
        Commands::Render { input, compact } => {
            handlers::render::handle(cli.config.as_deref(), input.as_deref(), compact)
        }
        Commands::Text { input } => handlers::text::handle(cli.config.as_deref(), input.as_deref()),
        Commands::StoredName { internal_name } => {
            println!("{}", listcell_runtime::stored_field_name(&internal_name));
            Ok(())
        }
    }
}
