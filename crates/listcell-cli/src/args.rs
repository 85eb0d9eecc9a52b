use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "listcell")]
#[command(about = "Render list view cells described in JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $LISTCELL_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Overrides RUST_LOG when given
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the display payload for a cell request
    Render {
        /// Request file; reads stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Print the plain text of a cell request
    Text {
        /// Request file; reads stdin when omitted or `-`
        input: Option<PathBuf>,
    },

    /// Print the stored name a field internal name maps to
    StoredName {
        internal_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
