use crate::args::LogLevel;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";

/// Filter from `--log-level`, else `RUST_LOG`, else `warn`
pub fn build_env_filter(level: Option<LogLevel>) -> anyhow::Result<EnvFilter> {
    if let Some(level) = level {
        return EnvFilter::try_new(level.to_string())
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", level, e));
    }

    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)))
}

/// Install a stderr subscriber; stdout carries command output only
pub fn init_logging(level: Option<LogLevel>) -> anyhow::Result<()> {
    let filter = build_env_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}
