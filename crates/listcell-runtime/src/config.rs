use crate::{Error, Result};
use listcell_providers::{FileSessionStore, MemorySessionStore, SessionStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REGIONAL_SETTINGS_KEY: &str = "listcell.regionalSettings";
pub const DEFAULT_VIEW_FIELDS_KEY: &str = "listcell.loadedViewFields";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LISTCELL_CONFIG environment variable (with tilde expansion)
/// 3. User config directory
/// 4. ~/.listcell/config.toml (fallback for systems without a config dir)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("LISTCELL_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("listcell").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".listcell").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bound on every remote call, in milliseconds
    pub fetch_timeout_ms: u64,
    /// Session storage key of the resolved regional settings
    pub regional_settings_key: String,
    /// Session storage key of the per-view field property cache
    pub view_fields_key: String,
    /// Directory of the file-backed session store; in-memory when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
    /// Overrides of localized strings, keyed like the default table
    pub strings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            regional_settings_key: DEFAULT_REGIONAL_SETTINGS_KEY.to_string(),
            view_fields_key: DEFAULT_VIEW_FIELDS_KEY.to_string(),
            session_dir: None,
            strings: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Session store selected by `session_dir`
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        match &self.session_dir {
            Some(dir) => Arc::new(FileSessionStore::new(expand_tilde(&dir.to_string_lossy()))),
            None => Arc::new(MemorySessionStore::new()),
        }
    }
}
