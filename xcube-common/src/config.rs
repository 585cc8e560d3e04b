//! Configuration loading
//!
//! Configuration is a single optional TOML file. Its location is resolved in
//! priority order:
//! 1. Command-line argument (highest priority)
//! 2. `XCUBE_CONFIG` environment variable
//! 3. `<config dir>/xcube/config.toml` (e.g. `~/.config/xcube/config.toml`)
//! 4. Built-in defaults (no file)
//!
//! A file named explicitly (1 or 2) must exist and parse. The per-user file
//! is optional; when it is missing the built-in defaults are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "XCUBE_CONFIG";

/// Default card metadata API
pub const DEFAULT_ORACLE_URL: &str = "https://api.magicthegathering.io/v1";

/// Whole configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub oracle: OracleConfig,
    pub sets: SetsConfig,
    pub tables: TablesConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Card metadata API client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    pub base_url: String,

    /// Minimum spacing between two consecutive requests
    pub min_interval_ms: u64,

    /// Request timeout; requests wait indefinitely when absent
    pub timeout_secs: Option<u64>,

    /// Cards requested per page
    pub page_size: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORACLE_URL.to_string(),
            min_interval_ms: 100,
            timeout_secs: None,
            page_size: 100,
        }
    }
}

/// Set eligibility rules; each list replaces the built-in one when present
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetsConfig {
    pub kinds: Option<Vec<String>>,
    pub excluded: Option<Vec<String>>,
}

/// Additions to the built-in typo and override tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesConfig {
    pub typos: HashMap<String, String>,
    pub overrides: HashMap<String, OverrideEntry>,
}

/// A fixed print for one card name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideEntry {
    pub set: String,
    pub number: String,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the configuration file location and load it
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg) {
            ConfigLocation::Explicit(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            ConfigLocation::UserDefault(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            ConfigLocation::None => {
                debug!("No configuration file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Where the configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Named by argument or environment variable
    Explicit(PathBuf),
    /// Per-user file that exists
    UserDefault(PathBuf),
    /// No file, built-in defaults
    None,
}

/// Resolve the configuration file location (see module docs for priority)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> ConfigLocation {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigLocation::Explicit(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return ConfigLocation::Explicit(PathBuf::from(path));
        }
        warn!("{} is set but empty, ignoring it", CONFIG_ENV_VAR);
    }

    // Priority 3: per-user config file
    if let Some(path) = user_config_path() {
        if path.exists() {
            return ConfigLocation::UserDefault(path);
        }
    }

    ConfigLocation::None
}

/// `<config dir>/xcube/config.toml` for the current platform
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("xcube").join("config.toml"))
}
