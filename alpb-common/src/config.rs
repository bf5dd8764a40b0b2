//! Configuration loading
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; the defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Sibling-file lookahead used when nothing overrides it
pub const DEFAULT_SIBLING_LOOKAHEAD_DAYS: u32 = 1;

/// Widest accepted sibling-file lookahead
pub const MAX_SIBLING_LOOKAHEAD_DAYS: u32 = 31;

/// Log level used when nothing overrides it
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`
///
/// ```toml
/// database_path = "/var/lib/alpb/tracking.db"
/// storage_root = "/srv/alpb/buckets"
/// bucket = "alpb-trackman"
/// sibling_lookahead_days = 1
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub storage_root: Option<PathBuf>,
    pub bucket: Option<String>,
    pub sibling_lookahead_days: Option<u32>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the TOML config
///
/// An explicitly named file must exist. Without one, the platform locations
/// are tried (`~/.config/alpb/config.toml`, then `/etc/alpb/config.toml`)
/// and `None` is returned when neither exists.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    if let Some(path) = explicit {
        info!("Loading config file {}", path.display());
        return read_toml_config(path).map(Some);
    }

    match default_config_file() {
        Some(path) => {
            info!("Loading config file {}", path.display());
            read_toml_config(&path).map(Some)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(None)
        }
    }
}

/// First existing config file among the platform locations
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("alpb").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/alpb/config.toml");
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Resolve one setting: CLI, then environment, then TOML
///
/// Returns `Ok(None)` when no tier supplies a value so the caller can apply
/// its compiled default. An environment value that fails to parse is a
/// configuration error rather than a silent fallback.
pub fn resolve_setting<T>(cli: Option<T>, env_var: &str, toml: Option<T>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = cli {
        return Ok(Some(value));
    }

    if let Ok(raw) = std::env::var(env_var) {
        if !raw.trim().is_empty() {
            let value = raw.trim().parse::<T>().map_err(|e| {
                Error::Config(format!("{}={:?} is not valid: {}", env_var, raw, e))
            })?;
            return Ok(Some(value));
        }
    }

    Ok(toml)
}

/// Default SQLite database location
pub fn default_database_path() -> PathBuf {
    default_data_folder().join("tracking.db")
}

/// Default directory holding one sub-directory per bucket
pub fn default_storage_root() -> PathBuf {
    default_data_folder().join("buckets")
}

/// OS-dependent data folder
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/alpb (or /var/lib/alpb for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("alpb"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/alpb"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("alpb"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/alpb"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("alpb"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\alpb"))
    } else {
        PathBuf::from("./alpb_data")
    }
}
