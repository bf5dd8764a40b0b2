//! Configuration resolution for alpb-ingest
//!
//! Each setting resolves CLI → ENV → TOML → compiled default through
//! [`alpb_common::config::resolve_setting`].

use alpb_common::config::{
    default_database_path, default_storage_root, resolve_setting, TomlConfig,
    DEFAULT_LOG_LEVEL, DEFAULT_SIBLING_LOOKAHEAD_DAYS, MAX_SIBLING_LOOKAHEAD_DAYS,
};
use alpb_common::{Error, Result};
use std::path::PathBuf;

pub const ENV_DATABASE_PATH: &str = "ALPB_DATABASE_PATH";
pub const ENV_STORAGE_ROOT: &str = "ALPB_STORAGE_ROOT";
pub const ENV_BUCKET: &str = "ALPB_BUCKET";
pub const ENV_SIBLING_LOOKAHEAD_DAYS: &str = "ALPB_SIBLING_LOOKAHEAD_DAYS";
pub const ENV_LOG_LEVEL: &str = "ALPB_LOG_LEVEL";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub storage_root: Option<PathBuf>,
    pub bucket: Option<String>,
    pub sibling_lookahead_days: Option<u32>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub database_path: PathBuf,
    /// Directory holding one sub-directory per bucket
    pub storage_root: PathBuf,
    /// Bucket searched for sibling pitch files
    pub bucket: Option<String>,
    pub sibling_lookahead_days: u32,
    pub log_level: String,
}

impl IngestConfig {
    pub fn resolve(cli: CliOverrides, toml: Option<TomlConfig>) -> Result<Self> {
        let toml = toml.unwrap_or_default();

        let database_path =
            resolve_setting(cli.database_path, ENV_DATABASE_PATH, toml.database_path)?
                .unwrap_or_else(default_database_path);
        let storage_root = resolve_setting(cli.storage_root, ENV_STORAGE_ROOT, toml.storage_root)?
            .unwrap_or_else(default_storage_root);
        let bucket = resolve_setting(cli.bucket, ENV_BUCKET, toml.bucket)?;
        let sibling_lookahead_days = resolve_setting(
            cli.sibling_lookahead_days,
            ENV_SIBLING_LOOKAHEAD_DAYS,
            toml.sibling_lookahead_days,
        )?
        .unwrap_or(DEFAULT_SIBLING_LOOKAHEAD_DAYS);
        if sibling_lookahead_days > MAX_SIBLING_LOOKAHEAD_DAYS {
            return Err(Error::Config(format!(
                "sibling_lookahead_days {} exceeds the maximum of {}",
                sibling_lookahead_days, MAX_SIBLING_LOOKAHEAD_DAYS
            )));
        }
        let log_level = resolve_setting(None, ENV_LOG_LEVEL, Some(toml.logging.level))?
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            database_path,
            storage_root,
            bucket,
            sibling_lookahead_days,
            log_level,
        })
    }

    /// Directory of the bucket used for sibling lookups
    ///
    /// Without a configured bucket the storage root itself is the bucket.
    pub fn sibling_bucket_root(&self) -> PathBuf {
        match &self.bucket {
            Some(bucket) => self.storage_root.join(bucket),
            None => self.storage_root.clone(),
        }
    }
}
