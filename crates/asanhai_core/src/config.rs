//! Runtime configuration resolved from the environment.
//!
//! | Variable             | Meaning                          | Default                          |
//! |----------------------|----------------------------------|----------------------------------|
//! | `ASANHAI_DB_PATH`    | SQLite snapshot database file    | `<temp_dir>/asanhai.sqlite3`     |
//! | `ASANHAI_LOG_LEVEL`  | log level name, `trace` to `error` | `debug` (debug) / `info` (release) |
//! | `ASANHAI_LOG_DIR`    | absolute directory for log files | unset: file logging disabled     |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ASANHAI_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "ASANHAI_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "ASANHAI_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "asanhai.sqlite3";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    LogLevel(String),
    LogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::LogDir(message) => write!(f, "{LOG_DIR_ENV}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl TrackerConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, so callers and tests can supply
    /// their own variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let db_path = value(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match value(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::LogLevel)?,
            None => default_log_level(),
        };

        let log_dir = value(LOG_DIR_ENV)
            .map(|raw| normalize_log_dir(&raw).map_err(ConfigError::LogDir))
            .transpose()?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
