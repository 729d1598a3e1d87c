//! Process configuration read from the environment.

use std::path::PathBuf;

use crate::domain::ConfigError;
use crate::infra::database::{DatabaseConfig, parse_var};
use crate::infra::observability::LogFormat;

/// Everything the binary needs, read once at startup.
///
/// `NETWORK` is not part of it: the active network comes from
/// [`crate::app::init`] so the variable has a single reader.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Directory holding `{network}.data.json` files that replace the
    /// bundled datasets when seeding.
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let data_dir = lookup("DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or_default();

        Ok(Self {
            database,
            data_dir,
            log_format,
        })
    }
}
