//! Concrete database client implementations.
//!
//! This module contains the Postgres adapter implementing the
//! `DatabaseClient` trait, its environment configuration, and the
//! process-wide shared instance.

pub mod postgres;
pub mod shared;

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::domain::ConfigError;

pub use postgres::{PostgresClient, PostgresConfig};
pub use shared::{SharedClient, shared_client, shared_client_with};

/// Connection settings for the shared client.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: SecretString,
    pub pool: PostgresConfig,
}

impl DatabaseConfig {
    pub const URL_VAR: &'static str = "DATABASE_URL";

    /// Reads `DATABASE_URL` and the optional `DB_*` pool settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(Self::URL_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(Self::URL_VAR.to_string()))?;

        let defaults = PostgresConfig::default();
        let pool = PostgresConfig {
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),
            min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS")?
                .unwrap_or(defaults.min_connections),
            acquire_timeout: parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
            ..defaults
        };

        if pool.min_connections > pool.max_connections {
            return Err(ConfigError::InvalidValue {
                key: "DB_MIN_CONNECTIONS".to_string(),
                message: format!(
                    "must not exceed DB_MAX_CONNECTIONS ({})",
                    pool.max_connections
                ),
            });
        }

        Ok(Self {
            url: SecretString::from(url),
            pool,
        })
    }
}

pub(crate) fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}
