//! Structured logging setup.
//!
//! `RUST_LOG` controls filtering (default `info,sqlx=warn`); `LOG_FORMAT`
//! selects between human-readable and JSON output.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, ConfigError};

const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                message: format!("expected 'pretty' or 'json', got '{other}'"),
            }),
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .try_init(),
    };

    result.map_err(|e| AppError::Internal(format!("failed to install subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_second_init_fails() {
        // Only the first install in a process can succeed.
        let _ = init_tracing(LogFormat::Pretty);
        assert!(init_tracing(LogFormat::Json).is_err());
    }
}
