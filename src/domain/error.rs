//! Application error types with proper error chaining.

use thiserror::Error;

use super::types::Network;

#[derive(Error, Debug, Clone)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query execution failed: {0}")]
    Query(String),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Pool exhausted: {0}")]
    PoolExhausted(String),
    #[error("Migration failed: {0}")]
    Migration(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures while loading a network dataset.
#[derive(Error, Debug, Clone)]
pub enum DatasetError {
    #[error("Failed to parse {network} dataset: {message}")]
    Parse { network: Network, message: String },
    #[error("Invalid record #{index} in {network} dataset: {message}")]
    InvalidRecord {
        network: Network,
        index: usize,
        message: String,
    },
    #[error("Failed to read dataset file '{path}': {message}")]
    Io { path: String, message: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Row not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted("Pool timed out".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.code().is_some_and(|code| code == "23505") {
                    return DatabaseError::Duplicate(db_err.message().to_string());
                }
                DatabaseError::Query(db_err.message().to_string())
            }
            _ => DatabaseError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(DatabaseError::Migration(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_conversions() {
        let not_found = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(matches!(not_found, DatabaseError::NotFound(_)));

        let pool_timeout = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(pool_timeout, DatabaseError::PoolExhausted(_)));

        // Anything else falls back to a query error
        let generic = DatabaseError::from(sqlx::Error::WorkerCrashed);
        assert!(matches!(generic, DatabaseError::Query(_)));
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::Connection("timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: timeout");

        let err = DatabaseError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "Query execution failed: syntax error");

        let err = DatabaseError::Duplicate("unique violation".to_string());
        assert_eq!(err.to_string(), "Duplicate record: unique violation");

        let err = DatabaseError::Migration("failed".to_string());
        assert_eq!(err.to_string(), "Migration failed: failed");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: DATABASE_URL"
        );

        let err = ConfigError::InvalidValue {
            key: "DB_MAX_CONNECTIONS".to_string(),
            message: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'DB_MAX_CONNECTIONS': not a number"
        );
    }

    #[test]
    fn test_dataset_error_display() {
        let err = DatasetError::Parse {
            network: Network::Testnet2,
            message: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse testnet2 dataset: expected value"
        );

        let err = DatasetError::InvalidRecord {
            network: Network::Mainnet,
            index: 3,
            message: "minter: not a hex address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record #3 in mainnet dataset: minter: not a hex address"
        );

        let err = DatasetError::Io {
            path: "/tmp/missing.json".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read dataset file '/tmp/missing.json': not found"
        );
    }

    #[test]
    fn test_app_error_from_dataset_error() {
        let err = DatasetError::Parse {
            network: Network::Testnet,
            message: "eof".to_string(),
        };
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Dataset(DatasetError::Parse { .. })));
        assert_eq!(app_err.to_string(), "Failed to parse testnet dataset: eof");
    }

    #[test]
    fn test_app_error_from_migrate_error() {
        let mig_err = sqlx::migrate::MigrateError::VersionMissing(1);
        let app_err: AppError = mig_err.into();

        match app_err {
            AppError::Database(DatabaseError::Migration(msg)) => {
                assert!(msg.contains("migration 1 was previously applied"));
            }
            _ => panic!("Expected DatabaseError::Migration, got {:?}", app_err),
        }
    }
}
