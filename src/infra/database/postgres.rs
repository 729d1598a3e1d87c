//! PostgreSQL database client implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::{
    AppError, ContractKind, DatabaseClient, DatabaseError, Network, SeededContract,
};

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// PostgreSQL database client with connection pooling
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client with custom configuration
    pub async fn new(database_url: &str, config: PostgresConfig) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Get the underlying connection pool (for testing)
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_contract(row: &sqlx::postgres::PgRow) -> Result<SeededContract, AppError> {
        let network: String = row.get("network");
        let kind: String = row.get("kind");
        let seeded_at: DateTime<Utc> = row.get("seeded_at");

        Ok(SeededContract {
            network: network.parse()?,
            kind: kind.parse()?,
            address: row.get("address"),
            seeded_at,
        })
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }

    /// Run database migrations using sqlx migrate
    #[instrument(skip(self))]
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    #[instrument(skip(self), fields(network = %network, kind = %kind))]
    async fn record_contract(
        &self,
        network: Network,
        kind: ContractKind,
        address: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO seeded_contracts (network, kind, address, seeded_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (network, kind, address) DO NOTHING
            "#,
        )
        .bind(network.as_str())
        .bind(kind.as_str())
        .bind(address)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::from(e)))?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self), fields(network = %network))]
    async fn list_contracts(&self, network: Network) -> Result<Vec<SeededContract>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT network, kind, address, seeded_at
            FROM seeded_contracts
            WHERE network = $1
            ORDER BY seeded_at ASC, kind ASC, address ASC
            "#,
        )
        .bind(network.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(DatabaseError::Query(e.to_string())))?;

        rows.iter().map(Self::row_to_contract).collect()
    }
}
