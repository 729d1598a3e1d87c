//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::AppError;
use super::types::{ContractKind, Network, SeedOutcome, SeededContract};

/// Database client trait for the contract registry
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Check database connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// Create or upgrade the registry schema
    async fn run_migrations(&self) -> Result<(), AppError>;

    /// Store a contract address, returning `false` when it was already stored
    async fn record_contract(
        &self,
        network: Network,
        kind: ContractKind,
        address: &str,
    ) -> Result<bool, AppError>;

    /// List contracts stored for a network, oldest first
    async fn list_contracts(&self, network: Network) -> Result<Vec<SeededContract>, AppError>;
}

/// Handles the contracts of one or more kinds while a dataset is seeded.
#[async_trait]
pub trait Seeder: Send + Sync {
    async fn seed(
        &self,
        network: Network,
        kind: ContractKind,
        address: &str,
    ) -> Result<SeedOutcome, AppError>;

    fn can_process(&self, kind: ContractKind) -> bool;
}
