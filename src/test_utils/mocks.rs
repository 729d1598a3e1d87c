//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate success and failure.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::{
    AppError, ContractKind, DatabaseClient, DatabaseError, Network, SeededContract,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock database client for testing.
///
/// Keeps seeded contracts in memory in insertion order.
///
/// # Example
///
/// ```
/// use network_dataset::test_utils::{MockDatabaseClient, mocks::MockConfig};
///
/// let mock = MockDatabaseClient::new();
/// let failing_mock = MockDatabaseClient::with_config(MockConfig::failure("DB error"));
/// ```
pub struct MockDatabaseClient {
    storage: Mutex<Vec<SeededContract>>,
    config: MockConfig,
    call_count: AtomicU64,
    is_healthy: AtomicBool,
    migrations_run: AtomicBool,
}

impl MockDatabaseClient {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            storage: Mutex::new(Vec::new()),
            config,
            call_count: AtomicU64::new(0),
            is_healthy: AtomicBool::new(true),
            migrations_run: AtomicBool::new(false),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Whether `run_migrations` has completed.
    pub fn migrations_run(&self) -> bool {
        self.migrations_run.load(Ordering::Relaxed)
    }

    /// Number of stored contracts across all networks.
    pub fn contract_count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Clears all stored contracts.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }

    fn increment_call_count(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock database error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn health_check(&self) -> Result<(), AppError> {
        self.increment_call_count();

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Database(DatabaseError::Connection(
                "Mock database unhealthy".to_string(),
            )));
        }
        self.check_should_fail()
    }

    async fn run_migrations(&self) -> Result<(), AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        self.migrations_run.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn record_contract(
        &self,
        network: Network,
        kind: ContractKind,
        address: &str,
    ) -> Result<bool, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut storage = self.storage.lock().unwrap();
        let exists = storage
            .iter()
            .any(|c| c.network == network && c.kind == kind && c.address == address);
        if exists {
            return Ok(false);
        }
        storage.push(SeededContract::new(network, kind, address));
        Ok(true)
    }

    async fn list_contracts(&self, network: Network) -> Result<Vec<SeededContract>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        Ok(self
            .storage
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.network == network)
            .cloned()
            .collect())
    }
}
