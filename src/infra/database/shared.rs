//! Process-wide database client.
//!
//! The client is built on first use and every later caller receives the
//! same instance. A failed construction is returned to the caller and not
//! stored, so the next call tries again.

use std::future::Future;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::AppError;

use super::{DatabaseConfig, PostgresClient};

static POSTGRES: SharedClient<PostgresClient> = SharedClient::new();

/// Holds at most one client of type `T` once initialised.
pub struct SharedClient<T> {
    cell: OnceCell<Arc<T>>,
}

impl<T> SharedClient<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Returns the stored client, running `init` if there is none yet.
    ///
    /// Concurrent callers wait for a single in-flight initialiser.
    pub async fn get_or_try_init<F, Fut, E>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell
            .get_or_try_init(|| async move { init().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T> Default for SharedClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared Postgres client, configured from the environment on first use.
///
/// # Errors
/// Returns a config error when `DATABASE_URL` is missing or pool settings
/// are invalid, and a database error when the connection fails.
pub async fn shared_client() -> Result<Arc<PostgresClient>, AppError> {
    POSTGRES
        .get_or_try_init(|| async {
            let config = DatabaseConfig::from_env()?;
            connect(&config).await
        })
        .await
}

/// The shared Postgres client, built from `config` if not yet initialised.
///
/// Once a client exists, `config` is ignored.
pub async fn shared_client_with(config: &DatabaseConfig) -> Result<Arc<PostgresClient>, AppError> {
    POSTGRES.get_or_try_init(|| connect(config)).await
}

async fn connect(config: &DatabaseConfig) -> Result<PostgresClient, AppError> {
    let client = PostgresClient::new(config.url.expose_secret(), config.pool.clone()).await?;
    info!(
        max_connections = config.pool.max_connections,
        "Shared database client initialised"
    );
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::domain::{DatabaseClient, DatabaseError};
    use crate::test_utils::MockDatabaseClient;

    #[tokio::test]
    async fn test_returns_same_instance() {
        let shared = SharedClient::<MockDatabaseClient>::new();
        assert!(!shared.is_initialized());
        assert!(shared.get().is_none());

        let first = shared
            .get_or_try_init(|| async { Ok::<_, AppError>(MockDatabaseClient::new()) })
            .await
            .unwrap();
        let second = shared
            .get_or_try_init(|| async { Ok::<_, AppError>(MockDatabaseClient::new()) })
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &shared.get().unwrap()));
        assert!(shared.is_initialized());
    }

    #[tokio::test]
    async fn test_concurrent_callers_initialise_once() {
        let shared = Arc::new(SharedClient::<MockDatabaseClient>::new());
        let inits = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let shared = Arc::clone(&shared);
            let inits = Arc::clone(&inits);
            handles.push(tokio::spawn(async move {
                shared
                    .get_or_try_init(|| async {
                        inits.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok::<_, AppError>(MockDatabaseClient::new())
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut clients = Vec::new();
        for handle in handles {
            clients.push(handle.await.unwrap());
        }

        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn test_failed_init_is_not_cached() {
        let shared = SharedClient::<MockDatabaseClient>::new();

        let err = shared
            .get_or_try_init(|| async {
                Err::<MockDatabaseClient, _>(AppError::Database(DatabaseError::Connection(
                    "refused".to_string(),
                )))
            })
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Database(DatabaseError::Connection(_))));
        assert!(!shared.is_initialized());

        let client = shared
            .get_or_try_init(|| async { Ok::<_, AppError>(MockDatabaseClient::new()) })
            .await
            .unwrap();
        assert!(client.health_check().await.is_ok());
        assert!(shared.is_initialized());
    }
}
