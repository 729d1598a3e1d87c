//! Seeding the contract registry from a network dataset.
//!
//! Each record is handled on its own task; within a record, every present
//! contract goes to the first seeder accepting its kind.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{
    AppError, ContractKind, DatabaseClient, Dataset, Network, NetworkRecord, SeedOutcome,
    SeedReport, Seeder,
};

/// Stores contract addresses of the given kinds in the registry.
pub struct ContractSeeder {
    db: Arc<dyn DatabaseClient>,
    kinds: Vec<ContractKind>,
}

impl ContractSeeder {
    #[must_use]
    pub fn new(db: Arc<dyn DatabaseClient>, kind: ContractKind) -> Self {
        Self::for_kinds(db, vec![kind])
    }

    #[must_use]
    pub fn for_kinds(db: Arc<dyn DatabaseClient>, kinds: Vec<ContractKind>) -> Self {
        Self { db, kinds }
    }
}

#[async_trait]
impl Seeder for ContractSeeder {
    async fn seed(
        &self,
        network: Network,
        kind: ContractKind,
        address: &str,
    ) -> Result<SeedOutcome, AppError> {
        if self.db.record_contract(network, kind, address).await? {
            info!(%network, %kind, address, "Seeded contract");
            Ok(SeedOutcome::Seeded)
        } else {
            debug!(%network, %kind, address, "Contract already seeded");
            Ok(SeedOutcome::AlreadyPresent)
        }
    }

    fn can_process(&self, kind: ContractKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Checks connectivity, then applies pending migrations.
///
/// An unreachable database fails here as a connection error instead of
/// surfacing later as a migration failure.
pub async fn prepare_registry(db: &dyn DatabaseClient) -> Result<(), AppError> {
    db.health_check().await?;
    db.run_migrations().await?;
    info!("Contract registry ready");
    Ok(())
}

/// Walks a dataset and dispatches its contracts to seeders.
pub struct DataSeeder {
    network: Network,
    records: Arc<[NetworkRecord]>,
    seeders: Arc<[Arc<dyn Seeder>]>,
}

impl DataSeeder {
    #[must_use]
    pub fn new(dataset: &Dataset, seeders: Vec<Arc<dyn Seeder>>) -> Self {
        Self {
            network: dataset.network(),
            records: dataset.shared_records(),
            seeders: seeders.into(),
        }
    }

    /// One [`ContractSeeder`] per contract kind, all backed by `db`.
    #[must_use]
    pub fn with_registry(dataset: &Dataset, db: Arc<dyn DatabaseClient>) -> Self {
        let seeders = ContractKind::ALL
            .into_iter()
            .map(|kind| Arc::new(ContractSeeder::new(Arc::clone(&db), kind)) as Arc<dyn Seeder>)
            .collect();
        Self::new(dataset, seeders)
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Seeds every record concurrently. The first failure cancels the
    /// remaining records and is returned.
    #[instrument(skip(self), fields(network = %self.network, records = self.records.len()))]
    pub async fn seed(&self) -> Result<SeedReport, AppError> {
        debug!("Seeding data");

        let mut tasks = JoinSet::new();
        for (index, record) in self.records.iter().cloned().enumerate() {
            let seeders = Arc::clone(&self.seeders);
            let network = self.network;
            tasks.spawn(async move { seed_record(network, index, &record, &seeders).await });
        }

        let mut report = SeedReport::default();
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| AppError::Internal(format!("seeding task failed: {e}")))
                .and_then(|result| result);
            match outcome {
                Ok(record_report) => report.merge(record_report),
                Err(e) => {
                    error!(error = %e, "Data seeding failed");
                    return Err(e);
                }
            }
        }

        info!(
            seeded = report.seeded,
            already_present = report.already_present,
            unhandled = report.unhandled,
            "Data seeded"
        );
        Ok(report)
    }
}

async fn seed_record(
    network: Network,
    index: usize,
    record: &NetworkRecord,
    seeders: &[Arc<dyn Seeder>],
) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();
    for (kind, address) in record.contracts() {
        match seeders.iter().find(|s| s.can_process(kind)) {
            Some(seeder) => report.record(seeder.seed(network, kind, address).await?),
            None => {
                warn!(%network, %kind, index, "No seeder for contract kind");
                report.unhandled += 1;
            }
        }
    }
    Ok(report)
}
