use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::info;

use network_dataset::app::{self, DataSeeder};
use network_dataset::config::AppConfig;
use network_dataset::domain::{DatabaseClient, Dataset};
use network_dataset::infra::{self, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format)?;

    // Bundled datasets are parsed and selected before anything else
    let network = app::init().context("failed to load bundled datasets")?;
    info!(%network, "Starting network dataset seeder");

    let loaded;
    let dataset: &Dataset = match &config.data_dir {
        Some(dir) => {
            loaded = infra::load_from_dir(network, dir)
                .with_context(|| format!("failed to load dataset from {}", dir.display()))?;
            &loaded
        }
        None => app::data()?,
    };

    let db = infra::shared_client_with(&config.database)
        .await
        .context("failed to connect to database")?;
    app::prepare_registry(db.as_ref())
        .await
        .context("failed to prepare contract registry")?;

    let registry: Arc<dyn DatabaseClient> = db;
    let report = DataSeeder::with_registry(dataset, Arc::clone(&registry))
        .seed()
        .await
        .context("data seeding failed")?;

    let stored = registry.list_contracts(network).await?;
    info!(
        %network,
        seeded = report.seeded,
        already_present = report.already_present,
        unhandled = report.unhandled,
        registry_size = stored.len(),
        "Seeding complete"
    );

    Ok(())
}
