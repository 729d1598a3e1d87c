//! Infrastructure layer implementations.

pub mod database;
pub mod dataset;
pub mod observability;

pub use database::{
    DatabaseConfig, PostgresClient, PostgresConfig, SharedClient, shared_client,
    shared_client_with,
};
pub use dataset::{Datasets, bundled, load_from_dir, read_dataset_file};
pub use observability::{LogFormat, init_tracing};
