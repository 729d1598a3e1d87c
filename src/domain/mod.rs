//! Domain layer containing core types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError, DatasetError};
pub use traits::{DatabaseClient, Seeder};
pub use types::{
    ContractAddress, ContractKind, Dataset, Network, NetworkRecord, SeedOutcome, SeedReport,
    SeededContract,
};
