//! Network Dataset
//!
//! Per-network contract datasets and a shared Postgres client for seeding a
//! contract registry.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Application Layer              │
//! │     Dataset selection, registry seeding      │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │         Records, traits, error types         │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  Bundled datasets, Postgres, shared client,  │
//! │                   logging                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Network selection
//!
//! The `NETWORK` environment variable picks the active dataset: `testnet`,
//! `testnet2`, or mainnet for any other value. It is read once per process.
//!
//! # Example
//!
//! ```ignore
//! use network_dataset::{app, infra};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dataset = app::data()?;
//!     let db = infra::shared_client().await?;
//!
//!     let report = app::DataSeeder::with_registry(dataset, db).seed().await?;
//!     println!("seeded {} contracts", report.seeded);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
