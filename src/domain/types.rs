use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::{ConfigError, DatasetError};

/// Represents a Starknet contract address as stored in datasets.
pub type ContractAddress = String;

/// Blockchain network a dataset belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Testnet2,
}

impl Network {
    /// Environment variable holding the selector value.
    pub const ENV_VAR: &'static str = "NETWORK";

    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Testnet2];

    /// Maps a raw selector value to a network.
    ///
    /// Matching is exact and case-sensitive. Anything other than `testnet`
    /// or `testnet2`, including an unset or empty value, selects mainnet.
    #[must_use]
    pub fn from_selector(value: Option<&str>) -> Self {
        match value {
            Some("testnet") => Network::Testnet,
            Some("testnet2") => Network::Testnet2,
            _ => Network::Mainnet,
        }
    }

    /// Reads the selector from the `NETWORK` environment variable.
    ///
    /// A value that is not valid unicode is treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        let value = std::env::var(Self::ENV_VAR).ok();
        Self::from_selector(value.as_deref())
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Testnet2 => "testnet2",
        }
    }

    /// File name of this network's dataset, e.g. `testnet.data.json`.
    #[must_use]
    pub fn data_file_name(&self) -> String {
        format!("{}.data.json", self.as_str())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "testnet2" => Ok(Network::Testnet2),
            other => Err(ConfigError::InvalidValue {
                key: "network".to_string(),
                message: format!("unknown network '{other}'"),
            }),
        }
    }
}

/// Kind of contract referenced by a [`NetworkRecord`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Badge,
    Project,
    Minter,
    Vester,
    Offseter,
    Yielder,
}

impl ContractKind {
    pub const ALL: [ContractKind; 6] = [
        ContractKind::Badge,
        ContractKind::Project,
        ContractKind::Minter,
        ContractKind::Vester,
        ContractKind::Offseter,
        ContractKind::Yielder,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Badge => "badge",
            ContractKind::Project => "project",
            ContractKind::Minter => "minter",
            ContractKind::Vester => "vester",
            ContractKind::Offseter => "offseter",
            ContractKind::Yielder => "yielder",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "kind".to_string(),
                message: format!("unknown contract kind '{s}'"),
            })
    }
}

/// One project entry of a dataset.
///
/// Every field is optional; networks do not all deploy the same set of
/// contracts, so an absent field is a normal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NetworkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_felt_address"))]
    pub badge: Option<ContractAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_felt_address"))]
    pub project: Option<ContractAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_felt_address"))]
    pub minter: Option<ContractAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_felt_address"))]
    pub vester: Option<ContractAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_felt_address"))]
    pub offseter: Option<ContractAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_felt_address"))]
    pub yielder: Option<ContractAddress>,
}

impl NetworkRecord {
    /// Returns the address stored for `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: ContractKind) -> Option<&str> {
        let field = match kind {
            ContractKind::Badge => &self.badge,
            ContractKind::Project => &self.project,
            ContractKind::Minter => &self.minter,
            ContractKind::Vester => &self.vester,
            ContractKind::Offseter => &self.offseter,
            ContractKind::Yielder => &self.yielder,
        };
        field.as_deref()
    }

    /// Present contracts in field declaration order.
    pub fn contracts(&self) -> impl Iterator<Item = (ContractKind, &str)> + '_ {
        ContractKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|address| (kind, address)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts().next().is_none()
    }
}

/// Accepts 1 to 64 hex digits (a Starknet felt), with an optional `0x` prefix.
fn validate_felt_address(value: &str) -> Result<(), validator::ValidationError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let valid =
        (1..=64).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("felt_address")
            .with_message(Cow::Owned(format!("'{value}' is not a hex contract address"))))
    }
}

/// Ordered records of one network, in source-file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    network: Network,
    records: Arc<[NetworkRecord]>,
}

impl Dataset {
    /// Builds a dataset, validating every present address.
    pub fn new(network: Network, records: Vec<NetworkRecord>) -> Result<Self, DatasetError> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| DatasetError::InvalidRecord {
                    network,
                    index,
                    message: e.to_string(),
                })?;
        }
        Ok(Self {
            network,
            records: records.into(),
        })
    }

    /// Parses a JSON array of records.
    pub fn from_json(network: Network, json: &str) -> Result<Self, DatasetError> {
        let records: Vec<NetworkRecord> =
            serde_json::from_str(json).map_err(|e| DatasetError::Parse {
                network,
                message: e.to_string(),
            })?;
        Self::new(network, records)
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    #[must_use]
    pub fn records(&self) -> &[NetworkRecord] {
        &self.records
    }

    /// The records behind a shared pointer, without copying them.
    #[must_use]
    pub fn shared_records(&self) -> Arc<[NetworkRecord]> {
        Arc::clone(&self.records)
    }

    /// Total number of contract addresses across all records.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.records.iter().map(|r| r.contracts().count()).sum()
    }
}

impl Deref for Dataset {
    type Target = [NetworkRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// A contract address persisted in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeededContract {
    pub network: Network,
    pub kind: ContractKind,
    pub address: ContractAddress,
    pub seeded_at: DateTime<Utc>,
}

impl SeededContract {
    pub fn new(network: Network, kind: ContractKind, address: impl Into<ContractAddress>) -> Self {
        Self {
            network,
            kind,
            address: address.into(),
            seeded_at: Utc::now(),
        }
    }
}

/// Result of seeding a single contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded,
    AlreadyPresent,
}

/// Totals reported after seeding a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seeded: usize,
    pub already_present: usize,
    /// Contracts whose kind no seeder accepts.
    pub unhandled: usize,
}

impl SeedReport {
    pub fn record(&mut self, outcome: SeedOutcome) {
        match outcome {
            SeedOutcome::Seeded => self.seeded += 1,
            SeedOutcome::AlreadyPresent => self.already_present += 1,
        }
    }

    pub fn merge(&mut self, other: SeedReport) {
        self.seeded += other.seeded;
        self.already_present += other.already_present;
        self.unhandled += other.unhandled;
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.seeded + self.already_present + self.unhandled
    }
}
