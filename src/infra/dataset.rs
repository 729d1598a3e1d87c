//! Network datasets bundled into the binary and loading them from disk.

use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::{Dataset, DatasetError, Network};

const MAINNET_JSON: &str = include_str!("../../data/mainnet.data.json");
const TESTNET_JSON: &str = include_str!("../../data/testnet.data.json");
const TESTNET2_JSON: &str = include_str!("../../data/testnet2.data.json");

static BUNDLED: OnceCell<Datasets> = OnceCell::new();

/// Raw JSON of the dataset bundled for `network`.
#[must_use]
pub fn bundled_json(network: Network) -> &'static str {
    match network {
        Network::Mainnet => MAINNET_JSON,
        Network::Testnet => TESTNET_JSON,
        Network::Testnet2 => TESTNET2_JSON,
    }
}

/// The three bundled datasets, parsed on first access and kept for the
/// process lifetime.
///
/// # Errors
/// Returns the parse or validation failure of the first bad bundle. The
/// failure is not cached.
pub fn bundled() -> Result<&'static Datasets, DatasetError> {
    BUNDLED.get_or_try_init(|| {
        let datasets = Datasets::parse_bundled()?;
        debug!(
            mainnet = datasets.mainnet.len(),
            testnet = datasets.testnet.len(),
            testnet2 = datasets.testnet2.len(),
            "Parsed bundled datasets"
        );
        Ok(datasets)
    })
}

/// One dataset per network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datasets {
    mainnet: Dataset,
    testnet: Dataset,
    testnet2: Dataset,
}

impl Datasets {
    /// Parses the copies bundled into the binary.
    pub fn parse_bundled() -> Result<Self, DatasetError> {
        let parse = |network| Dataset::from_json(network, bundled_json(network));
        Ok(Self {
            mainnet: parse(Network::Mainnet)?,
            testnet: parse(Network::Testnet)?,
            testnet2: parse(Network::Testnet2)?,
        })
    }

    #[must_use]
    pub fn get(&self, network: Network) -> &Dataset {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
            Network::Testnet2 => &self.testnet2,
        }
    }
}

/// Reads a dataset file with the simple list-of-records format.
pub fn read_dataset_file(
    network: Network,
    path: impl AsRef<Path>,
) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let dataset = Dataset::from_json(network, &content)?;
    info!(
        network = %network,
        path = %path.display(),
        records = dataset.len(),
        "Loaded dataset file"
    );
    Ok(dataset)
}

/// Reads `{dir}/{network}.data.json`.
pub fn load_from_dir(network: Network, dir: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    read_dataset_file(network, dir.as_ref().join(network.data_file_name()))
}
