//! Network dataset selection.
//!
//! `NETWORK` is read once, on the first call to [`data`] or [`init`], and
//! the chosen dataset is kept for the rest of the process. Later changes to
//! the variable are not observed.

use once_cell::sync::OnceCell;
use tracing::info;

use crate::domain::{Dataset, DatasetError, Network};
use crate::infra::dataset::{Datasets, bundled};

static SELECTED: OnceCell<&'static Dataset> = OnceCell::new();

/// Picks the dataset of `network`. No copy is made.
#[must_use]
pub fn select(datasets: &Datasets, network: Network) -> &Dataset {
    datasets.get(network)
}

/// Picks a dataset from a raw selector value (see [`Network::from_selector`]).
#[must_use]
pub fn select_by_value<'a>(datasets: &'a Datasets, value: Option<&str>) -> &'a Dataset {
    select(datasets, Network::from_selector(value))
}

/// The dataset of the network this process runs against.
///
/// # Errors
/// Returns the load-time fault if a bundled dataset fails to parse.
pub fn data() -> Result<&'static Dataset, DatasetError> {
    SELECTED
        .get_or_try_init(|| {
            let network = Network::from_env();
            let dataset = select(bundled()?, network);
            info!(
                network = %network,
                records = dataset.len(),
                contracts = dataset.contract_count(),
                "Selected network dataset"
            );
            Ok::<_, DatasetError>(dataset)
        })
        .copied()
}

/// Loads and selects eagerly, returning the active network.
pub fn init() -> Result<Network, DatasetError> {
    data().map(Dataset::network)
}
