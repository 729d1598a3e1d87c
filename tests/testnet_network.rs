//! Dataset selection with `NETWORK=testnet`.
//!
//! Runs as its own test binary so the process-wide selection is made here.

use network_dataset::app;
use network_dataset::domain::{Network, NetworkRecord};
use network_dataset::infra::{bundled, dataset::bundled_json};

#[test]
fn test_testnet_selects_testnet_dataset() {
    // SAFETY: single test in this binary, run before anything reads the environment.
    unsafe { std::env::set_var("NETWORK", "testnet") };

    assert_eq!(app::init().unwrap(), Network::Testnet);

    let data = app::data().unwrap();
    assert_eq!(data.network(), Network::Testnet);
    assert!(std::ptr::eq(data, bundled().unwrap().get(Network::Testnet)));
    assert!(!std::ptr::eq(data, bundled().unwrap().get(Network::Testnet2)));

    let from_file: Vec<NetworkRecord> =
        serde_json::from_str(bundled_json(Network::Testnet)).unwrap();
    assert_eq!(data.len(), from_file.len());
    for (record, expected) in data.iter().zip(&from_file) {
        assert_eq!(record, expected);
    }

    // Later changes to NETWORK have no effect on the selection
    // SAFETY: same as above, no other thread reads the environment here.
    unsafe { std::env::set_var("NETWORK", "mainnet") };
    assert!(std::ptr::eq(app::data().unwrap(), data));
    assert_eq!(app::init().unwrap(), Network::Testnet);
}
