use criterion::{Criterion, black_box, criterion_group, criterion_main};
use network_dataset::app::select_by_value;
use network_dataset::domain::{Dataset, Network};
use network_dataset::infra::{Datasets, bundled, dataset::bundled_json};

fn bench_parsing(c: &mut Criterion) {
    let json = bundled_json(Network::Mainnet);

    c.bench_function("parse_mainnet_dataset", |b| {
        b.iter(|| Dataset::from_json(Network::Mainnet, black_box(json)))
    });

    c.bench_function("parse_all_bundled_datasets", |b| {
        b.iter(Datasets::parse_bundled)
    });
}

fn bench_selection(c: &mut Criterion) {
    let datasets = bundled().expect("bundled datasets parse");

    c.bench_function("select_by_value", |b| {
        b.iter(|| select_by_value(datasets, black_box(Some("testnet2"))).len())
    });

    c.bench_function("count_contracts", |b| {
        b.iter(|| black_box(datasets.get(Network::Mainnet)).contract_count())
    });
}

criterion_group!(benches, bench_parsing, bench_selection);
criterion_main!(benches);
