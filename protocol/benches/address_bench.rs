// Address codec and key derivation benchmarks.
//
// Covers base-58 encoding and decoding of the four address kinds, the
// validity predicate on good and bad input, and mnemonic derivation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use factom_protocol::identity::{is_valid_address, Address, AddressKind, FactoidAddress};

const YELLOW: &str =
    "yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow";

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("address/encode");
    for kind in [
        AddressKind::FactoidPublic,
        AddressKind::FactoidSecret,
        AddressKind::EcPublic,
        AddressKind::EcSecret,
    ] {
        if let Some(address) = Address::new(kind, [0x42; 32]) {
            group.bench_with_input(
                BenchmarkId::from_parameter(kind.display_prefix()),
                &address,
                |b, address| b.iter(|| address.encode()),
            );
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoded = FactoidAddress::generate().public_string();
    c.bench_function("address/decode", |b| {
        b.iter(|| Address::decode(black_box(&encoded)));
    });
}

fn bench_validity(c: &mut Criterion) {
    let good = FactoidAddress::generate().public_string();
    let mut bad = good.clone();
    bad.replace_range(10..11, if &good[10..11] == "z" { "y" } else { "z" });

    c.bench_function("address/is_valid/good", |b| {
        b.iter(|| is_valid_address(black_box(&good)));
    });
    c.bench_function("address/is_valid/bad_checksum", |b| {
        b.iter(|| is_valid_address(black_box(&bad)));
    });
}

fn bench_mnemonic(c: &mut Criterion) {
    c.bench_function("address/from_mnemonic", |b| {
        b.iter(|| FactoidAddress::from_mnemonic(black_box(YELLOW)));
    });
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("address/generate_factoid", |b| {
        b.iter(FactoidAddress::generate);
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_validity,
    bench_mnemonic,
    bench_generate,
);
criterion_main!(benches);
