// Transaction building benchmarks.
//
// Covers the wire encoding, fee calculation and signing at several input
// counts, plus the full wallet path from creation to a composed request.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use factom_protocol::identity::{EcAddress, FactoidAddress};
use factom_protocol::network::FixedRate;
use factom_protocol::transaction::{calculate_fee, sign_transaction, Rcd, Transaction};
use factom_protocol::wallet::{MemoryKeyStore, Wallet};

fn transaction_with_inputs(keys: &[FactoidAddress]) -> Transaction {
    let mut tx = Transaction::with_timestamp(1_700_000_000_000);
    for key in keys {
        tx.set_input(Rcd::new(key.public_key()), 1_000_000).unwrap();
    }
    tx.set_output(FactoidAddress::generate().rcd_hash(), 500_000)
        .unwrap();
    tx.set_ec_output(EcAddress::generate().public_key(), 400_000)
        .unwrap();
    tx
}

fn bench_marshal(c: &mut Criterion) {
    let keys: Vec<_> = (0..10).map(|_| FactoidAddress::generate()).collect();
    let tx = transaction_with_inputs(&keys);

    c.bench_function("transaction/marshal_binary_sig", |b| {
        b.iter(|| tx.marshal_binary_sig());
    });
    c.bench_function("transaction/calculate_fee", |b| {
        b.iter(|| calculate_fee(&tx, 1_000).unwrap());
    });
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/sign");

    for inputs in [1usize, 5, 25, 100] {
        let keys: Vec<_> = (0..inputs).map(|_| FactoidAddress::generate()).collect();
        let tx = transaction_with_inputs(&keys);

        group.throughput(Throughput::Elements(inputs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(inputs), &tx, |b, tx| {
            b.iter(|| {
                let mut tx = tx.clone();
                sign_transaction(&mut tx, &keys).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_wallet_flow(c: &mut Criterion) {
    let wallet = Wallet::new(Arc::new(MemoryKeyStore::new()), Arc::new(FixedRate::new(1_000)));
    let from = wallet.generate_factoid_address().unwrap();
    let to = FactoidAddress::generate().public_string();

    c.bench_function("wallet/build_sign_compose", |b| {
        b.iter(|| {
            wallet.new_transaction("bench").unwrap();
            wallet.add_input("bench", &from, 1_000_000).unwrap();
            wallet.add_output("bench", &to, 1_000_000).unwrap();
            wallet.add_fee("bench", &from, 1_000).unwrap();
            wallet.sign_transaction("bench").unwrap();
            let request = wallet.compose_transaction("bench").unwrap();
            wallet.delete_transaction("bench").unwrap();
            request
        });
    });
}

criterion_group!(benches, bench_marshal, bench_sign, bench_wallet_flow);
criterion_main!(benches);
