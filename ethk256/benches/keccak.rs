//! Keccak-256 benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ethk256::keccak::Keccak256;
use std::hint::black_box;

fn bench_keccak(c: &mut Criterion) {
    let mut group = c.benchmark_group("Keccak-256");

    for size in [32usize, 136, 1024, 16 * 1024] {
        let data = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut hasher = Keccak256::new();
                hasher.update(black_box(data));
                hasher.finalize()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_keccak);
criterion_main!(benches);
