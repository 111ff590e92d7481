//! secp256k1 scalar and point multiplication benchmarks

use criterion::{
    criterion_group, criterion_main, measurement::Measurement, BenchmarkGroup, Criterion,
};
use ethk256::{ProjectivePoint, Scalar};
use hex_literal::hex;
use std::hint::black_box;

fn test_scalar_x() -> Scalar {
    Scalar::from_bytes(&hex!(
        "519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464"
    ))
    .unwrap()
}

fn test_scalar_y() -> Scalar {
    Scalar::from_bytes(&hex!(
        "0f56db78ca460b055c500064824bed999a25aaf48ebb519ac201537b85479813"
    ))
    .unwrap()
}

fn bench_point_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = ProjectivePoint::GENERATOR.double();
    let s = test_scalar_x();
    group.bench_function("point-scalar mul", |b| {
        b.iter(|| &black_box(p) * &black_box(s))
    });
}

fn bench_mul_by_generator<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let s = test_scalar_x();
    group.bench_function("mul_by_generator", |b| {
        b.iter(|| ProjectivePoint::mul_by_generator(&black_box(s)))
    });
}

fn bench_lincomb<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = ProjectivePoint::GENERATOR.double();
    let a = test_scalar_x();
    let b = test_scalar_y();
    group.bench_function("lincomb_with_generator", |bench| {
        bench.iter(|| black_box(p).lincomb_with_generator(&black_box(a), &black_box(b)))
    });
}

fn bench_to_affine<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = ProjectivePoint::mul_by_generator(&test_scalar_x());
    group.bench_function("to_affine", |b| b.iter(|| black_box(p).to_affine()));
}

fn bench_high_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("high-level operations");
    bench_point_mul(&mut group);
    bench_mul_by_generator(&mut group);
    bench_lincomb(&mut group);
    bench_to_affine(&mut group);
    group.finish();
}

fn bench_scalar_sub<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("sub", |b| b.iter(|| &black_box(x) - &black_box(y)));
}

fn bench_scalar_add<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("add", |b| b.iter(|| &black_box(x) + &black_box(y)));
}

fn bench_scalar_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("mul", |b| b.iter(|| &black_box(x) * &black_box(y)));
}

fn bench_scalar_negate<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_scalar_x();
    group.bench_function("negate", |b| b.iter(|| -black_box(x)));
}

fn bench_scalar_invert<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_scalar_x();
    group.bench_function("invert", |b| b.iter(|| black_box(x).invert()));
}

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar operations");
    bench_scalar_sub(&mut group);
    bench_scalar_add(&mut group);
    bench_scalar_mul(&mut group);
    bench_scalar_negate(&mut group);
    bench_scalar_invert(&mut group);
    group.finish();
}

criterion_group!(benches, bench_high_level, bench_scalar);
criterion_main!(benches);
