//! secp256k1 ECDSA benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use ethk256::{
    ecdsa::{SigningKey, VerifyingKey},
    keccak256,
};
use hex_literal::hex;
use std::hint::black_box;

const SIGNING_KEY_BYTES: [u8; 32] =
    hex!("ebb2c082fd7727890a28ac82f6bdf97bad8de9f5d7c9028692de1a255cad3e0f");

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&SIGNING_KEY_BYTES).unwrap()
}

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ECDSA/secp256k1 (Keccak-256)");
    let key = signing_key();
    let digest = keccak256(b"ethk256 benchmark message");
    let (signature, recovery_id) = key.sign_prehash(&digest);
    let verifying_key = *key.verifying_key();

    group.bench_function("sign_prehash", |b| {
        b.iter(|| key.sign_prehash(&black_box(digest)))
    });

    group.bench_function("verify_prehash", |b| {
        b.iter(|| verifying_key.verify_prehash(&black_box(digest), &black_box(signature)))
    });

    group.bench_function("recover_from_prehash", |b| {
        b.iter(|| {
            VerifyingKey::recover_from_prehash(
                &black_box(digest),
                &black_box(signature),
                recovery_id,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_ecdsa);
criterion_main!(benches);
