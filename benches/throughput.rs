//! benches/throughput.rs
//!
//! Per-tier throughput of Argon2 and BLAKE2b.
//!
//! Run with: `cargo bench --bench throughput`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use argon2_simd::{Factory, Params, Tier, Variant};
use test_support::AlignedBytes;

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

fn runnable_tiers() -> Vec<Tier> {
    argon2_simd::detect().up_to().collect()
}

/// Argon2id at 4 MiB, one and four lanes, on every runnable tier.
fn bench_argon2(c: &mut Criterion) {
    let factory = Factory::without_self_test().unwrap();
    let password = generate_random_data(16);
    let salt = generate_random_data(16);

    for lanes in [1u32, 4] {
        let mut group = c.benchmark_group(format!("argon2id_m4096_p{lanes}"));
        group.sample_size(20);
        group.throughput(Throughput::Bytes(4096 * 1024));

        for tier in runnable_tiers() {
            let params = Params::new(Variant::Argon2id, 1, 4096, lanes).unwrap();
            let hasher = factory.create_argon2_for(tier, params).unwrap();
            let mut memory = AlignedBytes::zeroed(hasher.memory_size());
            let mut tag = [0u8; 32];

            group.bench_function(BenchmarkId::from_parameter(tier), |b| {
                b.iter(|| {
                    hasher
                        .hash_with_memory(memory.as_mut_bytes(), black_box(&password), black_box(&salt), &[], &mut tag)
                        .unwrap();
                    black_box(tag)
                });
            });
        }

        group.finish();
    }
}

/// Unkeyed BLAKE2b-512 over a range of message sizes on every runnable tier.
fn bench_blake2b(c: &mut Criterion) {
    let factory = Factory::without_self_test().unwrap();
    let mut group = c.benchmark_group("blake2b_512");

    for size in [64, 1024, 16384, 131072] {
        let data = generate_random_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for tier in runnable_tiers() {
            group.bench_with_input(BenchmarkId::new(tier.as_str(), size), &data, |b, data| {
                b.iter(|| {
                    let mut state = factory.create_blake2b_for(tier, 64, &[]).unwrap();
                    state.update(black_box(data)).unwrap();
                    let mut out = [0u8; 64];
                    state.finalize_into(&mut out).unwrap();
                    black_box(out)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_argon2, bench_blake2b);
criterion_main!(benches);
