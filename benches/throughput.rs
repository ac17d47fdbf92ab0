//! Throughput benchmarks for the cache hot paths.
//!
//! Run with:
//!     cargo bench --bench throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cortado::Cache;

/// Number of entries each cache is pre-filled with and its count limit.
const CAP: u64 = 10_000;

/// Operations executed per criterion iteration (hot-loop size).
const OPS: u64 = 1_000;

// ---------------------------------------------------------------------------
// Group 1: get_hit
// ---------------------------------------------------------------------------
// All keys are present → measures pure read throughput with no eviction.

fn bench_get_hit(c: &mut Criterion) {
    let cache: Cache<u64, u64> = Cache::builder().count_limit(CAP).build();
    for i in 0..CAP {
        cache.insert(i, i * 2);
    }

    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function("cortado", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(cache.get(black_box(&i)));
            }
        })
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Group 2: insert_unbounded
// ---------------------------------------------------------------------------
// No limits configured → measures raw write throughput.

fn bench_insert_unbounded(c: &mut Criterion) {
    let cache: Cache<u64, u64> = Cache::new();
    let mut next = 0u64;

    let mut group = c.benchmark_group("insert_unbounded");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function("cortado", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(next), next);
                next += 1;
            }
        })
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Group 3: insert_evicting
// ---------------------------------------------------------------------------
// The cache sits at its count limit → every insert pays for one eviction.

fn bench_insert_evicting(c: &mut Criterion) {
    let cache: Cache<u64, u64> = Cache::builder().count_limit(CAP).build();
    for i in 0..CAP {
        cache.insert(i, i);
    }
    let mut next = CAP;

    let mut group = c.benchmark_group("insert_evicting");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function("cortado", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(next), next);
                next += 1;
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_insert_unbounded,
    bench_insert_evicting
);
criterion_main!(benches);
