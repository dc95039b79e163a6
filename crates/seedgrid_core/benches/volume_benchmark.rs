//! # Volume Benchmark
//!
//! Growth, fill and prune costs for `VolumeStore`.
//!
//! Run with: `cargo bench --package seedgrid_core --bench volume_benchmark`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seedgrid_core::VolumeStore;

/// Writes a cube outward from the origin, forcing growth on every axis.
fn bench_set_with_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_with_growth");

    for radius in [4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| {
                let mut volume = VolumeStore::new(0);
                for r in 0..=radius {
                    volume.set(r, r, r, 1);
                    volume.set(-r, -r, -r, 1);
                }
                black_box(volume.volume())
            });
        });
    }

    group.finish();
}

fn bench_fill_preallocated(c: &mut Criterion) {
    let mut volume = VolumeStore::with_bounds(0, [0, 0, 0], [63, 63, 63]).expect("non-inverted box");
    c.bench_function("fill_64_cube", |b| {
        b.iter(|| {
            volume.fill([0, 0, 0], [63, 63, 63], black_box(3));
        });
    });
}

fn bench_get_scan(c: &mut Criterion) {
    let mut volume = VolumeStore::new(-1);
    volume.fill([0, 0, 0], [31, 31, 31], 2);
    c.bench_function("get_scan_32_cube", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for z in -1..33 {
                for y in -1..33 {
                    for x in -1..33 {
                        sum += i64::from(volume.get(x, y, z));
                    }
                }
            }
            black_box(sum)
        });
    });
}

fn bench_prune_sparse(c: &mut Criterion) {
    c.bench_function("prune_sparse_64_cube", |b| {
        b.iter(|| {
            let mut volume = VolumeStore::new(0);
            volume.ensure_allocated([0, 0, 0], [63, 63, 63]).expect("non-inverted box");
            volume.set(20, 30, 40, 1);
            volume.set(40, 30, 20, 1);
            volume.prune();
            black_box(volume.size())
        });
    });
}

criterion_group!(
    benches,
    bench_set_with_growth,
    bench_fill_preallocated,
    bench_get_scan,
    bench_prune_sparse,
);
criterion_main!(benches);
