//! Criterion micro-benchmarks for connectivity masks.

use criterion::{criterion_group, criterion_main, Criterion};
use seep_bench::{cave_level, TILE};
use seep_core::TileCoord;
use seep_space::{ConnectivityMasks, TileGrid};
use std::hint::black_box;

/// Benchmark: both flood fills on a 100x100 cave.
fn bench_masks_recompute_10k(c: &mut Criterion) {
    let map = cave_level(100, 100, 0.25, 42);
    let grid = TileGrid::new(100, 100, TILE, TILE).unwrap();
    let mut masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(50, 98));

    c.bench_function("masks_recompute_10k", |b| {
        b.iter(|| {
            masks.recompute(&grid, &map);
            black_box(&masks);
        });
    });
}

/// Benchmark: a wall toggled on and off, each followed by a recompute.
///
/// Mirrors a breakable block being destroyed and rebuilt.
fn bench_toggle_and_recompute_10k(c: &mut Criterion) {
    let mut map = cave_level(100, 100, 0.25, 42);
    let grid = TileGrid::new(100, 100, TILE, TILE).unwrap();
    let mut masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(50, 98));

    c.bench_function("toggle_and_recompute_10k", |b| {
        b.iter(|| {
            map.toggle(49, 50);
            masks.recompute(&grid, &map);
            map.toggle(49, 50);
            masks.recompute(&grid, &map);
            black_box(&masks);
        });
    });
}

/// Benchmark: nominal inlet buried in rock, snapped on every recompute.
fn bench_inlet_snap_10k(c: &mut Criterion) {
    let mut map = cave_level(100, 100, 0.25, 42);
    for y in 90..99 {
        for x in 40..61 {
            map.set(x, y);
        }
    }
    let grid = TileGrid::new(100, 100, TILE, TILE).unwrap();
    let mut masks = ConnectivityMasks::compute(&grid, &map, TileCoord::new(50, 95));

    c.bench_function("inlet_snap_10k", |b| {
        b.iter(|| {
            masks.recompute(&grid, &map);
            black_box(masks.inlet());
        });
    });
}

criterion_group!(
    benches,
    bench_masks_recompute_10k,
    bench_toggle_and_recompute_10k,
    bench_inlet_snap_10k
);
criterion_main!(benches);
