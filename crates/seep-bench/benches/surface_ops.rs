//! Criterion micro-benchmarks for surface extraction.

use criterion::{criterion_group, criterion_main, Criterion};
use seep_bench::{reference_profile, warmed};
use seep_surface::{CornerField, MeshParams, SurfaceMesh};
use std::hint::black_box;

/// Benchmark: full mesh rebuild (corner field + marching squares) at 10K tiles.
fn bench_build_mesh_10k(c: &mut Criterion) {
    let water = warmed(reference_profile(42), 600).unwrap();
    let mut mesh = SurfaceMesh::new();

    c.bench_function("build_mesh_10k", |b| {
        b.iter(|| {
            water.build_mesh_into(&mut mesh);
            black_box(mesh.triangle_count());
        });
    });
}

/// Benchmark: marching squares alone over a precomputed corner field.
fn bench_marching_squares_10k(c: &mut Criterion) {
    let water = warmed(reference_profile(42), 600).unwrap();
    let corners = CornerField::build(
        water.grid(),
        water.fill_field(),
        water.masks(),
        water.obstacles(),
    );
    let surface = &water.config().surface;
    let params = MeshParams {
        tile_width: water.grid().tile_width(),
        tile_height: water.grid().tile_height(),
        iso_level: surface.iso_level,
        palette: &surface.palette,
        time: water.water_time(),
    };
    let mut mesh = SurfaceMesh::new();

    c.bench_function("marching_squares_10k", |b| {
        b.iter(|| {
            mesh.rebuild(&corners, &params);
            black_box(mesh.vertices().len());
        });
    });
}

/// Benchmark: waterfall and still-surface classification at 10K tiles.
fn bench_classify_10k(c: &mut Criterion) {
    let water = warmed(reference_profile(42), 600).unwrap();

    c.bench_function("classify_10k", |b| {
        b.iter(|| {
            black_box(water.waterfall_runs());
            black_box(water.surface_runs());
        });
    });
}

criterion_group!(
    benches,
    bench_build_mesh_10k,
    bench_marching_squares_10k,
    bench_classify_10k
);
criterion_main!(benches);
