//! Criterion benchmarks for the generate step.
//! Focus sizes: n in {12, 24, 48, 96} points.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use rand::{rngs::StdRng, SeedableRng};
use shapejam::api::{build_polygon_edges, draw_points, order_edges, triangulate, GeomCfg};

fn points(n: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    draw_points(n, Vector2::new(1024.0, 1024.0), &mut rng)
}

fn bench_extract(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("extract");
    for &n in &[12usize, 24, 48, 96] {
        group.bench_with_input(BenchmarkId::new("triangulate", n), &n, |b, &n| {
            b.iter_batched(
                || points(n, 41),
                |pts| {
                    let _tri = triangulate(&pts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("build_polygon_edges", n), &n, |b, &n| {
            b.iter_batched(
                || points(n, 42),
                |pts| {
                    let _res = build_polygon_edges(&pts, cfg);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("order_edges", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let pts = points(n, 43);
                    build_polygon_edges(&pts, cfg).map(|(edges, _)| edges)
                },
                |edges| {
                    if let Ok(edges) = edges {
                        let _walk = order_edges(&edges);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
