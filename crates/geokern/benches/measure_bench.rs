//! Criterion benchmarks for measurement, hulls and relations.
//! Focus sizes: n in {10, 100, 1000} points/vertices.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geokern::mode::RelationMode;
use geokern::sample::{
    draw_collection, draw_point_cloud, draw_star_polygon, RadialCfg, ReplayToken, VertexCount,
};
use geokern::{derive, measure, relate, GeomCfg};

fn star(n: usize, index: u64) -> geokern::Geometry {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        ..RadialCfg::default()
    };
    draw_star_polygon(cfg, ReplayToken { seed: 43, index }).unwrap()
}

fn bench_measure(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("measure");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("centroid_collection", n), &n, |b, &n| {
            let tok = ReplayToken {
                seed: 1,
                index: n as u64,
            };
            let g = draw_collection(n / 10 + 1, tok).unwrap();
            b.iter(|| measure::centroid(&g, &cfg).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("area_star", n), &n, |b, &n| {
            let g = star(n, 2);
            b.iter(|| measure::area(&g, &cfg).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("convex_hull_cloud", n), &n, |b, &n| {
            b.iter_batched(
                || draw_point_cloud(n, 10.0, ReplayToken { seed: 44, index: n as u64 }).unwrap(),
                |g| {
                    let _h = derive::convex_hull(&g, &cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_relation(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("relation");
    for &n in &[10usize, 100] {
        let a = star(n, 3);
        let b = star(n, 4);
        group.bench_with_input(BenchmarkId::new("intersect_stars", n), &n, |bch, _| {
            bch.iter(|| relate::relation(&a, &b, RelationMode::Intersect, &cfg))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_measure, bench_relation);
criterion_main!(benches);
