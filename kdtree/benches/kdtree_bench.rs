//! Benchmarks for the k-d tree index.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spotfind_kdtree::{KdTree, ResultPool};

fn generate_points(count: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| [rng.gen_range(0.0..256.0), rng.gen_range(0.0..256.0)])
        .collect()
}

fn build_tree(points: &[[f64; 2]]) -> KdTree {
    let mut kd = KdTree::new(2);
    for (i, p) in points.iter().enumerate() {
        kd.insert(p, i).unwrap();
    }
    kd
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_build");
    for size in [100, 1000, 10000].iter() {
        let points = generate_points(*size);
        group.bench_with_input(BenchmarkId::new("insert", size), size, |b, _| {
            b.iter(|| black_box(build_tree(&points)));
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_nearest");
    for size in [1000, 10000].iter() {
        let points = generate_points(*size);
        let kd = build_tree(&points);
        let queries = generate_points(100);
        group.bench_with_input(BenchmarkId::new("query", size), size, |b, _| {
            b.iter(|| {
                for q in &queries {
                    let set = kd.nearest(q).unwrap();
                    black_box(set.item());
                }
            });
        });
    }
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_range");
    for size in [1000, 10000].iter() {
        let points = generate_points(*size);
        let kd = build_tree(&points);
        let queries = generate_points(100);

        group.bench_with_input(BenchmarkId::new("unordered", size), size, |b, _| {
            b.iter(|| {
                for q in &queries {
                    let set = kd.range(q, 5.0, false).unwrap();
                    black_box(set.len());
                }
            });
        });

        let pool = ResultPool::new();
        group.bench_with_input(BenchmarkId::new("unordered_pooled", size), size, |b, _| {
            b.iter(|| {
                for q in &queries {
                    let set = kd.range_in(q, 5.0, false, &pool).unwrap();
                    black_box(set.len());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("ordered", size), size, |b, _| {
            b.iter(|| {
                for q in &queries {
                    let set = kd.range(q, 5.0, true).unwrap();
                    black_box(set.len());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_range);
criterion_main!(benches);
