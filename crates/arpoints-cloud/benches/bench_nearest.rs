use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use arpoints_cloud::nearest::{find_nearest_point, NearestPointIndex};

fn create_random_points(num_points: usize) -> Vec<[f32; 3]> {
    (0..num_points)
        .map(|_| {
            [
                rand::random::<f32>() * 10.0 - 5.0,
                rand::random::<f32>() * 10.0 - 5.0,
                rand::random::<f32>() * 10.0 - 5.0,
            ]
        })
        .collect()
}

fn bench_nearest_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_point");

    for num_points in [100, 1_000, 10_000].iter() {
        let points = create_random_points(*num_points);
        let query = [0.0, 0.0, 0.0];

        group.bench_with_input(
            BenchmarkId::new("linear_scan", num_points),
            &points,
            |b, points| b.iter(|| find_nearest_point(black_box(points), black_box(&query))),
        );

        // single query per cloud, index build included as a real caller would pay it
        group.bench_with_input(
            BenchmarkId::new("kdtree_build_and_query", num_points),
            &points,
            |b, points| {
                b.iter(|| {
                    let index = NearestPointIndex::build(black_box(points));
                    index.nearest(black_box(&query))
                })
            },
        );

        let index = NearestPointIndex::build(&points);
        group.bench_with_input(
            BenchmarkId::new("kdtree_query", num_points),
            &index,
            |b, index| b.iter(|| index.nearest(black_box(&query))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_nearest_point);
criterion_main!(benches);
