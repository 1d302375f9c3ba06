//! Criterion benchmarks for the relocation engine.
//!
//! Uses a deterministic jittered grid of demand points to measure the
//! assignment-update loop at several problem sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_locate::geometry;
use u_locate::lloyd::{DemandPoint, LloydConfig, LloydRunner};

/// Jittered `side x side` grid. Purely arithmetic so every run benches
/// the same input.
fn demand_grid(side: usize) -> Vec<DemandPoint> {
    let mut points = Vec::with_capacity(side * side);
    for row in 0..side {
        for col in 0..side {
            let id = (row * side + col) as i64;
            let jitter_x = ((row * 7 + col * 13) % 10) as f64 * 0.13;
            let jitter_y = ((row * 11 + col * 3) % 10) as f64 * 0.17;
            points.push(DemandPoint::new(
                id,
                col as f64 * 3.0 + jitter_x,
                row as f64 * 3.0 + jitter_y,
            ));
        }
    }
    points
}

fn bench_lloyd_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("lloyd_run");

    for &(side, num_facilities) in &[(10usize, 3usize), (20, 5), (32, 10)] {
        let points = demand_grid(side);
        let config = LloydConfig::default()
            .with_num_facilities(num_facilities)
            .with_max_iterations(50)
            .with_convergence_threshold(0.01);

        let label = format!("{}pts_{}fac", points.len(), num_facilities);
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| LloydRunner::run(black_box(&points), black_box(&config)).unwrap())
        });
    }

    group.finish();
}

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for &side in &[10usize, 20] {
        let coords: Vec<(f64, f64)> = demand_grid(side).iter().map(|p| (p.x, p.y)).collect();

        group.bench_function(BenchmarkId::from_parameter(coords.len()), |b| {
            b.iter(|| geometry::distance_matrix(black_box(&coords), black_box(&coords)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lloyd_run, bench_distance_matrix);
criterion_main!(benches);
