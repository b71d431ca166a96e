//! Criterion benchmarks for the convergence engine and full sweeps
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio_util::sync::CancellationToken;

use bifurcate::{compute_point, Logistic, PointCollector, SweepConfig, SweepScheduler};

fn engine_config() -> SweepConfig {
    SweepConfig {
        max_iterations: 10_000,
        ..SweepConfig::default()
    }
}

fn bench_compute_point(c: &mut Criterion) {
    let config = engine_config();
    let mut group = c.benchmark_group("compute_point");

    // Fixed point, period two, and chaos (budget exhausted)
    for parameter in [2.5, 3.2, 3.9] {
        group.bench_with_input(
            BenchmarkId::from_parameter(parameter),
            &parameter,
            |b, &parameter| b.iter(|| compute_point(&Logistic, black_box(parameter), &config)),
        );
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("sweep");
    group.sample_size(10);

    for max_concurrency in [1, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("max_concurrency", max_concurrency),
            &max_concurrency,
            |b, &max_concurrency| {
                b.to_async(&runtime).iter(|| async move {
                    let config = SweepConfig {
                        range_start: 2.8,
                        step_size: 0.005,
                        max_concurrency,
                        ..engine_config()
                    };
                    let scheduler = SweepScheduler::new(config, Logistic).expect("valid config");
                    let rx = scheduler.take_point_receiver().expect("receiver");
                    let collector = tokio::spawn(async move {
                        PointCollector::new(rx)
                            .collect(&CancellationToken::new(), |_| {})
                            .await
                    });

                    let report = scheduler
                        .run(CancellationToken::new())
                        .await
                        .expect("sweep");
                    drop(scheduler);
                    let collected = collector.await.expect("collector");
                    black_box((report, collected.len()))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_point, bench_sweep);
criterion_main!(benches);
