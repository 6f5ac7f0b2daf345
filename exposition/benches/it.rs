use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exposition::{
    forecast::{self, ForecastPoint},
    Gauge, Metric, Metrics,
};
use time::{Duration, OffsetDateTime};

fn bench_render(c: &mut Criterion) {
    let metrics = (0..1000)
        .map(|i| {
            Metric::from(
                Gauge::new(format!("grid_metric_{}", i % 50), i, "Benchmark gauge")
                    .with_label("zip", format!("{:05}", i)),
            )
        })
        .collect::<Metrics>();

    c.bench_function("render", |b| {
        b.iter(|| {
            let out = black_box(metrics.clone()).sorted().to_string();
            black_box(out);
        })
    });
}

fn bench_closest(c: &mut Criterion) {
    let now = OffsetDateTime::now_utc();
    // one day of quarter-hour points
    let points = (-48..48)
        .map(|i| ForecastPoint::new(now + Duration::minutes(15 * i), i as f64))
        .collect::<Vec<_>>();

    c.bench_function("closest", |b| {
        b.iter(|| forecast::closest_value(black_box(&points), black_box(now)))
    });
}

criterion_group!(benches, bench_render, bench_closest);
criterion_main!(benches);
