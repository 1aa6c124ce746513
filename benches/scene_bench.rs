use area_chart::core::{Datum, Interpolation, LinearScale, interpolate_path, nice_domain, shared};
use area_chart::render::NullRenderer;
use area_chart::widget::{AreaChartProps, init_chart};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0)
        .and_then(|scale| scale.with_range([0.0, 0.95]))
        .expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let normalized = scale.scale(black_box(4_321.123)).expect("scale");
            let _ = scale.invert(normalized).expect("invert");
        })
    });
}

fn bench_nice_domain(c: &mut Criterion) {
    c.bench_function("nice_domain", |b| {
        b.iter(|| nice_domain(black_box(-13.7), black_box(98_765.4), black_box(5)))
    });
}

fn bench_smooth_path_1k(c: &mut Criterion) {
    let points: Vec<(f64, f64)> = (0..1_000)
        .map(|i| {
            let x = f64::from(i);
            (x, (x * 0.05).sin() * 100.0)
        })
        .collect();

    c.bench_function("smooth_path_1k", |b| {
        b.iter(|| interpolate_path(black_box(&points), Interpolation::Smooth))
    });
}

fn bench_init_chart_365_points(c: &mut Criterion) {
    let data = shared(
        (0..365)
            .map(|day| Datum::new(format!("day-{day:03}"), f64::from(day % 97) * 3.5))
            .collect(),
    );
    let config = AreaChartProps::new()
        .with_data(data)
        .with_x_scale_formatter(str::to_owned)
        .resolved();

    c.bench_function("init_chart_365_points", |b| {
        b.iter(|| {
            let chart = init_chart(black_box(&config), "bench", NullRenderer::default())
                .expect("chart");
            black_box(chart.destroy());
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_nice_domain,
    bench_smooth_path_1k,
    bench_init_chart_365_points
);
criterion_main!(benches);
