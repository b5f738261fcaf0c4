use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::aspects::{AspectCalculator, AspectContext};
use urania::ephemeris::{Body, GeoPositionProvider};
use urania::ChartBuilder;

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::default();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| {
            calculator.calculate_aspect(
                black_box(AspectContext::TransitToTransit),
                black_box(Body::Sun.into()),
                black_box(100.0),
                black_box(Body::Jupiter.into()),
                black_box(222.0),
            )
        })
    });
}

fn bench_chart_scans(c: &mut Criterion) {
    let provider = GeoPositionProvider::analytic();
    let natal = ChartBuilder::new(&provider)
        .build(Utc.with_ymd_and_hms(1990, 7, 4, 12, 0, 0).unwrap())
        .unwrap();
    let transit = ChartBuilder::new(&provider)
        .build(Utc.with_ymd_and_hms(2024, 4, 8, 18, 0, 0).unwrap())
        .unwrap();
    let calculator = AspectCalculator::default();

    c.bench_function("transit_to_transit", |b| {
        b.iter(|| calculator.transit_to_transit(black_box(&transit)))
    });
    c.bench_function("natal_to_transit", |b| {
        b.iter(|| calculator.natal_to_transit(black_box(&natal), black_box(&transit)))
    });
    c.bench_function("natal_to_midpoints", |b| {
        b.iter(|| calculator.natal_to_midpoints(black_box(&natal), black_box(&transit)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_chart_scans);
criterion_main!(benches);
