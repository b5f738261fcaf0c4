use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{Body, GeoPositionProvider};
use urania::events::{EventDetector, EventSettings};
use urania::ChartBuilder;

fn bench_positions(c: &mut Criterion) {
    let provider = GeoPositionProvider::analytic();
    let dt = Utc.with_ymd_and_hms(2024, 4, 8, 18, 0, 0).unwrap();

    c.bench_function("moon_position", |b| {
        b.iter(|| provider.position(black_box(Body::Moon), black_box(dt)))
    });
    c.bench_function("full_chart", |b| {
        b.iter(|| ChartBuilder::new(&provider).build(black_box(dt)))
    });
}

fn bench_event_day(c: &mut Criterion) {
    let provider = GeoPositionProvider::analytic();
    let detector = EventDetector::new(&provider, EventSettings::default());
    let day = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();

    c.bench_function("detect_day", |b| b.iter(|| detector.detect(black_box(day))));
}

criterion_group!(benches, bench_positions, bench_event_day);
criterion_main!(benches);
