// Benchmark for countdown hot paths
// Measures field decomposition per tick and share link parsing at startup

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trip_countdown::services::countdown::{CountdownFields, CountdownService, ShareLinkParams};
use trip_countdown::services::notification::NotificationService;

const SAMPLE_LINK: &str = "https://example.com/countdown?t=2026-07-04T18:30:00.000Z&e=Beach+Trip&p=Sam&m=Pack%20the%20bags&bg=https%3A%2F%2Fimg.example.com%2Fsea.jpg&theme=beach";

fn bench_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition");

    for diff_ms in [59_999i64, 86_399_999, 31_536_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(diff_ms), &diff_ms, |b, &diff_ms| {
            b.iter(|| CountdownFields::from_millis(black_box(diff_ms)))
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
    let effect = NotificationService::with_options(false, false);
    let mut service = CountdownService::with_default_target(Some(now + Duration::days(30)));
    service.start();

    c.bench_function("tick_running", |b| {
        b.iter(|| service.tick(black_box(now), &effect))
    });
}

fn bench_share_link(c: &mut Criterion) {
    c.bench_function("share_link_parse", |b| {
        b.iter(|| ShareLinkParams::parse(black_box(SAMPLE_LINK)))
    });

    let params = ShareLinkParams::parse(SAMPLE_LINK);
    c.bench_function("share_link_build", |b| {
        b.iter(|| black_box(&params).to_url("https://example.com/countdown"))
    });
}

criterion_group!(benches, bench_decomposition, bench_tick, bench_share_link);
criterion_main!(benches);
