//! Benchmark for per-event and per-frame motion work.
//!
//! TARGET: every per-event path well under 1µs so a 120 Hz pointer stream
//! never shows up in a frame budget.
//!
//! Run with: cargo bench --package vitrine_motion --bench motion_benchmark

#![allow(missing_docs)]

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vitrine_motion::{
    DirectionalScrollController, Easing, ElementBounds, PointerFollower, ScrollProgressMapper,
    ScrollRegion, ScrollSample, SpringConfig, Ticker,
};

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn benchmark_pointer_frame(c: &mut Criterion) {
    let ticker = Ticker::default();
    let follower = PointerFollower::new(SpringConfig::default(), ticker.clone());
    let _observer = follower.subscribe(|p| {
        black_box(p);
    });

    c.bench_function("pointer_update_and_frame", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let x = (i % 1920) as f32;
            follower.update(black_box(x), black_box(540.0));
            ticker.advance(black_box(FRAME));
        });
    });
}

fn benchmark_scroll_progress(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_progress");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("region_10k", |b| {
        b.iter(|| {
            for i in 0..10_000u32 {
                let region = ScrollRegion {
                    element_top: 1200.0 - i as f32 * 0.2,
                    element_height: 600.0,
                    viewport_height: 800.0,
                };
                black_box(region.progress());
            }
        });
    });

    let mapper = ScrollProgressMapper::default();
    mapper.attach(ElementBounds::new(1200.0, 600.0));
    group.bench_function("mapper_on_scroll_10k", |b| {
        b.iter(|| {
            for i in 0..10_000u32 {
                mapper.on_scroll(ScrollSample::new(i as f32 * 0.2, 800.0));
            }
            black_box(mapper.progress())
        });
    });

    group.finish();
}

fn benchmark_nav(c: &mut Criterion) {
    let nav = DirectionalScrollController::default();

    c.bench_function("nav_on_scroll", |b| {
        let mut y = 0.0_f32;
        b.iter(|| {
            y = (y + 37.0) % 3000.0;
            black_box(nav.on_scroll(black_box(y)))
        });
    });
}

fn benchmark_bezier(c: &mut Criterion) {
    c.bench_function("cubic_bezier_apply", |b| {
        let mut t = 0.0_f32;
        b.iter(|| {
            t = (t + 0.013) % 1.0;
            black_box(Easing::EXPO_OUT.apply(black_box(t)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_pointer_frame,
    benchmark_scroll_progress,
    benchmark_nav,
    benchmark_bezier
);
criterion_main!(benches);
