// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use callbar_sheet::{Orientation, SheetAnchors, SheetConfig, SheetState, SheetValue};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;

fn anchors() -> SheetAnchors {
    SheetAnchors::from_extent(Size::new(390.0, 844.0), Orientation::Vertical, Some(0.5))
        .expect("positive extent")
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/settle");

    for (name, velocity) in [("positional", 10.0), ("fling", -2_000.0)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut sheet = SheetState::new(SheetConfig::default(), SheetValue::Collapsed);
                    sheet.update_anchors(anchors());
                    sheet
                },
                |mut sheet| {
                    sheet.drag(-300.0);
                    sheet.settle(black_box(velocity));
                    black_box(sheet.target_value())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_animation(c: &mut Criterion) {
    c.bench_function("sheet/animate_to_rest", |b| {
        b.iter_batched(
            || {
                let mut sheet = SheetState::new(SheetConfig::default(), SheetValue::Collapsed);
                sheet.update_anchors(anchors());
                sheet.expand();
                sheet
            },
            |mut sheet| {
                let mut now = 0;
                while sheet.tick(now) {
                    now += 16;
                }
                black_box(sheet.take_events())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_settle, bench_animation);
criterion_main!(benches);
