// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use callbar_actions::{
    ActionKind, ActionList, ActionSetResolver, CallAction, CallControls, CallState, CallType,
    ControlsConfig, CustomAction, LegacyActions, NotificationSource, SlotAllocator, badge,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn custom_actions(len: usize) -> ActionList {
    (0..len)
        .map(|i| {
            let id = format!("custom_{i}");
            CallAction::new(ActionKind::Custom(
                CustomAction::new(id.clone(), id).with_badge(u32::try_from(i).unwrap_or(0)),
            ))
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("actions/resolve");

    let base = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    group.bench_function("base_audio_video", |b| {
        b.iter(|| black_box(base.resolve()));
    });

    let mut legacy = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    legacy.set_legacy_actions(Some(LegacyActions::all()));
    group.bench_function("all_legacy_tokens", |b| {
        b.iter(|| black_box(legacy.resolve()));
    });

    let mut provided = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    provided.set_buttons_provider(Some(Box::new(
        |current: &ActionList| -> Option<ActionList> {
            let mut list = current.clone();
            list.push_unique(CallAction::new(ActionKind::OpenChat));
            Some(list)
        },
    )));
    group.bench_function("with_provider", |b| {
        b.iter(|| black_box(provided.resolve()));
    });

    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("actions/partition");
    let allocator = SlotAllocator::new(ControlsConfig::default());

    // Sizes straddle the inline capacity of `ActionList`.
    for len in [4_usize, 8, 16, 32] {
        let actions = custom_actions(len);
        group.bench_with_input(BenchmarkId::new("compact", len), &actions, |b, actions| {
            b.iter(|| black_box(allocator.partition(actions, false, false)));
        });
        group.bench_with_input(
            BenchmarkId::new("large_ringing", len),
            &actions,
            |b, actions| {
                b.iter(|| black_box(allocator.partition(actions, true, true)));
            },
        );
        group.bench_with_input(BenchmarkId::new("badge", len), &actions, |b, actions| {
            b.iter(|| black_box(badge::aggregate(actions)));
        });
    }

    group.finish();
}

fn bench_controls(c: &mut Criterion) {
    let mut group = c.benchmark_group("actions/controls");

    group.bench_function("notification_update", |b| {
        let mut controls = CallControls::new(
            ControlsConfig::default(),
            CallType::AudioVideo,
            CallState::Connected,
        );
        controls.add_contextual(ActionKind::OpenWhiteboard);
        let mut count = 0_u32;
        b.iter(|| {
            count = count.wrapping_add(1);
            controls.set_notification_count(NotificationSource::Whiteboard, count);
            black_box(controls.snapshot().more_badge)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_partition, bench_controls);
criterion_main!(benches);
