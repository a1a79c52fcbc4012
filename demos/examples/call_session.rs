// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted call session.
//!
//! Drives the control bar through an incoming call, a collaboration session
//! and hang-up, while the action sheet is dragged, flung and dismissed.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p callbar_demos --example call_session`

use callbar_actions::{
    ActionKind, ActionList, AudioRoute, CallCapabilities, CallControls, CallState, CallType,
    ControlsConfig, ControlsSnapshot, NotificationSource,
};
use callbar_sheet::{
    Orientation, ScrimCoupler, SheetAnchors, SheetConfig, SheetDrag, SheetState, SheetValue,
};
use kurbo::{Point, Size};

fn print_bar(label: &str, snapshot: &ControlsSnapshot) {
    let ids = |list: &ActionList| {
        list.iter()
            .map(|action| {
                let id = action.id();
                if action.is_enabled() {
                    id.to_string()
                } else {
                    format!("({id})")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    let answer = if snapshot.partition.shows_answer() {
        "[answer] "
    } else {
        ""
    };
    let more = if snapshot.partition.shows_more() {
        format!(" [more:{}]", snapshot.more_badge)
    } else {
        String::new()
    };
    println!(
        "r{:<3} {label:<22} {answer}{}{more}",
        snapshot.revision,
        ids(&snapshot.partition.visible),
    );
    if snapshot.partition.shows_more() {
        println!("     {:<22} overflow: {}", "", ids(&snapshot.partition.overflow));
    }
}

fn run_to_rest(sheet: &mut SheetState, mut now: u64) -> u64 {
    while sheet.tick(now) {
        now += 16;
    }
    for event in sheet.take_events() {
        log::info!("sheet event: {event:?}");
    }
    now
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioVideo,
        CallState::Ringing,
    );
    print_bar("incoming", controls.snapshot());

    controls.set_call_state(CallState::Connected);
    controls.set_capabilities(CallCapabilities {
        participant_ready: true,
        microphone_on: true,
        camera_on: true,
        audio_route: Some(AudioRoute::Bluetooth),
        ..CallCapabilities::default()
    });
    print_bar("connected", controls.snapshot());

    controls.add_contextual(ActionKind::OpenWhiteboard);
    controls.set_notification_count(NotificationSource::Whiteboard, 2);
    controls.add_contextual(ActionKind::SignDocuments);
    controls.set_notification_count(NotificationSource::Signature, 1);
    print_bar("collaborating", controls.snapshot());

    controls.set_large_screen(true);
    print_bar("rotated to landscape", controls.snapshot());

    // The sheet hosting the overflow actions.
    let config = SheetConfig::default();
    let scrim = ScrimCoupler::from_config(&config);
    let mut sheet = SheetState::new(config, SheetValue::Collapsed);
    let extent = Size::new(390.0, 420.0);
    if let Some(anchors) = SheetAnchors::from_extent(extent, Orientation::Vertical, None) {
        sheet.update_anchors(anchors);
    }

    let mut drag = SheetDrag::new(Orientation::Vertical, config.velocity_window_ms);
    let mut now = 0;
    drag.start(Point::new(195.0, 400.0), now);
    for y in [380.0, 350.0, 310.0, 260.0] {
        now += 16;
        if let Some(delta) = drag.update(Point::new(195.0, y), now) {
            sheet.drag(delta);
        }
    }
    if let Some(velocity) = drag.end() {
        println!("released at {:?} with {velocity:.0} px/s", sheet.offset());
        sheet.settle(velocity);
    }
    now = run_to_rest(&mut sheet, now);
    println!(
        "sheet {:?}, scrim alpha {:.2}",
        sheet.current_value(),
        scrim.painted_alpha(&sheet)
    );

    scrim.tap(&mut sheet);
    run_to_rest(&mut sheet, now);
    println!(
        "sheet {:?}, scrim alpha {:.2}",
        sheet.current_value(),
        scrim.painted_alpha(&sheet)
    );

    controls.set_call_state(CallState::Disconnecting);
    print_bar("hanging up", controls.snapshot());
    controls.set_call_state(CallState::DisconnectedEnded);
    print_bar("ended", controls.snapshot());
}
