// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests that drive the control bar and the action sheet together.

use callbar_actions::{ActionKind, ActionList, CallControls, CallState, CallType, ControlsConfig};
use callbar_sheet::{SheetAnchors, SheetConfig, SheetState, SheetValue};

#[test]
fn call_ending_mid_drag_leaves_the_sheet_alone() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioVideo,
        CallState::Connected,
    );
    controls.set_buttons_provider(Some(Box::new(|_: &ActionList| -> Option<ActionList> {
        Some(ActionList::from_kinds([ActionKind::HangUp]))
    })));
    assert_eq!(controls.snapshot().actions.len(), 1);

    let mut sheet = SheetState::new(SheetConfig::default(), SheetValue::Collapsed);
    sheet.update_anchors(SheetAnchors::new(0.0, 400.0).unwrap());
    assert_eq!(sheet.drag(-100.0), -100.0);
    let offset = sheet.offset();
    sheet.take_events();

    controls.set_call_state(CallState::DisconnectedEnded);
    let snapshot = controls.snapshot();
    assert!(snapshot.actions.is_empty());
    assert!(snapshot.partition.visible.is_empty());
    assert!(snapshot.partition.overflow.is_empty());
    assert!(!controls.resolver().has_buttons_provider());

    // The drag keeps its position until the host releases it.
    assert!(sheet.is_dragging());
    assert_eq!(sheet.offset(), offset);
    assert_eq!(sheet.offset(), Some(300.0));
    assert!(!sheet.is_animating());
    assert!(sheet.take_events().is_empty());

    sheet.settle(0.0);
    assert_eq!(sheet.target_value(), SheetValue::Collapsed);
}
