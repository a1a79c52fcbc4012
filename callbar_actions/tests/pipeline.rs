// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `callbar_actions` crate.
//!
//! These drive the public pipeline end to end: resolution, slot allocation,
//! badge aggregation and the `CallControls` coordinator that ties them
//! together.

use std::cell::Cell;
use std::rc::Rc;

use callbar_actions::catalog::base_actions_for;
use callbar_actions::{
    ActionKind, ActionList, ActionSetResolver, CallAction, CallCapabilities, CallConfiguration,
    CallControls, CallOptions, CallState, CallType, ControlsConfig, CustomAction, LegacyActions,
    NotificationSource, SlotAllocator, badge,
};

fn kinds(list: &ActionList) -> Vec<ActionKind> {
    list.iter().map(|action| action.kind().clone()).collect()
}

#[test]
fn base_set_is_stable_for_every_call_type() {
    for call_type in [
        CallType::AudioOnly,
        CallType::AudioUpgradable,
        CallType::AudioVideo,
    ] {
        let resolver = ActionSetResolver::new(call_type, CallState::Connected);
        let first = resolver.resolve();
        assert_eq!(first, base_actions_for(call_type));
        assert_eq!(first, resolver.resolve(), "{call_type:?} is not stable");
    }
}

#[test]
fn audio_only_has_no_camera_controls() {
    let resolver = ActionSetResolver::new(CallType::AudioOnly, CallState::Connected);
    let actions = resolver.resolve();
    for kind in [
        ActionKind::ToggleCamera,
        ActionKind::ChangeZoom,
        ActionKind::ToggleFlashlight,
        ActionKind::CameraEffects,
    ] {
        assert!(!actions.contains(&kind.id()), "{kind:?} present");
    }
    assert!(actions.contains(&ActionKind::SwitchCamera.id()));
}

#[test]
fn ended_call_is_empty_and_ignores_providers() {
    let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    resolver.set_call_state(CallState::DisconnectedEnded);
    assert!(resolver.resolve().is_empty());

    let installed = resolver.set_buttons_provider(Some(Box::new(
        |_: &ActionList| -> Option<ActionList> {
            Some(ActionList::from_kinds([ActionKind::OpenChat]))
        },
    )));
    assert!(!installed);
    assert!(!resolver.has_buttons_provider());
    assert!(resolver.resolve().is_empty());

    // Later state changes do not revive the call.
    resolver.set_call_state(CallState::Connected);
    assert!(resolver.resolve().is_empty());
}

#[test]
fn ending_drops_an_installed_provider() {
    let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    assert!(resolver.set_buttons_provider(Some(Box::new(
        |_: &ActionList| -> Option<ActionList> { Some(ActionList::new()) },
    ))));
    resolver.set_call_state(CallState::DisconnectedEnded);
    resolver.start_new_call(CallType::AudioVideo, CallState::Connected);
    assert!(!resolver.has_buttons_provider());
    assert_eq!(resolver.resolve(), base_actions_for(CallType::AudioVideo));
}

#[test]
fn legacy_set_replaces_instead_of_merging() {
    let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    resolver.set_legacy_actions(Some(LegacyActions::HANG_UP));
    assert_eq!(kinds(&resolver.resolve()), [ActionKind::HangUp]);

    resolver.set_legacy_actions(Some(LegacyActions::TOGGLE_MICROPHONE));
    assert_eq!(kinds(&resolver.resolve()), [ActionKind::ToggleMicrophone]);

    resolver.set_legacy_actions(None);
    assert_eq!(resolver.resolve(), base_actions_for(CallType::AudioVideo));
}

#[test]
fn screen_share_tokens_collapse_to_one_action() {
    let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    resolver.set_legacy_actions(Some(LegacyActions::from_tokens([
        "screen_share",
        "screen_share_app",
        "screen_share_whole_device",
        "warp_drive",
    ])));
    let actions = resolver.resolve();
    assert_eq!(actions.len(), 1);
    assert!(matches!(
        actions.as_slice()[0].kind(),
        ActionKind::ScreenShare(_)
    ));
}

#[test]
fn provider_sees_the_computed_list_and_may_empty_it() {
    let mut resolver = ActionSetResolver::new(CallType::AudioOnly, CallState::Connected);
    let seen = Rc::new(Cell::new(0_usize));
    let seen_in_provider = Rc::clone(&seen);
    resolver.set_buttons_provider(Some(Box::new(
        move |current: &ActionList| -> Option<ActionList> {
            seen_in_provider.set(current.len());
            Some(ActionList::new())
        },
    )));
    assert!(resolver.resolve().is_empty());
    assert_eq!(seen.get(), base_actions_for(CallType::AudioOnly).len());
}

#[test]
fn provider_returning_none_keeps_the_computed_list() {
    let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    resolver.set_buttons_provider(Some(Box::new(|_: &ActionList| -> Option<ActionList> {
        None
    })));
    assert_eq!(resolver.resolve(), base_actions_for(CallType::AudioVideo));
}

#[test]
fn seven_actions_on_five_slots_overflow_three() {
    let actions = ActionList::from_kinds([
        ActionKind::ToggleMicrophone,
        ActionKind::ToggleCamera,
        ActionKind::SwitchCamera,
        ActionKind::Audio(None),
        ActionKind::ChangeVolume,
        ActionKind::ShowParticipants,
        ActionKind::OpenChat,
    ]);
    let partition = SlotAllocator::default().partition_with_capacity(&actions, 5, false, false);
    assert_eq!(partition.visible.len(), 4);
    assert_eq!(partition.overflow.len(), 3);
    assert_eq!(
        partition.visible.len() + partition.overflow.len(),
        actions.len()
    );
    assert_eq!(partition.visible.as_slice(), &actions.as_slice()[..4]);
    assert_eq!(partition.overflow.as_slice(), &actions.as_slice()[4..]);
}

#[test]
fn overflow_badge_sums_notifiable_counts() {
    let overflow: ActionList = [
        CallAction::new(ActionKind::OpenChat).with_notification_count(2),
        CallAction::new(ActionKind::OpenWhiteboard).with_notification_count(0),
        CallAction::new(ActionKind::Custom(
            CustomAction::new("poll", "Poll").with_badge(5),
        )),
    ]
    .into_iter()
    .collect();
    assert_eq!(badge::aggregate(&overflow), 7);
}

#[test]
fn controls_publish_one_coherent_snapshot_per_change() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioVideo,
        CallState::Connected,
    );
    let first = controls.snapshot().clone();
    assert_eq!(first.revision, 1);
    assert_eq!(first.partition.visible.len(), 4);
    assert_eq!(first.partition.overflow.len(), 6);
    assert_eq!(first.more_badge, 0);

    controls.add_contextual(ActionKind::OpenWhiteboard);
    controls.set_notification_count(NotificationSource::Whiteboard, 3);
    let snapshot = controls.snapshot();
    assert_eq!(snapshot.actions.len(), 11);
    assert_eq!(snapshot.more_badge, 3);
    assert_eq!(
        snapshot.partition.visible.len() + snapshot.partition.overflow.len(),
        snapshot.actions.len()
    );
    assert_eq!(snapshot.revision, 3);
}

#[test]
fn unchanged_inputs_keep_the_revision() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioOnly,
        CallState::Connected,
    );
    let revision = controls.revision();
    controls.set_call_state(CallState::Connected);
    controls.set_large_screen(false);
    controls.refresh();
    assert_eq!(controls.revision(), revision);
}

#[test]
fn ringing_reserves_the_answer_control() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioOnly,
        CallState::Ringing,
    );
    let snapshot = controls.snapshot();
    assert!(snapshot.is_ringing);
    assert!(snapshot.partition.shows_answer());
    assert!(!snapshot.actions.contains(&ActionKind::Answer.id()));
    // Five slots minus answer minus more.
    assert_eq!(snapshot.partition.visible.len(), 3);

    controls.set_call_state(CallState::Connected);
    let snapshot = controls.snapshot();
    assert!(!snapshot.is_ringing);
    assert!(!snapshot.partition.shows_answer());
}

#[test]
fn provider_answer_is_not_counted_twice_while_ringing() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioVideo,
        CallState::Ringing,
    );
    controls.set_buttons_provider(Some(Box::new(|_: &ActionList| -> Option<ActionList> {
        Some(ActionList::from_kinds([ActionKind::Answer, ActionKind::HangUp]))
    })));
    let snapshot = controls.snapshot();
    assert!(!snapshot.actions.contains(&ActionKind::Answer.id()));
    assert_eq!(kinds(&snapshot.actions), [ActionKind::HangUp]);
    assert_eq!(snapshot.partition.answer_slots, 1);
    assert_eq!(snapshot.partition.visible.len(), 1);
}

#[test]
fn ended_call_empties_the_bar_and_new_call_restores_it() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioVideo,
        CallState::Connected,
    );
    controls.set_notification_count(NotificationSource::Chat, 4);
    controls.set_call_state(CallState::DisconnectedEnded);
    let snapshot = controls.snapshot();
    assert!(snapshot.actions.is_empty());
    assert!(!snapshot.partition.shows_more());
    assert_eq!(snapshot.more_badge, 0);

    assert!(!controls.set_buttons_provider(Some(Box::new(
        |_: &ActionList| -> Option<ActionList> { None },
    ))));

    controls.start_new_call(CallType::AudioOnly, CallState::Connecting);
    assert_eq!(
        kinds(&controls.snapshot().actions),
        kinds(&base_actions_for(CallType::AudioOnly))
    );
}

#[test]
fn capabilities_flow_into_the_snapshot() {
    let mut controls = CallControls::new(
        ControlsConfig::default(),
        CallType::AudioVideo,
        CallState::Connected,
    );
    let mic = ActionKind::ToggleMicrophone.id();
    assert!(!controls.snapshot().actions.get(&mic).unwrap().is_enabled());

    controls.set_capabilities(CallCapabilities {
        participant_ready: true,
        microphone_on: true,
        ..CallCapabilities::default()
    });
    let action = controls.snapshot().actions.get(&mic).unwrap();
    assert!(action.is_enabled());
    assert!(action.is_toggled());
}

#[test]
fn configuration_round_trips_through_the_resolver() {
    let json = r#"{ "actions": ["hang_up", "open_chat_view_only", "unknown"] }"#;
    let config = CallConfiguration::decode(json).unwrap();
    assert_eq!(config.options, CallOptions::default());

    let mut resolver = ActionSetResolver::new(CallType::AudioVideo, CallState::Connected);
    resolver.set_legacy_actions(Some(config.legacy_actions()));
    let actions = resolver.resolve();
    assert_eq!(kinds(&actions), [ActionKind::HangUp, ActionKind::OpenChat]);

    let exported = CallConfiguration::from_actions(&actions, config.options);
    assert_eq!(
        exported.legacy_actions(),
        LegacyActions::HANG_UP | LegacyActions::OPEN_CHAT_FULL
    );
}
