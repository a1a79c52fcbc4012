// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-action `enabled`/`toggled` flags and notification counts.
//!
//! The resolver decides which actions exist; this stage decides how each one
//! is presented, from a [`CallCapabilities`] snapshot supplied by the host and
//! the [`NotificationCounts`] that outlive recomputation. Membership and order
//! are never changed here.

use crate::action::{ActionKind, ActionList, AudioRoute};
use crate::call::{CallState, CallType};

/// What the local participant and device can do right now.
///
/// Hosts build this from their calling session; nothing here is read from
/// global state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CallCapabilities {
    /// The local participant has joined and its streams exist.
    pub participant_ready: bool,
    /// The local microphone is on.
    pub microphone_on: bool,
    /// The local camera is on.
    pub camera_on: bool,
    /// The active camera is an external USB camera.
    pub usb_camera: bool,
    /// The local screen is being shared.
    pub screen_sharing: bool,
    /// Virtual backgrounds can be used on this device.
    pub virtual_background_available: bool,
    /// A virtual background is currently applied.
    pub virtual_background_applied: bool,
    /// The current audio output route.
    pub audio_route: Option<AudioRoute>,
}

/// Which collaboration feature a notification count belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationSource {
    /// Unread chat messages.
    Chat,
    /// Received files not yet seen.
    FileShare,
    /// Whiteboard updates not yet seen.
    Whiteboard,
    /// Documents waiting for a signature.
    Signature,
}

/// Notification counts for the built-in notifiable actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NotificationCounts {
    chat: u32,
    file_share: u32,
    whiteboard: u32,
    signature: u32,
}

impl NotificationCounts {
    /// Sets the count for one source.
    pub fn set(&mut self, source: NotificationSource, count: u32) {
        match source {
            NotificationSource::Chat => self.chat = count,
            NotificationSource::FileShare => self.file_share = count,
            NotificationSource::Whiteboard => self.whiteboard = count,
            NotificationSource::Signature => self.signature = count,
        }
    }

    /// The count for one source.
    #[must_use]
    pub fn get(&self, source: NotificationSource) -> u32 {
        match source {
            NotificationSource::Chat => self.chat,
            NotificationSource::FileShare => self.file_share,
            NotificationSource::Whiteboard => self.whiteboard,
            NotificationSource::Signature => self.signature,
        }
    }

    /// The count stamped onto actions of `kind`, if it is a built-in
    /// notifiable kind.
    #[must_use]
    pub fn for_kind(&self, kind: &ActionKind) -> Option<u32> {
        let source = match kind {
            ActionKind::OpenChat => NotificationSource::Chat,
            ActionKind::FileShare => NotificationSource::FileShare,
            ActionKind::OpenWhiteboard => NotificationSource::Whiteboard,
            ActionKind::SignDocuments => NotificationSource::Signature,
            _ => return None,
        };
        Some(self.get(source))
    }
}

/// Stamps presentation flags onto every action in `actions`.
pub fn apply(
    actions: &mut ActionList,
    call_type: CallType,
    call_state: CallState,
    capabilities: &CallCapabilities,
    counts: &NotificationCounts,
) {
    let ending = call_state.is_ending();
    let active = call_state.is_active() && !ending;
    let audio = call_type.has_audio();
    let video = call_type.has_video();
    let caps = capabilities;

    for action in actions.iter_mut() {
        let (enabled, toggled) = match action.kind() {
            ActionKind::ToggleMicrophone => {
                (audio && caps.participant_ready && !ending, caps.microphone_on)
            }
            ActionKind::ToggleCamera => {
                (video && caps.participant_ready && !ending, caps.camera_on)
            }
            ActionKind::SwitchCamera => (!caps.usb_camera && caps.camera_on && !ending, false),
            ActionKind::ScreenShare(_) => (active, caps.screen_sharing),
            ActionKind::FileShare | ActionKind::OpenWhiteboard | ActionKind::SignDocuments => {
                (active, false)
            }
            ActionKind::ChangeZoom | ActionKind::ToggleFlashlight => (video && !ending, false),
            ActionKind::VirtualBackground | ActionKind::CameraEffects => (
                video && caps.virtual_background_available && !ending,
                video && caps.virtual_background_applied,
            ),
            ActionKind::HangUp
            | ActionKind::Audio(_)
            | ActionKind::ChangeVolume
            | ActionKind::OpenChat
            | ActionKind::ShowParticipants
            | ActionKind::Answer => (!ending, false),
            ActionKind::Custom(custom) => (custom.enabled, false),
        };
        if let ActionKind::Audio(route) = action.kind_mut() {
            *route = caps.audio_route;
        }
        if let Some(count) = counts.for_kind(action.kind()) {
            action.set_notification_count(count);
        }
        action.set_enabled(enabled);
        action.set_toggled(toggled);
    }
}
