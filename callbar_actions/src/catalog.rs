// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static action tables: legacy tokens, their translation into kinds, and the
//! canonical action set per call type.

use bitflags::bitflags;

use crate::action::{ActionKind, ActionList, ScreenShareMode};
use crate::call::CallType;

/// A single legacy capability token.
///
/// Legacy tokens predate [`ActionKind`] and are still what calling sessions
/// and stored configurations speak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegacyAction {
    /// `toggle_microphone`
    ToggleMicrophone,
    /// `toggle_camera`
    ToggleCamera,
    /// `switch_camera`
    SwitchCamera,
    /// `hang_up`
    HangUp,
    /// `file_share`
    FileShare,
    /// `screen_share`, the generic token older hosts still send.
    ScreenShare,
    /// `screen_share_user_choice`
    ScreenShareUserChoice,
    /// `screen_share_app`
    ScreenShareApp,
    /// `screen_share_whole_device`
    ScreenShareWholeDevice,
    /// `audio`
    Audio,
    /// `change_zoom`
    ChangeZoom,
    /// `change_volume`
    ChangeVolume,
    /// `toggle_flashlight`
    ToggleFlashlight,
    /// `open_chat_view_only`
    OpenChatViewOnly,
    /// `open_chat_full`
    OpenChatFull,
    /// `show_participants`
    ShowParticipants,
    /// `open_whiteboard_view_only`
    OpenWhiteboardViewOnly,
    /// `open_whiteboard_full`
    OpenWhiteboardFull,
    /// `camera_effects`
    CameraEffects,
}

impl LegacyAction {
    /// Every token, in iteration order of [`LegacyActions`].
    pub const ALL: [Self; 19] = [
        Self::ToggleMicrophone,
        Self::ToggleCamera,
        Self::SwitchCamera,
        Self::HangUp,
        Self::FileShare,
        Self::ScreenShare,
        Self::ScreenShareUserChoice,
        Self::ScreenShareApp,
        Self::ScreenShareWholeDevice,
        Self::Audio,
        Self::ChangeZoom,
        Self::ChangeVolume,
        Self::ToggleFlashlight,
        Self::OpenChatViewOnly,
        Self::OpenChatFull,
        Self::ShowParticipants,
        Self::OpenWhiteboardViewOnly,
        Self::OpenWhiteboardFull,
        Self::CameraEffects,
    ];

    /// Parses a token. Unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.token() == token)
    }

    /// The wire token.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::ToggleMicrophone => "toggle_microphone",
            Self::ToggleCamera => "toggle_camera",
            Self::SwitchCamera => "switch_camera",
            Self::HangUp => "hang_up",
            Self::FileShare => "file_share",
            Self::ScreenShare => "screen_share",
            Self::ScreenShareUserChoice => "screen_share_user_choice",
            Self::ScreenShareApp => "screen_share_app",
            Self::ScreenShareWholeDevice => "screen_share_whole_device",
            Self::Audio => "audio",
            Self::ChangeZoom => "change_zoom",
            Self::ChangeVolume => "change_volume",
            Self::ToggleFlashlight => "toggle_flashlight",
            Self::OpenChatViewOnly => "open_chat_view_only",
            Self::OpenChatFull => "open_chat_full",
            Self::ShowParticipants => "show_participants",
            Self::OpenWhiteboardViewOnly => "open_whiteboard_view_only",
            Self::OpenWhiteboardFull => "open_whiteboard_full",
            Self::CameraEffects => "camera_effects",
        }
    }

    /// The flag for this token inside a [`LegacyActions`] set.
    #[must_use]
    pub fn flag(self) -> LegacyActions {
        match self {
            Self::ToggleMicrophone => LegacyActions::TOGGLE_MICROPHONE,
            Self::ToggleCamera => LegacyActions::TOGGLE_CAMERA,
            Self::SwitchCamera => LegacyActions::SWITCH_CAMERA,
            Self::HangUp => LegacyActions::HANG_UP,
            Self::FileShare => LegacyActions::FILE_SHARE,
            Self::ScreenShare => LegacyActions::SCREEN_SHARE,
            Self::ScreenShareUserChoice => LegacyActions::SCREEN_SHARE_USER_CHOICE,
            Self::ScreenShareApp => LegacyActions::SCREEN_SHARE_APP,
            Self::ScreenShareWholeDevice => LegacyActions::SCREEN_SHARE_WHOLE_DEVICE,
            Self::Audio => LegacyActions::AUDIO,
            Self::ChangeZoom => LegacyActions::CHANGE_ZOOM,
            Self::ChangeVolume => LegacyActions::CHANGE_VOLUME,
            Self::ToggleFlashlight => LegacyActions::TOGGLE_FLASHLIGHT,
            Self::OpenChatViewOnly => LegacyActions::OPEN_CHAT_VIEW_ONLY,
            Self::OpenChatFull => LegacyActions::OPEN_CHAT_FULL,
            Self::ShowParticipants => LegacyActions::SHOW_PARTICIPANTS,
            Self::OpenWhiteboardViewOnly => LegacyActions::OPEN_WHITEBOARD_VIEW_ONLY,
            Self::OpenWhiteboardFull => LegacyActions::OPEN_WHITEBOARD_FULL,
            Self::CameraEffects => LegacyActions::CAMERA_EFFECTS,
        }
    }
}

bitflags! {
    /// A flat set of legacy tokens.
    ///
    /// Iteration through [`LegacyActions::actions`] follows declaration order,
    /// so the same set always produces the same action order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LegacyActions: u32 {
        /// See [`LegacyAction::ToggleMicrophone`].
        const TOGGLE_MICROPHONE = 1 << 0;
        /// See [`LegacyAction::ToggleCamera`].
        const TOGGLE_CAMERA = 1 << 1;
        /// See [`LegacyAction::SwitchCamera`].
        const SWITCH_CAMERA = 1 << 2;
        /// See [`LegacyAction::HangUp`].
        const HANG_UP = 1 << 3;
        /// See [`LegacyAction::FileShare`].
        const FILE_SHARE = 1 << 4;
        /// See [`LegacyAction::ScreenShare`].
        const SCREEN_SHARE = 1 << 5;
        /// See [`LegacyAction::ScreenShareUserChoice`].
        const SCREEN_SHARE_USER_CHOICE = 1 << 6;
        /// See [`LegacyAction::ScreenShareApp`].
        const SCREEN_SHARE_APP = 1 << 7;
        /// See [`LegacyAction::ScreenShareWholeDevice`].
        const SCREEN_SHARE_WHOLE_DEVICE = 1 << 8;
        /// See [`LegacyAction::Audio`].
        const AUDIO = 1 << 9;
        /// See [`LegacyAction::ChangeZoom`].
        const CHANGE_ZOOM = 1 << 10;
        /// See [`LegacyAction::ChangeVolume`].
        const CHANGE_VOLUME = 1 << 11;
        /// See [`LegacyAction::ToggleFlashlight`].
        const TOGGLE_FLASHLIGHT = 1 << 12;
        /// See [`LegacyAction::OpenChatViewOnly`].
        const OPEN_CHAT_VIEW_ONLY = 1 << 13;
        /// See [`LegacyAction::OpenChatFull`].
        const OPEN_CHAT_FULL = 1 << 14;
        /// See [`LegacyAction::ShowParticipants`].
        const SHOW_PARTICIPANTS = 1 << 15;
        /// See [`LegacyAction::OpenWhiteboardViewOnly`].
        const OPEN_WHITEBOARD_VIEW_ONLY = 1 << 16;
        /// See [`LegacyAction::OpenWhiteboardFull`].
        const OPEN_WHITEBOARD_FULL = 1 << 17;
        /// See [`LegacyAction::CameraEffects`].
        const CAMERA_EFFECTS = 1 << 18;
    }
}

impl LegacyActions {
    /// The default set hosts used before per-call configuration existed.
    pub const DEFAULT: Self = Self::TOGGLE_MICROPHONE
        .union(Self::TOGGLE_CAMERA)
        .union(Self::SWITCH_CAMERA)
        .union(Self::HANG_UP)
        .union(Self::AUDIO)
        .union(Self::CHANGE_VOLUME)
        .union(Self::SHOW_PARTICIPANTS);

    /// Iterates the tokens in the set, in declaration order.
    pub fn actions(self) -> impl Iterator<Item = LegacyAction> {
        LegacyAction::ALL
            .into_iter()
            .filter(move |action| self.contains(action.flag()))
    }

    /// Builds a set from wire tokens, dropping the ones it does not know.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        tokens
            .into_iter()
            .fold(Self::empty(), |set, token| match LegacyAction::from_token(token) {
                Some(action) => set | action.flag(),
                None => {
                    log::debug!("dropping unknown legacy action token {token:?}");
                    set
                }
            })
    }
}

impl From<LegacyAction> for LegacyActions {
    fn from(action: LegacyAction) -> Self {
        action.flag()
    }
}

impl FromIterator<LegacyAction> for LegacyActions {
    fn from_iter<I: IntoIterator<Item = LegacyAction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, action| set | action.flag())
    }
}

/// Translates a legacy token into its action kind.
///
/// Both chat tokens become [`ActionKind::OpenChat`], both whiteboard tokens
/// become [`ActionKind::OpenWhiteboard`], and every screen-share token becomes
/// an [`ActionKind::ScreenShare`] sharing the one screen-share identity.
#[must_use]
pub fn legacy_to_kind(action: LegacyAction) -> Option<ActionKind> {
    let kind = match action {
        LegacyAction::ToggleMicrophone => ActionKind::ToggleMicrophone,
        LegacyAction::ToggleCamera => ActionKind::ToggleCamera,
        LegacyAction::SwitchCamera => ActionKind::SwitchCamera,
        LegacyAction::HangUp => ActionKind::HangUp,
        LegacyAction::FileShare => ActionKind::FileShare,
        LegacyAction::ScreenShare | LegacyAction::ScreenShareUserChoice => {
            ActionKind::ScreenShare(ScreenShareMode::UserChoice)
        }
        LegacyAction::ScreenShareApp => ActionKind::ScreenShare(ScreenShareMode::App),
        LegacyAction::ScreenShareWholeDevice => {
            ActionKind::ScreenShare(ScreenShareMode::WholeDevice)
        }
        LegacyAction::Audio => ActionKind::Audio(None),
        LegacyAction::ChangeZoom => ActionKind::ChangeZoom,
        LegacyAction::ChangeVolume => ActionKind::ChangeVolume,
        LegacyAction::ToggleFlashlight => ActionKind::ToggleFlashlight,
        LegacyAction::OpenChatViewOnly | LegacyAction::OpenChatFull => ActionKind::OpenChat,
        LegacyAction::ShowParticipants => ActionKind::ShowParticipants,
        LegacyAction::OpenWhiteboardViewOnly | LegacyAction::OpenWhiteboardFull => {
            ActionKind::OpenWhiteboard
        }
        LegacyAction::CameraEffects => ActionKind::CameraEffects,
    };
    Some(kind)
}

/// Translates a kind back into a legacy token, for configuration export.
///
/// Lossy: every screen-share mode exports as the generic
/// [`LegacyAction::ScreenShare`]. Kinds without a legacy token yield `None`.
#[must_use]
pub fn kind_to_legacy(kind: &ActionKind) -> Option<LegacyAction> {
    let action = match kind {
        ActionKind::ToggleMicrophone => LegacyAction::ToggleMicrophone,
        ActionKind::ToggleCamera => LegacyAction::ToggleCamera,
        ActionKind::SwitchCamera => LegacyAction::SwitchCamera,
        ActionKind::HangUp => LegacyAction::HangUp,
        ActionKind::Audio(_) => LegacyAction::Audio,
        ActionKind::ChangeVolume => LegacyAction::ChangeVolume,
        ActionKind::ChangeZoom => LegacyAction::ChangeZoom,
        ActionKind::ToggleFlashlight => LegacyAction::ToggleFlashlight,
        ActionKind::FileShare => LegacyAction::FileShare,
        ActionKind::ScreenShare(_) => LegacyAction::ScreenShare,
        ActionKind::OpenChat => LegacyAction::OpenChatFull,
        ActionKind::OpenWhiteboard => LegacyAction::OpenWhiteboardFull,
        ActionKind::ShowParticipants => LegacyAction::ShowParticipants,
        ActionKind::CameraEffects => LegacyAction::CameraEffects,
        ActionKind::Answer
        | ActionKind::VirtualBackground
        | ActionKind::SignDocuments
        | ActionKind::Custom(_) => return None,
    };
    Some(action)
}

/// The canonical action set for a call type, before any override.
#[must_use]
pub fn base_actions_for(call_type: CallType) -> ActionList {
    let video = call_type.has_video();
    let kinds = [
        Some(ActionKind::ToggleMicrophone),
        video.then_some(ActionKind::ToggleCamera),
        Some(ActionKind::SwitchCamera),
        Some(ActionKind::HangUp),
        Some(ActionKind::Audio(None)),
        Some(ActionKind::ChangeVolume),
        video.then_some(ActionKind::ChangeZoom),
        video.then_some(ActionKind::ToggleFlashlight),
        video.then_some(ActionKind::CameraEffects),
        Some(ActionKind::ShowParticipants),
    ];
    ActionList::from_kinds(kinds.into_iter().flatten())
}

/// Maps a legacy set into actions, collapsing kinds that share an identity.
#[must_use]
pub fn legacy_actions_to_list(actions: LegacyActions) -> ActionList {
    ActionList::from_kinds(actions.actions().filter_map(legacy_to_kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn tokens_round_trip_through_parser() {
        for action in LegacyAction::ALL {
            assert_eq!(LegacyAction::from_token(action.token()), Some(action));
        }
        assert_eq!(LegacyAction::from_token("teleport"), None);
    }

    #[test]
    fn flags_are_distinct_and_ordered() {
        let mut last = 0;
        for action in LegacyAction::ALL {
            let bits = action.flag().bits();
            assert_eq!(bits.count_ones(), 1, "{action:?} must be a single flag");
            assert!(bits > last, "{action:?} is out of declaration order");
            last = bits;
        }
        assert_eq!(LegacyActions::all().bits().count_ones(), 19);
    }

    #[test]
    fn from_tokens_drops_unknown() {
        let set = LegacyActions::from_tokens(["hang_up", "warp_drive", "audio"]);
        assert_eq!(set, LegacyActions::HANG_UP | LegacyActions::AUDIO);
    }

    #[test]
    fn screen_share_tokens_collapse_into_one_action() {
        let list = legacy_actions_to_list(
            LegacyActions::SCREEN_SHARE
                | LegacyActions::SCREEN_SHARE_APP
                | LegacyActions::SCREEN_SHARE_WHOLE_DEVICE,
        );
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.as_slice()[0].kind(),
            &ActionKind::ScreenShare(ScreenShareMode::UserChoice)
        );
    }

    #[test]
    fn chat_and_whiteboard_variants_collapse() {
        let list = legacy_actions_to_list(
            LegacyActions::OPEN_CHAT_VIEW_ONLY
                | LegacyActions::OPEN_CHAT_FULL
                | LegacyActions::OPEN_WHITEBOARD_VIEW_ONLY
                | LegacyActions::OPEN_WHITEBOARD_FULL,
        );
        let kinds: Vec<_> = list.iter().map(|a| a.kind().clone()).collect();
        assert_eq!(kinds, [ActionKind::OpenChat, ActionKind::OpenWhiteboard]);
    }

    #[test]
    fn kind_to_legacy_is_lossy_for_screen_share() {
        for mode in [
            ScreenShareMode::UserChoice,
            ScreenShareMode::App,
            ScreenShareMode::WholeDevice,
        ] {
            assert_eq!(
                kind_to_legacy(&ActionKind::ScreenShare(mode)),
                Some(LegacyAction::ScreenShare)
            );
        }
        assert_eq!(kind_to_legacy(&ActionKind::SignDocuments), None);
        assert_eq!(kind_to_legacy(&ActionKind::Answer), None);
    }

    #[test]
    fn every_mapped_kind_exports_to_a_token_that_maps_back() {
        for action in LegacyAction::ALL {
            let Some(kind) = legacy_to_kind(action) else {
                continue;
            };
            let exported = kind_to_legacy(&kind).expect("mapped kinds export");
            assert_eq!(legacy_to_kind(exported).map(|k| k.id()), Some(kind.id()));
        }
    }

    #[test]
    fn audio_only_base_set_has_no_camera_controls() {
        let list = base_actions_for(CallType::AudioOnly);
        let kinds: Vec<_> = list.iter().map(|a| a.kind().clone()).collect();
        assert_eq!(
            kinds,
            [
                ActionKind::ToggleMicrophone,
                ActionKind::SwitchCamera,
                ActionKind::HangUp,
                ActionKind::Audio(None),
                ActionKind::ChangeVolume,
                ActionKind::ShowParticipants,
            ]
        );
    }

    #[test]
    fn video_base_set_adds_camera_controls() {
        for call_type in [CallType::AudioUpgradable, CallType::AudioVideo] {
            let list = base_actions_for(call_type);
            assert_eq!(list.len(), 10);
            assert!(list.contains(&ActionKind::ToggleCamera.id()));
            assert!(list.contains(&ActionKind::ToggleFlashlight.id()));
            assert!(list.contains(&ActionKind::CameraEffects.id()));
            assert!(list.contains(&ActionKind::ChangeZoom.id()));
        }
    }
}
