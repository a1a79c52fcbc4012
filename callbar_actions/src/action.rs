// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Call action model: kinds, per-instance flags, and ordered action lists.
//!
//! An [`ActionKind`] names one interactive control; a [`CallAction`] is one
//! instance of a kind together with the flags the rendering layer needs
//! (`enabled`, `toggled`, and a notification count for the notifiable subset).
//! An [`ActionList`] is an ordered, identity-unique sequence of actions.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use hashbrown::HashSet;
use smallvec::SmallVec;

/// Inline capacity of an [`ActionList`]; lists are expected to stay below this.
pub const INLINE_ACTIONS: usize = 16;

const CUSTOM_PREFIX: &str = "custom:";

/// How a screen-share action captures the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScreenShareMode {
    /// The user is asked whether to share the app only or the whole device.
    #[default]
    UserChoice,
    /// Only the app's own screens are captured.
    App,
    /// Every screen of the device is captured.
    WholeDevice,
}

/// Audio output device currently routed for the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioRoute {
    /// Output is muted.
    Muted,
    /// Built-in loudspeaker.
    Loudspeaker,
    /// Built-in earpiece.
    Earpiece,
    /// Wired headset.
    WiredHeadset,
    /// Bluetooth device.
    Bluetooth,
}

/// Colors of a host-defined button, as packed ARGB values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CustomAppearance {
    /// Background color.
    pub background: u32,
    /// Icon and text tint.
    pub tint: u32,
}

/// Configuration of a host-defined button.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CustomAction {
    /// Host-chosen identifier, unique among custom actions.
    pub id: String,
    /// Label shown with the button.
    pub label: String,
    /// Optional accessibility label; the label is used when absent.
    pub accessibility_label: Option<String>,
    /// Opaque icon resource identifier.
    pub icon: Option<u32>,
    /// Whether the button can be pressed.
    pub enabled: bool,
    /// Badge value shown on the button.
    pub badge: u32,
    /// Optional colors.
    pub appearance: Option<CustomAppearance>,
}

impl CustomAction {
    /// Creates an enabled custom action without badge, icon or appearance.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accessibility_label: None,
            icon: None,
            enabled: true,
            badge: 0,
            appearance: None,
        }
    }

    /// Sets the badge value.
    #[must_use]
    pub fn with_badge(mut self, badge: u32) -> Self {
        self.badge = badge;
        self
    }

    /// Sets whether the button can be pressed.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Every control the call surface knows about.
///
/// `Answer` is never stored in a resolved list; it is placed by the slot
/// allocator while the call is ringing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Mute or unmute the local microphone.
    ToggleMicrophone,
    /// Turn the local camera on or off.
    ToggleCamera,
    /// Flip between front and rear lens.
    SwitchCamera,
    /// End the call.
    HangUp,
    /// Accept a ringing call.
    Answer,
    /// Pick the audio output; carries the current route once known.
    Audio(Option<AudioRoute>),
    /// Open the volume control.
    ChangeVolume,
    /// Open the camera zoom control.
    ChangeZoom,
    /// Toggle the camera flashlight.
    ToggleFlashlight,
    /// Open shared files.
    FileShare,
    /// Start or stop screen sharing.
    ScreenShare(ScreenShareMode),
    /// Open the chat.
    OpenChat,
    /// Open the whiteboard.
    OpenWhiteboard,
    /// Show the participant list.
    ShowParticipants,
    /// Pick a virtual background.
    VirtualBackground,
    /// Open camera effects.
    CameraEffects,
    /// Sign pending documents.
    SignDocuments,
    /// A host-defined button.
    Custom(CustomAction),
}

impl ActionKind {
    /// Stable identity of this kind inside a list.
    ///
    /// Payloads do not take part in the identity, except for custom actions
    /// which are identified by their host-chosen id. All screen-share modes
    /// share one identity.
    #[must_use]
    pub fn id(&self) -> ActionId {
        match self {
            Self::Custom(custom) => {
                let mut id = String::with_capacity(CUSTOM_PREFIX.len() + custom.id.len());
                id.push_str(CUSTOM_PREFIX);
                id.push_str(&custom.id);
                ActionId(Cow::Owned(id))
            }
            _ => ActionId(Cow::Borrowed(self.builtin_id())),
        }
    }

    /// Returns `true` if this kind has the identity `id`, without allocating.
    #[must_use]
    pub fn has_id(&self, id: &ActionId) -> bool {
        match self {
            Self::Custom(custom) => {
                id.as_str().strip_prefix(CUSTOM_PREFIX) == Some(custom.id.as_str())
            }
            _ => id.as_str() == self.builtin_id(),
        }
    }

    /// Returns `true` if both kinds share an identity.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.id == b.id,
            (Self::Custom(_), _) | (_, Self::Custom(_)) => false,
            _ => self.builtin_id() == other.builtin_id(),
        }
    }

    fn builtin_id(&self) -> &'static str {
        match self {
            Self::ToggleMicrophone => "microphone",
            Self::ToggleCamera => "camera",
            Self::SwitchCamera => "switch_camera",
            Self::HangUp => "hang_up",
            Self::Answer => "answer",
            Self::Audio(_) => "audio",
            Self::ChangeVolume => "volume",
            Self::ChangeZoom => "zoom",
            Self::ToggleFlashlight => "flashlight",
            Self::FileShare => "file_share",
            Self::ScreenShare(_) => "screen_share",
            Self::OpenChat => "chat",
            Self::OpenWhiteboard => "whiteboard",
            Self::ShowParticipants => "participants",
            Self::VirtualBackground => "virtual_background",
            Self::CameraEffects => "camera_effects",
            Self::SignDocuments => "signature",
            Self::Custom(_) => "custom",
        }
    }

    /// Returns `true` for kinds that carry a notification count.
    #[must_use]
    pub fn is_notifiable(&self) -> bool {
        matches!(
            self,
            Self::OpenChat
                | Self::FileShare
                | Self::OpenWhiteboard
                | Self::SignDocuments
                | Self::Custom(_)
        )
    }

    /// Returns `true` for kinds that render as an on/off toggle.
    #[must_use]
    pub fn is_toggleable(&self) -> bool {
        matches!(
            self,
            Self::ToggleMicrophone
                | Self::ToggleCamera
                | Self::ToggleFlashlight
                | Self::ScreenShare(_)
                | Self::VirtualBackground
                | Self::CameraEffects
        )
    }
}

/// Identity of an action, stable across recomputations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(Cow<'static, str>);

impl ActionId {
    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One action instance together with its presentation flags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallAction {
    kind: ActionKind,
    enabled: bool,
    toggled: bool,
    notification_count: u32,
}

impl CallAction {
    /// Creates an action of the given kind.
    ///
    /// Built-in kinds start enabled, untoggled and without notifications.
    /// Custom actions take `enabled` and the count from their configuration.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        let (enabled, notification_count) = match &kind {
            ActionKind::Custom(custom) => (custom.enabled, custom.badge),
            _ => (true, 0),
        };
        Self {
            kind,
            enabled,
            toggled: false,
            notification_count,
        }
    }

    /// The action's kind.
    #[must_use]
    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// The action's identity.
    #[must_use]
    pub fn id(&self) -> ActionId {
        self.kind.id()
    }

    /// Whether the action can currently be used.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the action is currently switched on; always `false` for
    /// kinds that are not toggles.
    #[must_use]
    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    /// Pending notifications; always `0` outside the notifiable subset.
    #[must_use]
    pub fn notification_count(&self) -> u32 {
        self.notification_count
    }

    /// Sets whether the action can currently be used.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Sets the toggle flag. Ignored for kinds that are not toggles.
    pub fn set_toggled(&mut self, toggled: bool) {
        self.toggled = toggled && self.kind.is_toggleable();
    }

    /// Sets the notification count. Ignored outside the notifiable subset.
    pub fn set_notification_count(&mut self, count: u32) {
        if self.kind.is_notifiable() {
            self.notification_count = count;
        }
    }

    /// Builder form of [`CallAction::set_enabled`].
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// Builder form of [`CallAction::set_toggled`].
    #[must_use]
    pub fn with_toggled(mut self, toggled: bool) -> Self {
        self.set_toggled(toggled);
        self
    }

    /// Builder form of [`CallAction::set_notification_count`].
    #[must_use]
    pub fn with_notification_count(mut self, count: u32) -> Self {
        self.set_notification_count(count);
        self
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ActionKind {
        &mut self.kind
    }
}

impl From<ActionKind> for CallAction {
    fn from(kind: ActionKind) -> Self {
        Self::new(kind)
    }
}

/// An ordered list of actions, unique by [`ActionId`].
///
/// Insertion keeps the first action seen for an identity and drops later
/// duplicates, so the list never holds two actions with the same id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionList {
    items: SmallVec<[CallAction; INLINE_ACTIONS]>,
}

impl ActionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    /// Builds a list from kinds, keeping the first instance per identity.
    pub fn from_kinds(kinds: impl IntoIterator<Item = ActionKind>) -> Self {
        kinds.into_iter().map(CallAction::new).collect()
    }

    /// Appends an action unless one with the same identity is present.
    ///
    /// Returns `true` if the action was added.
    pub fn push_unique(&mut self, action: CallAction) -> bool {
        if self
            .items
            .iter()
            .any(|held| held.kind().same_identity(action.kind()))
        {
            return false;
        }
        self.items.push(action);
        true
    }

    /// Returns `true` if an action with this identity is present.
    #[must_use]
    pub fn contains(&self, id: &ActionId) -> bool {
        self.items.iter().any(|action| action.kind().has_id(id))
    }

    /// Returns `true` if a hang-up action is present.
    #[must_use]
    pub fn has_hang_up(&self) -> bool {
        self.items
            .iter()
            .any(|action| matches!(action.kind(), ActionKind::HangUp))
    }

    /// Looks up an action by identity.
    #[must_use]
    pub fn get(&self, id: &ActionId) -> Option<&CallAction> {
        self.items.iter().find(|action| action.kind().has_id(id))
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The actions in order.
    #[must_use]
    pub fn as_slice(&self) -> &[CallAction] {
        &self.items
    }

    /// Iterates the actions in order.
    pub fn iter(&self) -> core::slice::Iter<'_, CallAction> {
        self.items.iter()
    }

    /// Iterates the identities in order.
    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.items.iter().map(CallAction::id)
    }

    /// Splits the list at `at`, returning the prefix and the suffix.
    ///
    /// `at` is clamped to the list length.
    #[must_use]
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.items.len());
        let (head, tail) = self.items.split_at(at);
        (
            Self {
                items: head.iter().cloned().collect(),
            },
            Self {
                items: tail.iter().cloned().collect(),
            },
        )
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, CallAction> {
        self.items.iter_mut()
    }
}

impl FromIterator<CallAction> for ActionList {
    fn from_iter<I: IntoIterator<Item = CallAction>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let items = iter
            .into_iter()
            .filter(|action| seen.insert(action.id()))
            .collect();
        Self { items }
    }
}

impl FromIterator<ActionKind> for ActionList {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        Self::from_kinds(iter)
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a CallAction;
    type IntoIter = core::slice::Iter<'a, CallAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
