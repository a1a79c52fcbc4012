// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Media the call was placed with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CallType {
    /// Audio only; video can never be enabled.
    AudioOnly,
    /// Audio now, video may be enabled later.
    AudioUpgradable,
    /// Audio and video.
    #[default]
    AudioVideo,
}

impl CallType {
    /// Returns `true` if the call carries audio. Every call type does.
    #[must_use]
    pub fn has_audio(self) -> bool {
        true
    }

    /// Returns `true` if the call carries, or can be upgraded to, video.
    #[must_use]
    pub fn has_video(self) -> bool {
        !matches!(self, Self::AudioOnly)
    }
}

/// Lifecycle of a call as reported by the calling session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CallState {
    /// Outgoing call being set up.
    #[default]
    Connecting,
    /// Incoming call waiting to be answered.
    Ringing,
    /// Media is flowing.
    Connected,
    /// Media was interrupted and is being restored.
    Reconnecting,
    /// Hang-up in progress.
    Disconnecting,
    /// Call dropped but the session may still be resumed.
    Disconnected,
    /// Call is over. Terminal.
    DisconnectedEnded,
}

impl CallState {
    /// Returns `true` for the terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::DisconnectedEnded)
    }

    /// Returns `true` while the call is going away or gone.
    #[must_use]
    pub fn is_ending(self) -> bool {
        matches!(self, Self::Disconnecting | Self::DisconnectedEnded)
    }

    /// Returns `true` while media is flowing.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` while an incoming call waits for an answer.
    #[must_use]
    pub fn is_ringing(self) -> bool {
        matches!(self, Self::Ringing)
    }
}
