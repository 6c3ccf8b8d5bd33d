// SPDX-License-Identifier: MPL-2.0
//! Engine playback state.
//!
//! This module defines the transport states a media engine can be in.

/// Represents the transport state of the media engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is playing and the source is released or rewound.
    #[default]
    Stopped,
    /// Media is currently playing.
    Playing,
    /// Media is paused at the current position.
    Paused,
}

impl PlaybackState {
    /// Returns true if the media is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the media is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if the media is stopped.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// The state to restore after an operation that forced a pause.
    #[must_use]
    pub fn resume_target(was_playing: bool) -> Self {
        if was_playing {
            Self::Playing
        } else {
            Self::Paused
        }
    }
}
