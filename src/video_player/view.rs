// SPDX-License-Identifier: MPL-2.0
//! Display snapshot of the player screen.
//!
//! [`PlayerView`] is everything the surrounding UI renders. It is rebuilt from
//! controller state on demand and carries no behaviour.

use super::control::{PreviewLabel, SliderModel};
use super::poller::TimeLabels;
use super::verified_seek::SeekReport;
use crate::domain::video::SeekMode;
use crate::error::MediaError;

/// What the play/pause button offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayButton {
    /// Playback is paused or stopped; the button starts it.
    #[default]
    Play,
    /// Playback is running (or will resume); the button pauses it.
    Pause,
}

impl PlayButton {
    #[must_use]
    pub fn for_playing(playing: bool) -> Self {
        if playing {
            Self::Pause
        } else {
            Self::Play
        }
    }
}

/// A dismissable message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Stable key for localized text.
    pub key: &'static str,
    pub message: String,
}

impl From<&MediaError> for Notice {
    fn from(err: &MediaError) -> Self {
        Self {
            key: err.notice_key(),
            message: err.to_string(),
        }
    }
}

/// Snapshot of the player screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerView {
    /// Title of the loaded item. Empty when nothing is loaded.
    pub title: String,
    pub loaded: bool,
    pub labels: TimeLabels,
    pub slider: SliderModel,
    pub preview: Option<PreviewLabel>,
    pub play_button: PlayButton,
    pub volume: f32,
    pub seek_mode: SeekMode,
    pub seeking: bool,
    /// Outcome of the most recent verified seek.
    pub last_seek: Option<SeekReport>,
    pub notice: Option<Notice>,
}
