// SPDX-License-Identifier: MPL-2.0
//! Scrub session state machine.
//!
//! ```text
//! Idle --press--> Dragging(PreviewPending) --debounce--> Dragging(PreviewActive)
//!   ^                     |                                      |
//!   +------release--------+--------------------------------------+
//! ```
//!
//! `Idle` is the absence of a [`ScrubState`]. The controller owns the
//! debounce deadline; this module only tracks what the drag has seen.

use super::control::{PreviewLabel, SliderModel};

/// Whether the live preview is showing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubPhase {
    /// Pressed; the debounce delay has not elapsed.
    PreviewPending,
    /// The preview follows every value change.
    PreviewActive,
}

/// A live press-drag-release interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubState {
    phase: ScrubPhase,
    was_playing_before_drag: bool,
    preview_target_secs: Option<f64>,
    preview: Option<PreviewLabel>,
}

impl ScrubState {
    /// Starts a drag, remembering whether playback has to resume afterwards.
    pub fn begin(was_playing_before_drag: bool) -> Self {
        Self {
            phase: ScrubPhase::PreviewPending,
            was_playing_before_drag,
            preview_target_secs: None,
            preview: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ScrubPhase {
        self.phase
    }

    #[must_use]
    pub fn is_preview_active(&self) -> bool {
        self.phase == ScrubPhase::PreviewActive
    }

    #[must_use]
    pub fn was_playing_before_drag(&self) -> bool {
        self.was_playing_before_drag
    }

    pub fn set_was_playing_before_drag(&mut self, playing: bool) {
        self.was_playing_before_drag = playing;
    }

    #[must_use]
    pub fn preview_target_secs(&self) -> Option<f64> {
        self.preview_target_secs
    }

    #[must_use]
    pub fn preview(&self) -> Option<&PreviewLabel> {
        self.preview.as_ref()
    }

    /// Debounce elapsed: show the preview for the current control value.
    pub fn activate_preview(&mut self, slider: &SliderModel, duration: f64) {
        self.phase = ScrubPhase::PreviewActive;
        self.track(slider, duration);
    }

    /// Follows a value change. Only has an effect once the preview is active
    /// and the duration is known.
    pub fn track(&mut self, slider: &SliderModel, duration: f64) {
        if !self.is_preview_active() || duration <= 0.0 {
            return;
        }
        let seconds = slider.seconds_for(slider.value, duration);
        self.preview_target_secs = Some(seconds);
        self.preview = Some(PreviewLabel::place(seconds, slider, duration));
    }

    /// The seek target for a release with the control at `slider.value`.
    ///
    /// The previewed time wins when there is one, so the seek lands on what
    /// the user was shown.
    #[must_use]
    pub fn release_target(&self, slider: &SliderModel, duration: f64) -> f64 {
        match self.preview_target_secs {
            Some(seconds) if self.is_preview_active() => seconds,
            _ => slider.seconds_for(slider.value, duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_player::control::SliderGeometry;

    fn slider(max: f64, value: f64) -> SliderModel {
        SliderModel {
            max,
            value,
            geometry: SliderGeometry {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 10.0,
            },
            ..SliderModel::default()
        }
    }

    #[test]
    fn begins_pending_without_preview() {
        let scrub = ScrubState::begin(true);
        assert_eq!(scrub.phase(), ScrubPhase::PreviewPending);
        assert!(scrub.was_playing_before_drag());
        assert!(scrub.preview().is_none());
    }

    #[test]
    fn tracking_is_ignored_while_pending() {
        let mut scrub = ScrubState::begin(false);
        scrub.track(&slider(120.0, 30.0), 120.0);
        assert_eq!(scrub.preview_target_secs(), None);
    }

    #[test]
    fn active_preview_follows_every_change() {
        let mut scrub = ScrubState::begin(false);
        scrub.activate_preview(&slider(120.0, 30.0), 120.0);
        assert_eq!(scrub.preview_target_secs(), Some(30.0));
        assert_eq!(scrub.preview().map(|p| p.text.as_str()), Some("00:30"));

        scrub.track(&slider(120.0, 90.0), 120.0);
        assert_eq!(scrub.preview_target_secs(), Some(90.0));
        assert_eq!(scrub.preview().map(|p| p.text.as_str()), Some("01:30"));
    }

    #[test]
    fn unit_scaled_preview_uses_duration() {
        let mut scrub = ScrubState::begin(false);
        scrub.activate_preview(&slider(1.0, 0.5), 200.0);
        assert_eq!(scrub.preview_target_secs(), Some(100.0));
    }

    #[test]
    fn no_preview_without_duration() {
        let mut scrub = ScrubState::begin(false);
        scrub.activate_preview(&slider(1.0, 0.5), 0.0);
        assert!(scrub.is_preview_active());
        assert!(scrub.preview().is_none());
    }

    #[test]
    fn release_prefers_previewed_time() {
        let mut scrub = ScrubState::begin(false);
        scrub.activate_preview(&slider(120.0, 45.0), 120.0);
        assert_eq!(scrub.release_target(&slider(120.0, 50.0), 120.0), 45.0);
    }

    #[test]
    fn release_without_preview_uses_control_value() {
        let scrub = ScrubState::begin(false);
        assert_eq!(scrub.release_target(&slider(120.0, 50.0), 120.0), 50.0);
        assert_eq!(scrub.release_target(&slider(1.0, 0.25), 120.0), 30.0);
        assert_eq!(scrub.release_target(&slider(1.0, 0.25), 0.0), 0.0);
    }
}
