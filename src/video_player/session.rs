// SPDX-License-Identifier: MPL-2.0
//! The loaded media item and what the controller knows about it.

use crate::domain::video::{sanitize_secs, SeekMode};
use std::path::{Path, PathBuf};

/// A catalog entry handed to [`load`](super::PlaybackController::load).
///
/// Only `path` is required. The duration hint is informational: the engine's
/// own duration is always what the controller trusts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaItem {
    pub path: PathBuf,
    pub title: String,
    pub duration_hint: Option<f64>,
    pub thumbnail: Option<PathBuf>,
}

impl MediaItem {
    /// Creates an item titled after the file name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            title,
            duration_hint: None,
            thumbnail: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_duration_hint(mut self, secs: f64) -> Self {
        self.duration_hint = Some(secs);
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, path: impl Into<PathBuf>) -> Self {
        self.thumbnail = Some(path.into());
        self
    }
}

/// What calibration learned about the engine's seek primitive.
///
/// Outlives a single session: loading another file into the same engine keeps
/// the verdict unless the new duration says the source changed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeekCalibration {
    pub mode: SeekMode,
    /// Duration observed when the last probe ran. 0 if none ran.
    pub last_calibrated_duration: f64,
}

impl SeekCalibration {
    /// Returns true if a probe ran for a source of this duration.
    #[must_use]
    pub fn is_current(&self, duration: f64, threshold: f64) -> bool {
        self.last_calibrated_duration > 0.0
            && (duration - self.last_calibrated_duration).abs() <= threshold
    }

    /// Records a probe verdict for a source of `duration` seconds.
    pub fn record(&mut self, mode: SeekMode, duration: f64) {
        self.mode = mode;
        self.last_calibrated_duration = duration;
    }

    /// Drops the verdict after the source changed.
    pub fn invalidate(&mut self) {
        self.mode = SeekMode::Unknown;
    }
}

/// State of the currently loaded media item.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    item: MediaItem,
    /// Seconds; 0 while unknown.
    duration: f64,
    position: f64,
    is_playing: bool,
    calibration: SeekCalibration,
}

impl PlaybackSession {
    pub fn new(item: MediaItem, calibration: SeekCalibration) -> Self {
        Self {
            item,
            duration: 0.0,
            position: 0.0,
            is_playing: false,
            calibration,
        }
    }

    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    pub fn source_path(&self) -> &Path {
        &self.item.path
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn seek_mode(&self) -> SeekMode {
        self.calibration.mode
    }

    pub fn calibration(&self) -> &SeekCalibration {
        &self.calibration
    }

    pub fn calibration_mut(&mut self) -> &mut SeekCalibration {
        &mut self.calibration
    }

    /// Stores an engine sample. The position is kept inside `[0, duration]`
    /// once the duration is known.
    pub fn observe(&mut self, position: f64, duration: f64, is_playing: bool) {
        self.duration = sanitize_secs(duration);
        let position = sanitize_secs(position);
        self.position = if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        };
        self.is_playing = is_playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_item_title_defaults_to_file_stem() {
        let item = MediaItem::new("/videos/holiday.mp4");
        assert_eq!(item.title, "holiday");
        assert_eq!(item.duration_hint, None);
        let item = item.with_title("Holiday 2024").with_duration_hint(93.0);
        assert_eq!(item.title, "Holiday 2024");
        assert_eq!(item.duration_hint, Some(93.0));
    }

    #[test]
    fn observe_clamps_position_into_duration() {
        let mut session = PlaybackSession::new(MediaItem::new("a.mp4"), SeekCalibration::default());
        session.observe(130.0, 120.0, true);
        assert_eq!(session.position(), 120.0);
        session.observe(-4.0, 120.0, false);
        assert_eq!(session.position(), 0.0);
        assert!(!session.is_playing());
    }

    #[test]
    fn observe_keeps_position_when_duration_unknown() {
        let mut session = PlaybackSession::new(MediaItem::new("a.mp4"), SeekCalibration::default());
        session.observe(3.5, f64::NAN, true);
        assert_eq!(session.duration(), 0.0);
        assert_eq!(session.position(), 3.5);
    }

    #[test]
    fn calibration_is_current_within_threshold() {
        let mut calibration = SeekCalibration::default();
        assert!(!calibration.is_current(100.0, 0.5));
        calibration.record(SeekMode::Seconds, 100.0);
        assert!(calibration.is_current(100.4, 0.5));
        assert!(!calibration.is_current(101.0, 0.5));
    }

    #[test]
    fn invalidate_resets_mode_only() {
        let mut calibration = SeekCalibration::default();
        calibration.record(SeekMode::Fraction, 200.0);
        calibration.invalidate();
        assert_eq!(calibration.mode, SeekMode::Unknown);
        assert_eq!(calibration.last_calibrated_duration, 200.0);
    }
}
