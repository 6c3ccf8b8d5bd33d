// SPDX-License-Identifier: MPL-2.0
//! Simulated media engine implementing the [`MediaEngine`] port trait.
//!
//! [`SimulatedEngine`] models the behaviours the controller has to cope with:
//! a seek primitive whose unit is seconds, a fraction, silently ignored or
//! failing, an optional writable position, and a duration that is only known
//! once the engine has "read" the file.
//!
//! # Position Tracking
//!
//! The engine keeps an anchor position and, while playing, the instant the
//! anchor was taken. The reported position is `anchor + elapsed`, clamped to
//! the duration. Time comes from `tokio::time`, so a paused test runtime
//! drives playback deterministically.
//!
//! # Sharing
//!
//! Clones share state. The controller owns one clone; tests and the CLI keep
//! another to observe calls and inject position changes.
//!
//! [`MediaEngine`]: crate::application::port::MediaEngine

use crate::application::port::{EngineResult, MediaEngine};
use crate::domain::error::EngineError;
use crate::domain::video::{sanitize_secs, PlaybackState, Volume};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

/// How the simulated seek primitive interprets its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekUnit {
    /// `seek(v)` jumps to `v` seconds.
    Seconds,
    /// `seek(v)` jumps to `v * duration`.
    Fraction,
    /// `seek(v)` returns success and does nothing.
    Ignored,
    /// `seek(v)` always returns an error.
    Failing,
}

impl FromStr for SeekUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seconds" => Ok(Self::Seconds),
            "fraction" => Ok(Self::Fraction),
            "ignored" | "opaque" => Ok(Self::Ignored),
            "failing" => Ok(Self::Failing),
            other => Err(format!("unknown seek unit: {}", other)),
        }
    }
}

/// A write the controller made to the engine, recorded in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Open(PathBuf),
    Seek(f64),
    SetPosition(f64),
    SetState(PlaybackState),
    SetVolume(f32),
}

#[derive(Debug)]
struct Inner {
    unit: SeekUnit,
    direct_position: bool,
    default_duration: f64,
    durations: HashMap<PathBuf, f64>,
    unreadable: Vec<PathBuf>,
    loaded: Option<PathBuf>,
    duration: f64,
    anchor_position: f64,
    /// `Some` while playing.
    anchor_instant: Option<Instant>,
    state: PlaybackState,
    volume: Volume,
    calls: Vec<EngineCall>,
}

impl Inner {
    fn clamp(&self, secs: f64) -> f64 {
        let secs = sanitize_secs(secs);
        if self.duration > 0.0 {
            secs.min(self.duration)
        } else {
            secs
        }
    }

    fn position(&self) -> f64 {
        let elapsed = self
            .anchor_instant
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.clamp(self.anchor_position + elapsed)
    }

    fn move_to(&mut self, secs: f64) {
        self.anchor_position = self.clamp(secs);
        if self.anchor_instant.is_some() {
            self.anchor_instant = Some(Instant::now());
        }
    }
}

/// In-memory [`MediaEngine`] with a configurable seek unit.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    inner: Arc<Mutex<Inner>>,
}

impl SimulatedEngine {
    /// Creates an engine whose seek consumes `unit` and whose media last
    /// `duration_secs` unless registered otherwise with [`Self::insert_media`].
    #[must_use]
    pub fn new(unit: SeekUnit, duration_secs: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                unit,
                direct_position: true,
                default_duration: sanitize_secs(duration_secs),
                durations: HashMap::new(),
                unreadable: Vec::new(),
                loaded: None,
                duration: 0.0,
                anchor_position: 0.0,
                anchor_instant: None,
                state: PlaybackState::Stopped,
                volume: Volume::default(),
                calls: Vec::new(),
            })),
        }
    }

    /// Disables or enables the writable position property.
    #[must_use]
    pub fn with_direct_position(self, supported: bool) -> Self {
        self.lock().direct_position = supported;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers the duration reported for a specific file.
    pub fn insert_media(&self, path: impl Into<PathBuf>, duration_secs: f64) {
        self.lock()
            .durations
            .insert(path.into(), sanitize_secs(duration_secs));
    }

    /// Makes `open` fail for a specific file.
    pub fn mark_unreadable(&self, path: impl Into<PathBuf>) {
        self.lock().unreadable.push(path.into());
    }

    /// Changes the reported duration of the loaded media.
    pub fn set_duration(&self, duration_secs: f64) {
        self.lock().duration = sanitize_secs(duration_secs);
    }

    /// Moves playback forward as if `secs` of media had played.
    pub fn advance(&self, secs: f64) {
        let mut inner = self.lock();
        let target = inner.position() + secs;
        inner.move_to(target);
    }

    /// Changes how `seek` interprets its argument.
    pub fn set_unit(&self, unit: SeekUnit) {
        self.lock().unit = unit;
    }

    /// Every write made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock().calls.clone()
    }

    /// Only the `seek` and `set_position` writes, oldest first.
    #[must_use]
    pub fn seek_calls(&self) -> Vec<EngineCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Seek(_) | EngineCall::SetPosition(_)))
            .cloned()
            .collect()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// The file currently loaded, if any.
    #[must_use]
    pub fn loaded(&self) -> Option<PathBuf> {
        self.lock().loaded.clone()
    }
}

impl MediaEngine for SimulatedEngine {
    fn open(&mut self, path: &Path) -> EngineResult {
        let mut inner = self.lock();
        inner.calls.push(EngineCall::Open(path.to_path_buf()));
        if inner.unreadable.iter().any(|p| p == path) {
            return Err(EngineError::OpenFailed(format!("cannot decode {}", path.display())));
        }
        inner.duration = inner
            .durations
            .get(path)
            .copied()
            .unwrap_or(inner.default_duration);
        inner.loaded = Some(path.to_path_buf());
        inner.anchor_position = 0.0;
        inner.anchor_instant = None;
        inner.state = PlaybackState::Stopped;
        Ok(())
    }

    fn position(&self) -> f64 {
        self.lock().position()
    }

    fn duration(&self) -> f64 {
        self.lock().duration
    }

    fn seek(&mut self, value: f64) -> EngineResult {
        let mut inner = self.lock();
        inner.calls.push(EngineCall::Seek(value));
        if inner.loaded.is_none() {
            return Err(EngineError::NotLoaded);
        }
        match inner.unit {
            SeekUnit::Seconds => inner.move_to(value),
            SeekUnit::Fraction => {
                let target = value.clamp(0.0, 1.0) * inner.duration;
                inner.move_to(target);
            }
            SeekUnit::Ignored => {}
            SeekUnit::Failing => {
                return Err(EngineError::Rejected("seek failed".into()));
            }
        }
        Ok(())
    }

    fn set_position(&mut self, seconds: f64) -> EngineResult {
        let mut inner = self.lock();
        inner.calls.push(EngineCall::SetPosition(seconds));
        if !inner.direct_position {
            return Err(EngineError::Unsupported("set_position"));
        }
        if inner.loaded.is_none() {
            return Err(EngineError::NotLoaded);
        }
        inner.move_to(seconds);
        Ok(())
    }

    fn state(&self) -> PlaybackState {
        self.lock().state
    }

    fn set_state(&mut self, state: PlaybackState) -> EngineResult {
        let mut inner = self.lock();
        inner.calls.push(EngineCall::SetState(state));
        if inner.loaded.is_none() && !state.is_stopped() {
            return Err(EngineError::NotLoaded);
        }
        let position = inner.position();
        match state {
            PlaybackState::Playing => {
                inner.anchor_position = position;
                inner.anchor_instant = Some(Instant::now());
            }
            PlaybackState::Paused => {
                inner.anchor_position = position;
                inner.anchor_instant = None;
            }
            PlaybackState::Stopped => {
                inner.anchor_position = 0.0;
                inner.anchor_instant = None;
            }
        }
        inner.state = state;
        Ok(())
    }

    fn volume(&self) -> f32 {
        self.lock().volume.value()
    }

    fn set_volume(&mut self, volume: f32) -> EngineResult {
        let mut inner = self.lock();
        inner.calls.push(EngineCall::SetVolume(volume));
        inner.volume = Volume::new(volume);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(unit: SeekUnit, duration: f64) -> SimulatedEngine {
        let mut engine = SimulatedEngine::new(unit, duration);
        engine.open(Path::new("clip.mp4")).unwrap();
        engine
    }

    #[test]
    fn seconds_unit_jumps_to_value() {
        let mut engine = loaded(SeekUnit::Seconds, 100.0);
        engine.seek(42.0).unwrap();
        assert_eq!(engine.position(), 42.0);
    }

    #[test]
    fn fraction_unit_scales_by_duration() {
        let mut engine = loaded(SeekUnit::Fraction, 200.0);
        engine.seek(0.05).unwrap();
        assert!((engine.position() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn seconds_beyond_duration_clamp_to_end() {
        let mut engine = loaded(SeekUnit::Seconds, 100.0);
        engine.seek(500.0).unwrap();
        assert_eq!(engine.position(), 100.0);
    }

    #[test]
    fn ignored_unit_leaves_position() {
        let mut engine = loaded(SeekUnit::Ignored, 100.0);
        engine.seek(42.0).unwrap();
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn failing_unit_errors_and_records_call() {
        let mut engine = loaded(SeekUnit::Failing, 100.0);
        assert!(engine.seek(1.0).is_err());
        assert_eq!(engine.seek_calls(), vec![EngineCall::Seek(1.0)]);
    }

    #[test]
    fn direct_position_can_be_disabled() {
        let mut engine = loaded(SeekUnit::Seconds, 100.0).with_direct_position(false);
        assert_eq!(
            engine.set_position(5.0),
            Err(EngineError::Unsupported("set_position"))
        );
    }

    #[test]
    fn open_uses_registered_duration() {
        let mut engine = SimulatedEngine::new(SeekUnit::Seconds, 30.0);
        engine.insert_media("long.mp4", 7200.0);
        engine.open(Path::new("long.mp4")).unwrap();
        assert_eq!(engine.duration(), 7200.0);
        engine.open(Path::new("short.mp4")).unwrap();
        assert_eq!(engine.duration(), 30.0);
    }

    #[test]
    fn unreadable_file_fails_to_open() {
        let mut engine = SimulatedEngine::new(SeekUnit::Seconds, 30.0);
        engine.mark_unreadable("bad.mp4");
        assert!(matches!(
            engine.open(Path::new("bad.mp4")),
            Err(EngineError::OpenFailed(_))
        ));
        assert!(engine.loaded().is_none());
    }

    #[test]
    fn clones_share_state() {
        let mut engine = loaded(SeekUnit::Seconds, 100.0);
        let observer = engine.clone();
        engine.seek(12.0).unwrap();
        assert_eq!(observer.position(), 12.0);
        observer.advance(3.0);
        assert_eq!(engine.position(), 15.0);
    }

    #[test]
    fn seek_unit_parses_cli_names() {
        assert_eq!("seconds".parse::<SeekUnit>(), Ok(SeekUnit::Seconds));
        assert_eq!("Fraction".parse::<SeekUnit>(), Ok(SeekUnit::Fraction));
        assert_eq!("opaque".parse::<SeekUnit>(), Ok(SeekUnit::Ignored));
        assert!("bogus".parse::<SeekUnit>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn playing_advances_with_runtime_clock() {
        let mut engine = loaded(SeekUnit::Seconds, 100.0);
        engine.set_state(PlaybackState::Playing).unwrap();
        tokio::time::advance(std::time::Duration::from_secs(2)).await;
        assert!((engine.position() - 2.0).abs() < 1e-6);

        engine.set_state(PlaybackState::Paused).unwrap();
        tokio::time::advance(std::time::Duration::from_secs(5)).await;
        assert!((engine.position() - 2.0).abs() < 1e-6);
    }
}
