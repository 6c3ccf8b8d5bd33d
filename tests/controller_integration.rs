// SPDX-License-Identifier: MPL-2.0
//! Controller behaviour across sessions, driven with explicit instants.

use seekwise::application::port::MediaEngine;
use seekwise::config::Config;
use seekwise::domain::video::{PlaybackState, SeekMode};
use seekwise::infrastructure::{EngineCall, SeekUnit, SimulatedEngine};
use seekwise::video_player::{MediaItem, PlaybackController, SeekOutcome, Tuning};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

struct Harness {
    controller: PlaybackController<SimulatedEngine>,
    engine: SimulatedEngine,
    start: Instant,
    dir: TempDir,
}

impl Harness {
    fn new(engine: SimulatedEngine, tuning: Tuning) -> Self {
        Self {
            controller: PlaybackController::new(engine.clone(), tuning),
            engine,
            start: Instant::now(),
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    fn load(&mut self, name: &str, ms: u64) {
        let path = self.dir.path().join(name);
        std::fs::write(&path, b"media").expect("Failed to write media file");
        let now = self.at(ms);
        self.controller
            .load(MediaItem::new(path), now)
            .expect("load should succeed");
    }

    fn run_until(&mut self, ms: u64) {
        let until = self.at(ms);
        while let Some(deadline) = self.controller.next_deadline() {
            if deadline > until {
                break;
            }
            self.controller.on_deadline(deadline);
        }
    }
}

#[test]
fn calibration_carries_over_between_sessions_of_equal_length() {
    let engine = SimulatedEngine::new(SeekUnit::Fraction, 240.0);
    let mut h = Harness::new(engine, Tuning::default());
    h.load("episode1.mp4", 0);
    h.run_until(1_000);
    assert_eq!(h.controller.seek_mode(), SeekMode::Fraction);

    h.controller.unload();
    h.load("episode2.mp4", 5_000);
    h.engine.clear_calls();
    h.run_until(7_000);
    assert_eq!(h.controller.seek_mode(), SeekMode::Fraction);
    assert!(h.engine.seek_calls().is_empty());

    // The calibrated order puts the fraction strategy first.
    h.controller.request_seek(120.0, h.at(7_000));
    assert_eq!(h.engine.seek_calls(), vec![EngineCall::Seek(0.5)]);
}

#[test]
fn engine_swapping_unit_is_caught_by_duration_change() {
    let engine = SimulatedEngine::new(SeekUnit::Seconds, 100.0);
    let mut h = Harness::new(engine, Tuning::default());
    h.load("short.mp4", 0);
    h.run_until(1_000);
    assert_eq!(h.controller.seek_mode(), SeekMode::Seconds);

    // A new source with another duration, now seeking by fraction.
    h.engine.set_unit(SeekUnit::Fraction);
    h.engine.set_duration(400.0);
    h.run_until(3_000);
    assert_eq!(h.controller.seek_mode(), SeekMode::Fraction);
    assert_eq!(h.controller.calibration().last_calibrated_duration, 400.0);
}

#[test]
fn configured_settle_delay_paces_attempts() {
    let mut config = Config::default();
    config.timing.settle_delay_ms = Some(50);
    let mut h = Harness::new(
        SimulatedEngine::new(SeekUnit::Ignored, 100.0).with_direct_position(false),
        Tuning::from_config(&config),
    );
    h.load("clip.mp4", 0);
    h.controller.request_seek(60.0, h.at(0));

    h.run_until(49);
    assert!(h.controller.active_seek().is_some());
    h.run_until(100);
    assert_eq!(
        h.controller.last_seek().map(|r| r.outcome),
        Some(SeekOutcome::Exhausted)
    );
    assert_eq!(h.engine.state(), PlaybackState::Playing);
}

#[test]
fn configured_seek_step_drives_rewind_and_forward() {
    let mut config = Config::default();
    config.playback.seek_step_secs = Some(30.0);
    let mut h = Harness::new(
        SimulatedEngine::new(SeekUnit::Seconds, 100.0),
        Tuning::from_config(&config),
    );
    h.load("clip.mp4", 0);
    h.controller.toggle_play();
    h.controller.request_seek(50.0, h.at(0));
    h.run_until(500);

    h.controller.forward(h.at(500));
    assert_eq!(h.controller.active_seek().map(|p| p.target()), Some(80.0));
    h.run_until(1_000);
    h.controller.rewind(h.at(1_000));
    assert_eq!(h.controller.active_seek().map(|p| p.target()), Some(50.0));
}

#[test]
fn open_failure_drops_the_previous_session() {
    let engine = SimulatedEngine::new(SeekUnit::Seconds, 100.0);
    let mut h = Harness::new(engine, Tuning::default());
    h.load("good.mp4", 0);
    h.run_until(1_000);

    let bad = h.dir.path().join("bad.mp4");
    std::fs::write(&bad, b"corrupt").unwrap();
    h.engine.mark_unreadable(bad.clone());
    assert!(h.controller.load(MediaItem::new(bad), h.at(1_000)).is_err());

    let view = h.controller.view();
    assert!(!view.loaded);
    assert_eq!(view.notice.map(|n| n.key), Some("notice-could-not-play"));
    // The calibration is kept for the next file.
    assert_eq!(view.seek_mode, SeekMode::Seconds);
    assert_eq!(h.engine.duration(), 100.0);
}
