// SPDX-License-Identifier: MPL-2.0
//! End-to-end tests of the player task on a paused Tokio clock.

use seekwise::application::port::MediaEngine;
use seekwise::domain::video::{PlaybackState, SeekMode, SeekStrategy};
use seekwise::infrastructure::{SeekUnit, SimulatedEngine};
use seekwise::video_player::{
    spawn_player, MediaItem, PlaybackController, PlayerHandle, PlayerView, PointerEvent,
    SeekOutcome, SliderGeometry, Tuning,
};
use std::time::Duration;
use tempfile::TempDir;

fn media(dir: &TempDir, name: &str) -> MediaItem {
    let path = dir.path().join(name);
    std::fs::write(&path, b"not really a video").expect("Failed to write media file");
    MediaItem::new(path)
}

type PlayerTask = tokio::task::JoinHandle<PlaybackController<SimulatedEngine>>;

fn start(engine: &SimulatedEngine) -> (PlayerHandle, PlayerTask) {
    let (handle, task) = spawn_player(PlaybackController::new(engine.clone(), Tuning::default()));
    handle.set_slider_geometry(SliderGeometry {
        x: 10.0,
        y: 400.0,
        width: 600.0,
        height: 24.0,
    });
    (handle, task)
}

/// Waits for the next view matching `done`.
async fn wait_for_view(handle: &PlayerHandle, done: impl Fn(&PlayerView) -> bool) -> PlayerView {
    let mut views = handle.subscribe();
    loop {
        {
            let view = views.borrow_and_update();
            if done(&view) {
                return view.clone();
            }
        }
        views.changed().await.expect("player task ended");
    }
}

#[tokio::test(start_paused = true)]
async fn fraction_engine_is_calibrated_and_seek_is_verified() {
    let dir = TempDir::new().unwrap();
    let engine = SimulatedEngine::new(SeekUnit::Fraction, 200.0);
    let (handle, task) = start(&engine);

    handle.load(media(&dir, "concert.mp4"));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.view().seek_mode, SeekMode::Fraction);

    handle.seek(150.0);
    let view = wait_for_view(&handle, |v| !v.seeking && v.last_seek.is_some()).await;
    let report = view.last_seek.unwrap();
    assert_eq!(
        report.outcome,
        SeekOutcome::Verified(SeekStrategy::SeekAsFraction)
    );
    assert!((report.position - 150.0).abs() < 1.0);
    assert_eq!(engine.state(), PlaybackState::Playing);

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn playback_advances_and_labels_follow() {
    let dir = TempDir::new().unwrap();
    let engine = SimulatedEngine::new(SeekUnit::Seconds, 3600.0);
    let (handle, _task) = start(&engine);

    handle.load(media(&dir, "lecture.mp4"));
    // The calibration probe costs a fraction of a second of progress.
    tokio::time::sleep(Duration::from_millis(5_600)).await;

    let view = handle.view();
    assert_eq!(view.labels.total, "01:00:00");
    assert_eq!(view.labels.elapsed, "00:05");
    assert_eq!(view.slider.max, 3600.0);
    assert!(view.slider.value > 5.0 && view.slider.value < 5.5);
}

#[tokio::test(start_paused = true)]
async fn scrub_release_seeks_and_resumes() {
    let dir = TempDir::new().unwrap();
    let engine = SimulatedEngine::new(SeekUnit::Seconds, 600.0);
    let (handle, _task) = start(&engine);

    handle.load(media(&dir, "match.mp4"));
    tokio::time::sleep(Duration::from_secs(1)).await;

    // Middle of the control: 300s.
    handle.press(PointerEvent::new(310.0, 410.0));
    tokio::time::sleep(Duration::from_millis(450)).await;
    let view = handle.view();
    let preview = view.preview.as_ref().map(|p| p.text.as_str());
    assert_eq!(preview, Some("05:00"));
    assert_eq!(engine.state(), PlaybackState::Paused);

    handle.drag(420.0);
    handle.release(PointerEvent::new(430.0, 410.0));
    let view = wait_for_view(&handle, |v| !v.seeking && v.last_seek.is_some()).await;
    assert!(view.preview.is_none());
    let report = view.last_seek.unwrap();
    assert_eq!(report.target, 420.0);
    assert_eq!(
        report.outcome,
        SeekOutcome::Verified(SeekStrategy::SeekAsSeconds)
    );
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[tokio::test(start_paused = true)]
async fn opaque_engine_seek_ends_best_effort() {
    let dir = TempDir::new().unwrap();
    let engine = SimulatedEngine::new(SeekUnit::Ignored, 300.0).with_direct_position(false);
    let (handle, _task) = start(&engine);

    handle.load(media(&dir, "stream.mp4"));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.view().seek_mode, SeekMode::Unknown);

    handle.toggle_play();
    handle.seek(200.0);
    let view = wait_for_view(&handle, |v| !v.seeking && v.last_seek.is_some()).await;
    let outcome = view.last_seek.map(|r| r.outcome);
    assert_eq!(outcome, Some(SeekOutcome::Exhausted));
    assert_eq!(engine.state(), PlaybackState::Paused);
    assert!(view.notice.is_none());
}

#[tokio::test(start_paused = true)]
async fn back_stops_playback_and_clears_view() {
    let dir = TempDir::new().unwrap();
    let engine = SimulatedEngine::new(SeekUnit::Seconds, 90.0);
    let (handle, task) = start(&engine);

    handle.load(media(&dir, "clip.mp4"));
    tokio::time::sleep(Duration::from_secs(2)).await;
    handle.unload();
    let view = wait_for_view(&handle, |v| !v.loaded).await;
    assert_eq!(view.title, "");
    assert_eq!(engine.state(), PlaybackState::Stopped);

    handle.shutdown();
    let controller = task.await.unwrap();
    assert_eq!(controller.seek_mode(), SeekMode::Seconds);
}
