// SPDX-License-Identifier: MPL-2.0
//! Playback position controller.
//!
//! [`PlaybackController`] ties the prober, the verified seek executor, the
//! scrub session and the status poller together around one [`MediaEngine`].
//!
//! # Time
//!
//! The controller never sleeps. Commands take the current instant, and every
//! delay is a deadline in its [`Timers`]. The owner asks for
//! [`next_deadline`](PlaybackController::next_deadline), waits until then and
//! calls [`on_deadline`](PlaybackController::on_deadline). Arming a timer
//! replaces the previous deadline of the same kind, so a superseded step can
//! never fire.
//!
//! # Failures
//!
//! Engine failures inside timed steps are logged and folded into the step's
//! outcome. Only [`load`](PlaybackController::load) reports an error.

use super::control::{PointerEvent, SliderGeometry, SliderModel};
use super::poller::{apply_sample, StatusSample, TimeLabels};
use super::prober::{Probe, ProbeStart};
use super::scrub::ScrubState;
use super::session::{MediaItem, PlaybackSession, SeekCalibration};
use super::timers::{TimerKind, Timers};
use super::tuning::Tuning;
use super::verified_seek::{AttemptOutcome, SeekAttemptPlan, SeekOutcome, SeekReport};
use super::view::{Notice, PlayButton, PlayerView};
use crate::application::port::MediaEngine;
use crate::domain::video::{sanitize_secs, PlaybackState, SeekMode, Volume};
use crate::error::{MediaError, Result};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Drives one media engine: calibration, verified seeks, scrubbing and polling.
#[derive(Debug)]
pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    tuning: Tuning,
    timers: Timers,
    session: Option<PlaybackSession>,
    /// Calibration kept while no session is loaded.
    retained_calibration: SeekCalibration,
    scrub: Option<ScrubState>,
    seek: Option<SeekAttemptPlan>,
    probe: Option<Probe>,
    slider: SliderModel,
    labels: TimeLabels,
    volume: Volume,
    notice: Option<Notice>,
    next_seek_id: u64,
    last_seek: Option<SeekReport>,
}

impl<E: MediaEngine> PlaybackController<E> {
    pub fn new(engine: E, tuning: Tuning) -> Self {
        let volume = tuning.volume;
        Self {
            engine,
            tuning,
            timers: Timers::default(),
            session: None,
            retained_calibration: SeekCalibration::default(),
            scrub: None,
            seek: None,
            probe: None,
            slider: SliderModel::default(),
            labels: TimeLabels::default(),
            volume,
            notice: None,
            next_seek_id: 0,
            last_seek: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Calibration in effect, whether or not a session is loaded.
    pub fn calibration(&self) -> SeekCalibration {
        self.session
            .as_ref()
            .map(|s| *s.calibration())
            .unwrap_or(self.retained_calibration)
    }

    pub fn seek_mode(&self) -> SeekMode {
        self.calibration().mode
    }

    pub fn active_seek(&self) -> Option<&SeekAttemptPlan> {
        self.seek.as_ref()
    }

    /// The most recent verified seek that ran to completion.
    pub fn last_seek(&self) -> Option<&SeekReport> {
        self.last_seek.as_ref()
    }

    pub fn scrub(&self) -> Option<&ScrubState> {
        self.scrub.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.scrub.is_some()
    }

    pub fn is_probing(&self) -> bool {
        self.probe.is_some()
    }

    pub fn slider(&self) -> &SliderModel {
        &self.slider
    }

    pub fn labels(&self) -> &TimeLabels {
        &self.labels
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Lays the scrub control out, which also moves its hit region.
    pub fn set_slider_geometry(&mut self, geometry: SliderGeometry) {
        self.slider.geometry = geometry;
    }

    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }

    /// The earliest instant at which [`Self::on_deadline`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next()
    }

    /// Whether playback runs once any in-progress seek or drag ends.
    pub fn intends_to_play(&self) -> bool {
        if let Some(plan) = &self.seek {
            return plan.resume_playing();
        }
        if let Some(scrub) = &self.scrub {
            return scrub.was_playing_before_drag();
        }
        self.engine.state().is_playing()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            title: self
                .session
                .as_ref()
                .map(|s| s.item().title.clone())
                .unwrap_or_default(),
            loaded: self.session.is_some(),
            labels: self.labels.clone(),
            slider: self.slider.clone(),
            preview: self.scrub.as_ref().and_then(|s| s.preview()).cloned(),
            play_button: PlayButton::for_playing(self.session.is_some() && self.intends_to_play()),
            volume: self.volume.value(),
            seek_mode: self.seek_mode(),
            seeking: self.seek.is_some(),
            last_seek: self.last_seek,
            notice: self.notice.clone(),
        }
    }

    fn duration(&self) -> f64 {
        sanitize_secs(self.engine.duration())
    }

    fn apply_state(&mut self, state: PlaybackState) {
        if let Err(err) = self.engine.set_state(state) {
            warn!(%err, ?state, "engine refused state change");
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Opens `item` and starts playing it.
    ///
    /// On success the previous session is replaced, and the poll and
    /// calibration deadlines are armed relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::FileMissing`] if the file does not exist (the
    /// current session is left alone) and [`MediaError::CouldNotPlay`] if the
    /// engine cannot open it (the current session is dropped). Both also set
    /// the notice.
    pub fn load(&mut self, item: MediaItem, now: Instant) -> Result<()> {
        if !item.path.exists() {
            let path = item.path.display().to_string();
            return Err(self.reject(MediaError::FileMissing(path)));
        }

        self.discard_transient();
        let calibration = match self.session.take() {
            Some(previous) => *previous.calibration(),
            None => self.retained_calibration,
        };
        self.retained_calibration = calibration;
        self.slider.reset();
        self.labels = TimeLabels::default();

        if let Err(err) = self.engine.open(&item.path) {
            warn!(path = %item.path.display(), %err, "engine could not open media");
            return Err(self.reject(MediaError::CouldNotPlay(err.to_string())));
        }

        self.notice = None;
        if let Err(err) = self.engine.set_volume(self.volume.value()) {
            debug!(%err, "engine has no volume control");
        }
        self.apply_state(PlaybackState::Playing);

        let mut session = PlaybackSession::new(item, calibration);
        session.observe(
            self.engine.position(),
            self.engine.duration(),
            self.engine.state().is_playing(),
        );
        info!(
            path = %session.source_path().display(),
            title = %session.item().title,
            duration = session.duration(),
            mode = %calibration.mode,
            "media loaded"
        );
        let duration = session.duration();
        self.session = Some(session);

        self.timers
            .arm(TimerKind::Poll, now + self.tuning.poll_interval);
        self.timers
            .arm(TimerKind::Calibration, now + self.tuning.calibration_delay);
        self.observe_duration(duration, now);
        Ok(())
    }

    fn reject(&mut self, err: MediaError) -> crate::error::Error {
        warn!(%err, "load rejected");
        self.notice = Some(Notice::from(&err));
        err.into()
    }

    /// Stops playback and drops the session.
    pub fn unload(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.retained_calibration = *session.calibration();
        self.discard_transient();
        self.apply_state(PlaybackState::Stopped);
        self.slider.reset();
        self.labels = TimeLabels::default();
        info!(path = %session.source_path().display(), "media unloaded");
    }

    /// Forgets every deadline, drag, probe and seek without restoring anything.
    fn discard_transient(&mut self) {
        self.timers.cancel_all();
        self.scrub = None;
        self.probe = None;
        if let Some(plan) = self.seek.take() {
            debug!(id = plan.id(), "seek discarded");
        }
    }

    // =========================================================================
    // Transport commands
    // =========================================================================

    /// Flips between playing and paused.
    ///
    /// During a seek or a drag the engine stays paused and the flip applies
    /// to the state restored afterwards.
    pub fn toggle_play(&mut self) -> PlayButton {
        if self.session.is_none() {
            return PlayButton::Play;
        }
        let play = !self.intends_to_play();
        self.set_intent(play);
        PlayButton::for_playing(play)
    }

    /// Pauses playback.
    pub fn stop(&mut self) {
        if self.session.is_some() {
            self.set_intent(false);
        }
    }

    fn set_intent(&mut self, play: bool) {
        if let Some(plan) = self.seek.as_mut() {
            plan.set_resume_playing(play);
        } else if let Some(scrub) = self.scrub.as_mut() {
            scrub.set_was_playing_before_drag(play);
        } else {
            self.apply_state(PlaybackState::resume_target(play));
        }
        debug!(play, "play intent changed");
    }

    /// Sets the volume, clamped to `[0, 1]`. Returns the applied value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = Volume::new(volume);
        if let Err(err) = self.engine.set_volume(self.volume.value()) {
            warn!(%err, "engine refused volume change");
        }
        self.volume.value()
    }

    /// Where a relative jump starts from: the pending target if a seek is in
    /// flight, the engine position otherwise.
    fn seek_base(&self) -> f64 {
        self.seek
            .as_ref()
            .map(SeekAttemptPlan::target)
            .unwrap_or_else(|| sanitize_secs(self.engine.position()))
    }

    /// Verified seek one step back, floored at 0.
    pub fn rewind(&mut self, now: Instant) -> bool {
        let target = (self.seek_base() - self.tuning.seek_step.value()).max(0.0);
        self.request_seek(target, now)
    }

    /// Verified seek one step forward, capped at the duration when known.
    pub fn forward(&mut self, now: Instant) -> bool {
        let mut target = self.seek_base() + self.tuning.seek_step.value();
        let duration = self.duration();
        if duration > 0.0 {
            target = target.min(duration);
        }
        self.request_seek(target, now)
    }

    // =========================================================================
    // Verified seek
    // =========================================================================

    /// Moves playback to `target` seconds, verifying the result.
    ///
    /// Supersedes any seek in flight. Returns false when nothing is loaded.
    pub fn request_seek(&mut self, target: f64, now: Instant) -> bool {
        if self.session.is_none() {
            debug!(target, "seek ignored: nothing loaded");
            return false;
        }
        let resume_playing = self.intends_to_play();
        if let Some(scrub) = self.scrub.take() {
            self.timers.cancel(TimerKind::PreviewDebounce);
            let was_playing = scrub.was_playing_before_drag();
            debug!(was_playing, "drag ended by seek");
        }
        self.start_seek(target, resume_playing, now);
        true
    }

    fn start_seek(&mut self, target: f64, resume_playing: bool, now: Instant) {
        if let Some(previous) = self.seek.take() {
            self.timers.cancel(TimerKind::SeekSettle);
            debug!(id = previous.id(), "seek superseded");
        }
        self.abandon_probe(now);

        self.next_seek_id += 1;
        let plan = SeekAttemptPlan::new(
            self.next_seek_id,
            target,
            self.duration(),
            self.seek_mode(),
            &self.tuning.verify,
            resume_playing,
        );
        debug!(
            id = plan.id(),
            requested = target,
            target = plan.target(),
            mode = %self.seek_mode(),
            resume_playing,
            "verified seek started"
        );
        if !self.engine.state().is_paused() {
            self.apply_state(PlaybackState::Paused);
        }
        self.seek = Some(plan);
        self.advance_seek(now);
    }

    /// Invokes strategies until one is issued, or finishes the seek when none
    /// remain. Strategies that fail to invoke are skipped without waiting.
    fn advance_seek(&mut self, now: Instant) {
        let Some(plan) = self.seek.as_mut() else {
            return;
        };
        while let Some((strategy, outcome)) = plan.invoke_next(&mut self.engine) {
            match outcome {
                AttemptOutcome::Issued => {
                    self.timers
                        .arm(TimerKind::SeekSettle, now + self.tuning.settle_delay);
                    return;
                }
                AttemptOutcome::Failed(reason) => {
                    debug!(strategy = strategy.name(), %reason, "seek attempt failed");
                }
            }
        }
        self.finish_seek(SeekOutcome::Exhausted);
    }

    fn verify_seek(&mut self, now: Instant) {
        let Some(plan) = self.seek.as_ref() else {
            return;
        };
        let position = self.engine.position();
        let verified = if plan.verify(position) {
            plan.current_strategy()
        } else {
            None
        };
        match verified {
            Some(strategy) => self.finish_seek(SeekOutcome::Verified(strategy)),
            None => self.advance_seek(now),
        }
    }

    fn finish_seek(&mut self, outcome: SeekOutcome) {
        let Some(plan) = self.seek.take() else {
            return;
        };
        self.timers.cancel(TimerKind::SeekSettle);
        let report = plan.finish(&mut self.engine, outcome);
        self.last_seek = Some(report);
        self.refresh_display();
    }

    // =========================================================================
    // Calibration
    // =========================================================================

    fn calibrate(&mut self, now: Instant) {
        if self.session.is_none() {
            return;
        }
        if self.seek.is_some() || self.scrub.is_some() {
            debug!("calibration deferred: seek or drag in progress");
            self.timers
                .arm(TimerKind::Calibration, now + self.tuning.calibration_delay);
            return;
        }
        let duration = self.duration();
        let threshold = self.tuning.duration_change_secs;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if duration <= 0.0 {
            debug!("calibration skipped: duration unknown");
            return;
        }
        if session.calibration().is_current(duration, threshold) {
            debug!(mode = %session.seek_mode(), duration, "calibration still current");
            return;
        }
        session.calibration_mut().invalidate();
        match Probe::begin(&mut self.engine, &self.tuning) {
            ProbeStart::Pending(probe) => {
                self.probe = Some(probe);
                self.timers
                    .arm(TimerKind::ProbeSettle, now + self.tuning.settle_delay);
            }
            ProbeStart::NoDuration => {}
            ProbeStart::Rejected => {
                session
                    .calibration_mut()
                    .record(SeekMode::Unknown, duration);
                info!(duration, "seek probe rejected; using fallback order");
            }
        }
    }

    fn conclude_probe(&mut self) {
        let Some(probe) = self.probe.take() else {
            return;
        };
        let mode = probe.conclude(&mut self.engine, &self.tuning);
        if let Some(session) = self.session.as_mut() {
            session.calibration_mut().record(mode, probe.duration());
        }
        info!(%mode, duration = probe.duration(), "seek mode calibrated");
    }

    /// Drops a probe in flight, moves playback back to where the probe found
    /// it, and asks for calibration again later.
    fn abandon_probe(&mut self, now: Instant) {
        if let Some(probe) = self.probe.take() {
            probe.abandon(&mut self.engine, &self.tuning);
            self.timers.cancel(TimerKind::ProbeSettle);
            self.timers
                .arm(TimerKind::Calibration, now + self.tuning.calibration_delay);
            debug!("calibration probe abandoned");
        }
    }

    /// Reacts to a duration reading: a material change invalidates the
    /// calibration and schedules a new probe.
    fn observe_duration(&mut self, duration: f64, now: Instant) {
        let threshold = self.tuning.duration_change_secs;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if duration <= 0.0 || session.calibration().is_current(duration, threshold) {
            return;
        }
        let calibration = session.calibration_mut();
        if calibration.mode.is_known() {
            info!(
                previous = calibration.last_calibrated_duration,
                duration, "duration changed; recalibrating"
            );
            calibration.invalidate();
        }
        if self.probe.is_none() && !self.timers.is_armed(TimerKind::Calibration) {
            self.timers
                .arm(TimerKind::Calibration, now + self.tuning.calibration_delay);
        }
    }

    // =========================================================================
    // Scrubbing
    // =========================================================================

    /// Starts a drag if the press lands on the control.
    ///
    /// Playback is paused for the drag. A seek in flight is cancelled and its
    /// pending play/pause restoration carries over to the drag.
    pub fn on_press(&mut self, pointer: PointerEvent, now: Instant) -> bool {
        if self.session.is_none() || !self.slider.geometry.contains(pointer) {
            return false;
        }
        let was_playing = self.intends_to_play();
        if let Some(plan) = self.seek.take() {
            self.timers.cancel(TimerKind::SeekSettle);
            debug!(id = plan.id(), "seek cancelled by press");
        }
        self.abandon_probe(now);
        if self.engine.state().is_playing() {
            self.apply_state(PlaybackState::Paused);
        }

        let value = self.slider.value_at(pointer.x);
        self.slider.set_value(value);
        self.scrub = Some(ScrubState::begin(was_playing));
        self.timers.arm(
            TimerKind::PreviewDebounce,
            now + self.tuning.preview_debounce,
        );
        debug!(was_playing, value, "drag started");
        true
    }

    /// Follows a value change of the control.
    pub fn on_drag(&mut self, value: f64) {
        self.slider.set_value(value);
        let duration = self.duration();
        if let Some(scrub) = self.scrub.as_mut() {
            scrub.track(&self.slider, duration);
        }
    }

    fn show_preview(&mut self) {
        let duration = self.duration();
        if let Some(scrub) = self.scrub.as_mut() {
            scrub.activate_preview(&self.slider, duration);
            debug!(target = ?scrub.preview_target_secs(), "preview shown");
        }
    }

    /// Ends a drag. Inside the control this seeks to the chosen time; outside
    /// it only restores play/pause. Returns true if a seek was started.
    pub fn on_release(&mut self, pointer: PointerEvent, now: Instant) -> bool {
        let Some(scrub) = self.scrub.take() else {
            return false;
        };
        self.timers.cancel(TimerKind::PreviewDebounce);
        let was_playing = scrub.was_playing_before_drag();

        if !self.slider.geometry.contains(pointer) {
            debug!(was_playing, "released outside the control");
            self.apply_state(PlaybackState::resume_target(was_playing));
            self.refresh_display();
            return false;
        }
        let target = scrub.release_target(&self.slider, self.duration());
        self.start_seek(target, was_playing, now);
        true
    }

    // =========================================================================
    // Polling
    // =========================================================================

    fn poll(&mut self, now: Instant) {
        if self.session.is_none() {
            return;
        }
        let duration = self.refresh_display();
        self.observe_duration(duration, now);
        self.timers
            .arm(TimerKind::Poll, now + self.tuning.poll_interval);
    }

    /// Samples the engine into the session and the display. Returns the
    /// sampled duration.
    fn refresh_display(&mut self) -> f64 {
        let sample = StatusSample::new(self.engine.position(), self.engine.duration());
        let playing = self.engine.state().is_playing();
        if let Some(session) = self.session.as_mut() {
            session.observe(sample.position, sample.duration, playing);
        }
        let hold = self.scrub.is_some() || self.seek.is_some();
        if apply_sample(sample, &mut self.slider, &mut self.labels, hold) {
            debug!(duration = sample.duration, "control range remounted");
        }
        sample.duration
    }

    // =========================================================================
    // Deadlines
    // =========================================================================

    /// Runs every step whose deadline is at or before `now`.
    pub fn on_deadline(&mut self, now: Instant) {
        while let Some(kind) = self.timers.pop_due(now) {
            match kind {
                TimerKind::Poll => self.poll(now),
                TimerKind::Calibration => self.calibrate(now),
                TimerKind::ProbeSettle => self.conclude_probe(),
                TimerKind::SeekSettle => self.verify_seek(now),
                TimerKind::PreviewDebounce => self.show_preview(),
            }
        }
    }
}
