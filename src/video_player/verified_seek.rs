// SPDX-License-Identifier: MPL-2.0
//! Verified seek: move playback, then check that it actually moved.
//!
//! A [`SeekAttemptPlan`] holds one request: the clamped target, the strategy
//! order chosen from the calibrated [`SeekMode`], and the play/pause state to
//! restore once the request ends. The controller drives it:
//!
//! 1. [`SeekAttemptPlan::invoke_next`] issues the next strategy
//! 2. after the settle delay, [`SeekAttemptPlan::verify`] samples the position
//! 3. on a hit, or when strategies run out, [`SeekAttemptPlan::finish`]
//!    consumes the plan and restores the transport state
//!
//! `finish` takes the plan by value, so a request restores at most once.
//! A superseded plan is dropped without finishing.

use crate::application::port::MediaEngine;
use crate::domain::video::{sanitize_secs, PlaybackState, SeekMode, SeekStrategy, VerifyTolerance};
use tracing::{debug, warn};

/// Result of invoking a single strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The call went through; the position still has to be verified.
    Issued,
    /// The call could not be made. The reason is logged.
    Failed(String),
}

/// How a finished request ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    /// The position landed within tolerance after this strategy.
    Verified(SeekStrategy),
    /// No strategy landed within tolerance.
    Exhausted,
}

/// Summary of a finished verified seek.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekReport {
    pub id: u64,
    pub target: f64,
    pub position: f64,
    pub outcome: SeekOutcome,
}

/// One verified-seek request in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekAttemptPlan {
    id: u64,
    target: f64,
    duration: f64,
    strategies: [SeekStrategy; 3],
    next: usize,
    tolerance: f64,
    resume_playing: bool,
}

/// Clamps a requested target to `[0, duration]`, or to `>= 0` when the
/// duration is unknown.
#[must_use]
pub fn clamp_target(target: f64, duration: f64) -> f64 {
    let target = if target.is_finite() {
        target.max(0.0)
    } else {
        0.0
    };
    if duration > 0.0 {
        target.min(duration)
    } else {
        target
    }
}

impl SeekAttemptPlan {
    pub fn new(
        id: u64,
        target: f64,
        duration: f64,
        mode: SeekMode,
        tolerance: &VerifyTolerance,
        resume_playing: bool,
    ) -> Self {
        let duration = sanitize_secs(duration);
        Self {
            id,
            target: clamp_target(target, duration),
            duration,
            strategies: mode.strategy_order(),
            next: 0,
            tolerance: tolerance.for_duration(duration),
            resume_playing,
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The clamped target in seconds.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn strategies(&self) -> &[SeekStrategy; 3] {
        &self.strategies
    }

    /// Number of strategies invoked so far.
    #[must_use]
    pub fn attempts_made(&self) -> usize {
        self.next
    }

    /// The strategy whose result is being waited on, if any.
    #[must_use]
    pub fn current_strategy(&self) -> Option<SeekStrategy> {
        self.next.checked_sub(1).map(|i| self.strategies[i])
    }

    /// Whether playback resumes when the request ends.
    #[must_use]
    pub fn resume_playing(&self) -> bool {
        self.resume_playing
    }

    pub fn set_resume_playing(&mut self, resume: bool) {
        self.resume_playing = resume;
    }

    /// Invokes the next strategy. Returns `None` once all have been tried.
    pub fn invoke_next<E: MediaEngine>(
        &mut self,
        engine: &mut E,
    ) -> Option<(SeekStrategy, AttemptOutcome)> {
        let strategy = *self.strategies.get(self.next)?;
        self.next += 1;
        let outcome = self.invoke(strategy, engine);
        debug!(
            id = self.id,
            attempt = self.next,
            strategy = strategy.name(),
            target = self.target,
            ?outcome,
            "seek attempt"
        );
        Some((strategy, outcome))
    }

    fn invoke<E: MediaEngine>(&self, strategy: SeekStrategy, engine: &mut E) -> AttemptOutcome {
        let result = match strategy {
            SeekStrategy::SeekAsSeconds => engine.seek(self.target),
            SeekStrategy::SetPositionDirectly => engine.set_position(self.target),
            SeekStrategy::SeekAsFraction => {
                if self.duration <= 0.0 {
                    return AttemptOutcome::Failed("duration unknown".into());
                }
                engine.seek(self.target / self.duration)
            }
        };
        match result {
            Ok(()) => AttemptOutcome::Issued,
            Err(err) => AttemptOutcome::Failed(err.to_string()),
        }
    }

    /// Returns true if `position` is within tolerance of the target.
    #[must_use]
    pub fn verify(&self, position: f64) -> bool {
        let diff = (sanitize_secs(position) - self.target).abs();
        debug!(
            id = self.id,
            position,
            target = self.target,
            diff,
            tolerance = self.tolerance,
            "verify seek"
        );
        diff <= self.tolerance
    }

    /// Ends the request and restores the transport state captured for it.
    pub fn finish<E: MediaEngine>(self, engine: &mut E, outcome: SeekOutcome) -> SeekReport {
        let position = sanitize_secs(engine.position());
        match outcome {
            SeekOutcome::Verified(strategy) => debug!(
                id = self.id,
                strategy = strategy.name(),
                position,
                "seek verified"
            ),
            SeekOutcome::Exhausted => warn!(
                id = self.id,
                target = self.target,
                position,
                "no seek strategy landed within tolerance"
            ),
        }
        let state = PlaybackState::resume_target(self.resume_playing);
        if let Err(err) = engine.set_state(state) {
            warn!(%err, ?state, "could not restore playback state after seek");
        }
        SeekReport {
            id: self.id,
            target: self.target,
            position,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulated::{EngineCall, SeekUnit, SimulatedEngine};
    use crate::test_utils::assert_abs_diff_eq;
    use std::path::Path;
    use SeekStrategy::*;

    fn engine(unit: SeekUnit, duration: f64) -> SimulatedEngine {
        let mut engine = SimulatedEngine::new(unit, duration);
        engine.open(Path::new("clip.mp4")).unwrap();
        engine
    }

    fn plan(target: f64, duration: f64, mode: SeekMode) -> SeekAttemptPlan {
        let tolerance = VerifyTolerance::default();
        SeekAttemptPlan::new(1, target, duration, mode, &tolerance, false)
    }

    #[test]
    fn target_is_clamped_into_duration() {
        assert_eq!(plan(-5.0, 120.0, SeekMode::Seconds).target(), 0.0);
        assert_eq!(plan(170.0, 120.0, SeekMode::Seconds).target(), 120.0);
        assert_eq!(plan(f64::NAN, 120.0, SeekMode::Seconds).target(), 0.0);
    }

    #[test]
    fn target_is_floored_when_duration_unknown() {
        assert_eq!(plan(-5.0, 0.0, SeekMode::Unknown).target(), 0.0);
        assert_eq!(plan(500.0, 0.0, SeekMode::Unknown).target(), 500.0);
    }

    #[test]
    fn tolerance_follows_duration() {
        assert_eq!(plan(10.0, 200.0, SeekMode::Unknown).tolerance(), 4.0);
        assert_abs_diff_eq!(
            plan(10.0, 0.0, SeekMode::Unknown).tolerance(),
            1.2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn strategies_follow_mode() {
        assert_eq!(
            plan(1.0, 10.0, SeekMode::Fraction).strategies(),
            &[SeekAsFraction, SetPositionDirectly, SeekAsSeconds]
        );
    }

    #[test]
    fn unknown_mode_on_seconds_engine_converges_on_second_attempt() {
        let mut engine = engine(SeekUnit::Seconds, 100.0);
        let mut plan = plan(42.0, 100.0, SeekMode::Unknown);

        let (strategy, outcome) = plan.invoke_next(&mut engine).unwrap();
        assert_eq!(
            (strategy, outcome),
            (SeekAsFraction, AttemptOutcome::Issued)
        );
        assert!(!plan.verify(engine.position()));

        let (strategy, _) = plan.invoke_next(&mut engine).unwrap();
        assert_eq!(strategy, SeekAsSeconds);
        assert!(plan.verify(engine.position()));
        assert_eq!(plan.current_strategy(), Some(SeekAsSeconds));
        assert_eq!(
            engine.seek_calls(),
            vec![EngineCall::Seek(0.42), EngineCall::Seek(42.0)]
        );
    }

    #[test]
    fn fraction_attempt_fails_without_duration() {
        let mut engine = engine(SeekUnit::Seconds, 0.0);
        let mut plan = plan(5.0, 0.0, SeekMode::Unknown);
        let (strategy, outcome) = plan.invoke_next(&mut engine).unwrap();
        assert_eq!(strategy, SeekAsFraction);
        assert_eq!(outcome, AttemptOutcome::Failed("duration unknown".into()));
        assert!(engine.seek_calls().is_empty());
    }

    #[test]
    fn engine_errors_become_failed_outcomes() {
        let mut engine = engine(SeekUnit::Seconds, 100.0).with_direct_position(false);
        let mut plan = plan(5.0, 100.0, SeekMode::Seconds);
        plan.invoke_next(&mut engine);
        let (strategy, outcome) = plan.invoke_next(&mut engine).unwrap();
        assert_eq!(strategy, SetPositionDirectly);
        assert!(matches!(outcome, AttemptOutcome::Failed(_)));
    }

    #[test]
    fn plan_runs_out_after_three_attempts() {
        let mut engine = engine(SeekUnit::Ignored, 100.0);
        let mut plan = plan(50.0, 100.0, SeekMode::Unknown);
        for _ in 0..3 {
            assert!(plan.invoke_next(&mut engine).is_some());
        }
        assert!(plan.invoke_next(&mut engine).is_none());
        assert_eq!(plan.attempts_made(), 3);
    }

    #[test]
    fn finish_restores_captured_state() {
        let mut engine = engine(SeekUnit::Seconds, 100.0);
        engine.set_state(PlaybackState::Paused).unwrap();
        let mut plan = SeekAttemptPlan::new(
            7,
            20.0,
            100.0,
            SeekMode::Seconds,
            &VerifyTolerance::default(),
            true,
        );
        plan.invoke_next(&mut engine);
        let report = plan.finish(&mut engine, SeekOutcome::Verified(SeekAsSeconds));
        assert_eq!(engine.state(), PlaybackState::Playing);
        assert_eq!(report.id, 7);
        assert_eq!(report.outcome, SeekOutcome::Verified(SeekAsSeconds));
        assert_abs_diff_eq!(report.position, 20.0, epsilon = 0.01);
    }
}
