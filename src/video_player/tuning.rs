// SPDX-License-Identifier: MPL-2.0
//! Resolved controller settings.
//!
//! [`Tuning`] is the validated form of [`Config`]: every optional setting is
//! filled in from `config::defaults` and clamped into its accepted range, so
//! the controller never has to handle a missing or nonsensical value.

use super::time_units::millis;
use crate::config::{self, Config};
use crate::domain::video::{SeekStep, VerifyTolerance, Volume};
use std::time::Duration;

/// Timer and tolerance values the controller runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub poll_interval: Duration,
    pub calibration_delay: Duration,
    pub settle_delay: Duration,
    pub preview_debounce: Duration,
    /// Duration change that counts as a new media source.
    pub duration_change_secs: f64,
    pub verify: VerifyTolerance,
    /// Value handed to the seek primitive by the calibration probe.
    pub probe_value: f64,
    /// Tolerance for the seconds branch of the probe.
    pub probe_seconds_secs: f64,
    pub seek_step: SeekStep,
    pub volume: Volume,
}

fn delay(ms: Option<u64>, default: u64) -> Duration {
    let ms = ms.unwrap_or(default);
    millis(ms.clamp(config::MIN_DELAY_MS, config::MAX_DELAY_MS))
}

fn positive(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

impl Tuning {
    /// Builds the tuning from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let timing = &config.timing;
        let tolerance = &config.tolerance;
        let playback = &config.playback;

        let verify_ratio = match tolerance.verify_ratio {
            Some(r) if r.is_finite() && r > 0.0 && r < 1.0 => r,
            _ => config::DEFAULT_VERIFY_RATIO,
        };
        let probe_value = match tolerance.probe_value {
            Some(v) if v.is_finite() && v > 0.0 && v < 1.0 => v,
            _ => config::DEFAULT_PROBE_VALUE,
        };

        Self {
            poll_interval: delay(timing.poll_interval_ms, config::DEFAULT_POLL_INTERVAL_MS),
            calibration_delay: delay(
                timing.calibration_delay_ms,
                config::DEFAULT_CALIBRATION_DELAY_MS,
            ),
            settle_delay: delay(timing.settle_delay_ms, config::DEFAULT_SETTLE_DELAY_MS),
            preview_debounce: delay(
                timing.preview_debounce_ms,
                config::DEFAULT_PREVIEW_DEBOUNCE_MS,
            ),
            duration_change_secs: positive(
                tolerance.duration_change_secs,
                config::DEFAULT_DURATION_CHANGE_SECS,
            ),
            verify: VerifyTolerance {
                min_secs: positive(tolerance.verify_min_secs, config::DEFAULT_VERIFY_MIN_SECS),
                ratio: verify_ratio,
                unknown_duration_secs: positive(
                    tolerance.unknown_duration_secs,
                    config::DEFAULT_UNKNOWN_DURATION_SECS,
                ),
            },
            probe_value,
            probe_seconds_secs: positive(
                tolerance.probe_seconds_secs,
                config::DEFAULT_PROBE_SECONDS_SECS,
            ),
            seek_step: SeekStep::new(
                playback
                    .seek_step_secs
                    .unwrap_or(config::DEFAULT_SEEK_STEP_SECS),
            ),
            volume: Volume::new(playback.volume.unwrap_or(config::DEFAULT_VOLUME)),
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
