// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Poll period and the delays the controller suspends on
//! - **Tolerance**: Thresholds used to classify and verify seeks
//! - **Playback**: Rewind/forward step and volume
//!
//! The timing and tolerance values were chosen empirically against one engine.
//! They are exposed in `settings.toml` so they can be tuned per engine.

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Period of the status poller while a session is loaded (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Delay between playback start and seek-mode calibration (milliseconds).
/// Gives the engine time to populate the duration.
pub const DEFAULT_CALIBRATION_DELAY_MS: u64 = 600;

/// Wait after issuing a seek before sampling the position (milliseconds).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 180;

/// Quiet period after pressing the scrub control before the preview shows (milliseconds).
pub const DEFAULT_PREVIEW_DEBOUNCE_MS: u64 = 400;

/// Shortest delay accepted for any timer (milliseconds).
pub const MIN_DELAY_MS: u64 = 10;

/// Longest delay accepted for any timer (milliseconds).
pub const MAX_DELAY_MS: u64 = 10_000;

// ==========================================================================
// Tolerance Defaults
// ==========================================================================

/// Duration change (seconds) that signals a new media source.
pub const DEFAULT_DURATION_CHANGE_SECS: f64 = 0.5;

/// Lower bound of the verification tolerance (seconds).
pub const DEFAULT_VERIFY_MIN_SECS: f64 = 1.0;

/// Verification tolerance as a ratio of the duration.
pub const DEFAULT_VERIFY_RATIO: f64 = 0.02;

/// Duration assumed for tolerance purposes when the real one is unknown (seconds).
pub const DEFAULT_UNKNOWN_DURATION_SECS: f64 = 60.0;

/// Value passed to the seek primitive by the calibration probe.
/// Small under both unit conventions.
pub const DEFAULT_PROBE_VALUE: f64 = 0.05;

/// Absolute tolerance (seconds) for the seconds branch of the probe.
pub const DEFAULT_PROBE_SECONDS_SECS: f64 = 0.5;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Rewind/forward step (seconds).
pub const DEFAULT_SEEK_STEP_SECS: f64 = 10.0;

/// Minimum rewind/forward step (seconds).
pub const MIN_SEEK_STEP_SECS: f64 = 1.0;

/// Maximum rewind/forward step (seconds).
pub const MAX_SEEK_STEP_SECS: f64 = 120.0;

/// Default engine volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Timing validation
    assert!(MIN_DELAY_MS > 0);
    assert!(MAX_DELAY_MS > MIN_DELAY_MS);
    assert!(DEFAULT_POLL_INTERVAL_MS >= MIN_DELAY_MS);
    assert!(DEFAULT_POLL_INTERVAL_MS <= MAX_DELAY_MS);
    assert!(DEFAULT_SETTLE_DELAY_MS >= MIN_DELAY_MS);
    assert!(DEFAULT_SETTLE_DELAY_MS < DEFAULT_CALIBRATION_DELAY_MS);
    assert!(DEFAULT_PREVIEW_DEBOUNCE_MS >= MIN_DELAY_MS);

    // Tolerance validation
    assert!(DEFAULT_DURATION_CHANGE_SECS > 0.0);
    assert!(DEFAULT_VERIFY_MIN_SECS > 0.0);
    assert!(DEFAULT_VERIFY_RATIO > 0.0);
    assert!(DEFAULT_VERIFY_RATIO < 1.0);
    assert!(DEFAULT_PROBE_VALUE > 0.0);
    assert!(DEFAULT_PROBE_VALUE < 1.0);
    assert!(DEFAULT_UNKNOWN_DURATION_SECS > 0.0);

    // Playback validation
    assert!(MIN_SEEK_STEP_SECS > 0.0);
    assert!(DEFAULT_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
    assert!(DEFAULT_SEEK_STEP_SECS <= MAX_SEEK_STEP_SECS);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
};
