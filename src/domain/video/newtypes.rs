// SPDX-License-Identifier: MPL-2.0
//! Playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

/// Returns `secs` if it is a finite, non-negative number of seconds, else 0.
///
/// Engines report "unknown" in several ways (NaN, negative, zero); all of them
/// collapse to 0 here.
#[must_use]
pub fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 1.0;
}

/// Engine volume level, guaranteed to be within valid range (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    /// NaN maps to the minimum.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (below audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < 0.001
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// SeekStep
// =============================================================================

/// Rewind/forward step bounds (1 to 120 seconds).
pub mod seek_step_bounds {
    /// Minimum step in seconds.
    pub const MIN: f64 = 1.0;
    /// Maximum step in seconds.
    pub const MAX: f64 = 120.0;
    /// Default step in seconds.
    pub const DEFAULT: f64 = 10.0;
}

/// Distance covered by one rewind or forward command, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep(f64);

impl SeekStep {
    /// Creates a new seek step value, clamping to valid range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
    }

    /// Returns the value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the step as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for SeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
