// SPDX-License-Identifier: MPL-2.0
//! Seek unit conventions and the strategies used to move playback.
//!
//! A media engine's seek primitive does not advertise whether its argument is
//! absolute seconds or a fraction of the duration. [`SeekMode`] records what
//! calibration learned, and decides the order in which the
//! [`SeekStrategy`] variants are tried.

use std::fmt;

/// What the engine's seek primitive was observed to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekMode {
    /// Not calibrated yet, or calibration was inconclusive.
    #[default]
    Unknown,
    /// `seek(v)` jumps to `v` seconds.
    Seconds,
    /// `seek(v)` jumps to `v * duration`.
    Fraction,
}

impl SeekMode {
    /// Returns true once calibration has reached a verdict.
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The order in which strategies are attempted under this mode.
    ///
    /// With no verdict the fraction strategy goes first: a seconds value read
    /// as a fraction clamps to the end harmlessly, a fraction read as seconds
    /// lands near the start.
    #[must_use]
    pub fn strategy_order(self) -> [SeekStrategy; 3] {
        use SeekStrategy::{SeekAsFraction, SeekAsSeconds, SetPositionDirectly};
        match self {
            Self::Seconds => [SeekAsSeconds, SetPositionDirectly, SeekAsFraction],
            Self::Fraction => [SeekAsFraction, SetPositionDirectly, SeekAsSeconds],
            Self::Unknown => [SeekAsFraction, SeekAsSeconds, SetPositionDirectly],
        }
    }
}

impl fmt::Display for SeekMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Seconds => write!(f, "seconds"),
            Self::Fraction => write!(f, "fraction"),
        }
    }
}

/// One way of asking the engine to move to an absolute position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekStrategy {
    /// `seek(target_seconds)`.
    SeekAsSeconds,
    /// Write the engine's position property directly.
    SetPositionDirectly,
    /// `seek(target_seconds / duration)`.
    SeekAsFraction,
}

impl SeekStrategy {
    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SeekAsSeconds => "seek_seconds",
            Self::SetPositionDirectly => "set_position",
            Self::SeekAsFraction => "seek_fraction",
        }
    }
}

/// Tolerance used to accept an observed position as "at the target".
///
/// The tolerance is `max(min_secs, ratio * duration)`, with
/// `unknown_duration_secs` standing in for a duration of 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyTolerance {
    /// Lower bound in seconds.
    pub min_secs: f64,
    /// Fraction of the duration.
    pub ratio: f64,
    /// Duration assumed when the real one is unknown.
    pub unknown_duration_secs: f64,
}

impl VerifyTolerance {
    /// Returns the tolerance in seconds for a media of the given duration.
    #[must_use]
    pub fn for_duration(&self, duration_secs: f64) -> f64 {
        let basis = if duration_secs > 0.0 {
            duration_secs
        } else {
            self.unknown_duration_secs
        };
        self.min_secs.max(self.ratio * basis)
    }

    /// Returns the tolerance used to match a fraction-mode probe.
    /// There is no fallback basis: without a duration, nothing matches.
    #[must_use]
    pub fn for_known_duration(&self, duration_secs: f64) -> Option<f64> {
        (duration_secs > 0.0).then(|| self.min_secs.max(self.ratio * duration_secs))
    }
}

impl Default for VerifyTolerance {
    fn default() -> Self {
        Self {
            min_secs: 1.0,
            ratio: 0.02,
            unknown_duration_secs: 60.0,
        }
    }
}
