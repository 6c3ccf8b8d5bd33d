// SPDX-License-Identifier: MPL-2.0
//! Seek-mode calibration probe.
//!
//! The probe hands the seek primitive a value that is small under both unit
//! conventions, waits one settle delay, and looks at where playback landed:
//!
//! - near the value itself: the primitive takes seconds
//! - near `value * duration`: the primitive takes a fraction
//! - anywhere else: no verdict
//!
//! Playback is then moved back to where it was. A probe never fails loudly;
//! an inconclusive one leaves the mode [`SeekMode::Unknown`].

use super::tuning::Tuning;
use crate::application::port::MediaEngine;
use crate::domain::video::{sanitize_secs, SeekMode};
use tracing::{debug, warn};

/// A probe waiting for its settle delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    original_position: f64,
    duration: f64,
}

/// How a probe began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeStart {
    /// The probe seek was issued. Conclude after the settle delay.
    Pending(Probe),
    /// The duration is not known yet. Nothing was issued.
    NoDuration,
    /// The engine rejected the probe seek. Nothing moved.
    Rejected,
}

impl Probe {
    /// Records the current position and issues the probe seek.
    pub fn begin<E: MediaEngine>(engine: &mut E, tuning: &Tuning) -> ProbeStart {
        let duration = sanitize_secs(engine.duration());
        if duration <= 0.0 {
            return ProbeStart::NoDuration;
        }
        let original_position = sanitize_secs(engine.position());
        debug!(
            original_position,
            duration,
            value = tuning.probe_value,
            "probing seek unit"
        );
        match engine.seek(tuning.probe_value) {
            Ok(()) => ProbeStart::Pending(Probe {
                original_position,
                duration,
            }),
            Err(err) => {
                debug!(%err, "probe seek rejected");
                ProbeStart::Rejected
            }
        }
    }

    /// The duration the probe was started against.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Classifies where the probe landed and moves playback back.
    pub fn conclude<E: MediaEngine>(self, engine: &mut E, tuning: &Tuning) -> SeekMode {
        let observed = sanitize_secs(engine.position());
        let mode = classify(observed, self.duration, tuning);
        debug!(observed, duration = self.duration, %mode, "probe settled");
        self.restore(engine, mode);
        mode
    }

    /// Moves playback back without waiting for a verdict.
    ///
    /// The probe seek may already have landed, so the position is written
    /// directly in seconds. Engines without a writable position are restored
    /// through the seek primitive, in whatever unit the landing suggests.
    pub fn abandon<E: MediaEngine>(self, engine: &mut E, tuning: &Tuning) {
        if engine.set_position(self.original_position).is_ok() {
            debug!(position = self.original_position, "probe abandoned");
            return;
        }
        let observed = sanitize_secs(engine.position());
        let mode = classify(observed, self.duration, tuning);
        debug!(observed, %mode, "probe abandoned; restoring through seek");
        self.restore(engine, mode);
    }

    fn restore<E: MediaEngine>(&self, engine: &mut E, mode: SeekMode) {
        let value = match mode {
            SeekMode::Fraction => self.original_position / self.duration,
            SeekMode::Seconds | SeekMode::Unknown => self.original_position,
        };
        if engine.seek(value).is_ok() {
            return;
        }
        if let Err(err) = engine.set_position(self.original_position) {
            let position = self.original_position;
            warn!(%err, position, "could not restore position after probe");
        }
    }
}

/// Decides the seek unit from where a probe seek landed.
#[must_use]
pub fn classify(observed: f64, duration: f64, tuning: &Tuning) -> SeekMode {
    if (observed - tuning.probe_value).abs() < tuning.probe_seconds_secs {
        return SeekMode::Seconds;
    }
    match tuning.verify.for_known_duration(duration) {
        Some(tolerance) if (observed - tuning.probe_value * duration).abs() <= tolerance => {
            SeekMode::Fraction
        }
        _ => SeekMode::Unknown,
    }
}
