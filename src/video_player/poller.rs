// SPDX-License-Identifier: MPL-2.0
//! Status poll: reconcile the display with the engine.

use super::control::SliderModel;
use super::time_units::format_time;
use crate::domain::video::sanitize_secs;

/// One reading of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusSample {
    pub position: f64,
    pub duration: f64,
}

impl StatusSample {
    pub fn new(position: f64, duration: f64) -> Self {
        Self {
            position: sanitize_secs(position),
            duration: sanitize_secs(duration),
        }
    }
}

/// The elapsed and total time labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLabels {
    pub elapsed: String,
    pub total: String,
}

impl Default for TimeLabels {
    fn default() -> Self {
        Self {
            elapsed: format_time(0.0),
            total: format_time(0.0),
        }
    }
}

/// Applies a sample to the display.
///
/// `hold_value` is set while the user drags the control or a verified seek is
/// running; the labels still update but the control value is left alone.
/// Returns true if the control's range was remounted to a new duration.
pub fn apply_sample(
    sample: StatusSample,
    slider: &mut SliderModel,
    labels: &mut TimeLabels,
    hold_value: bool,
) -> bool {
    let range_changed = slider.sync_range(sample.duration);
    labels.elapsed = format_time(sample.position);

    if sample.duration > 0.0 {
        labels.total = format_time(sample.duration);
        if !hold_value {
            slider.set_value(sample.position);
        }
    } else if !hold_value && sample.position > 0.0 {
        // No duration yet: show something sane in the unit range.
        slider.set_value(sample.position.min(1.0));
    }
    range_changed
}
