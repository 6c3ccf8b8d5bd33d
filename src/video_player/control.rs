// SPDX-License-Identifier: MPL-2.0
//! Model of the scrub control and its floating time preview.
//!
//! The control's range is either seconds-scaled (`max` is the duration) or
//! unit-fraction-scaled (`max == 1`). [`SliderModel::is_seconds_scaled`]
//! tells them apart; every conversion between control values and seconds
//! goes through it.

use super::time_units::format_time;

/// Above this `max`, control values are seconds rather than fractions.
pub const SECONDS_SCALE_THRESHOLD: f64 = 1.001;

/// Range change below which the poller leaves `max` alone (seconds).
pub const RANGE_RESYNC_SECS: f64 = 0.5;

/// Minimum width of the preview label.
pub const PREVIEW_LABEL_WIDTH: f64 = 60.0;

/// Gap between the top of the control and the preview label.
pub const PREVIEW_LABEL_GAP: f64 = 8.0;

/// A pointer position in the same coordinate space as [`SliderGeometry`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the control sits on screen. Also its hit region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SliderGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SliderGeometry {
    #[must_use]
    pub fn contains(&self, pointer: PointerEvent) -> bool {
        pointer.x >= self.x
            && pointer.x <= self.x + self.width
            && pointer.y >= self.y
            && pointer.y <= self.y + self.height
    }

    /// Horizontal position of the pointer as a fraction of the width.
    #[must_use]
    pub fn fraction_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.x) / self.width).clamp(0.0, 1.0)
    }
}

/// Value, range and geometry of the scrub control.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderModel {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub geometry: SliderGeometry,
}

impl Default for SliderModel {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            value: 0.0,
            geometry: SliderGeometry::default(),
        }
    }
}

impl SliderModel {
    #[must_use]
    pub fn is_seconds_scaled(&self) -> bool {
        self.max > SECONDS_SCALE_THRESHOLD
    }

    /// Sets the value, clamped into the range.
    pub fn set_value(&mut self, value: f64) {
        self.value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
    }

    /// Remounts `max` to the duration when it drifted by more than
    /// [`RANGE_RESYNC_SECS`]. Returns true if the range changed.
    pub fn sync_range(&mut self, duration: f64) -> bool {
        if duration <= 0.0 || (self.max - duration).abs() <= RANGE_RESYNC_SECS {
            return false;
        }
        self.max = duration;
        self.value = self.value.clamp(self.min, self.max);
        true
    }

    /// Resets to an empty, unit-scaled control, keeping the geometry.
    pub fn reset(&mut self) {
        *self = Self {
            geometry: self.geometry,
            ..Self::default()
        };
    }

    /// The control value under a pointer x coordinate.
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        let fraction = self.geometry.fraction_at(x);
        if self.is_seconds_scaled() {
            fraction * self.max
        } else {
            fraction
        }
    }

    /// Converts a control value to seconds of media.
    ///
    /// Unit-scaled values need the duration; without one the result is 0.
    #[must_use]
    pub fn seconds_for(&self, value: f64, duration: f64) -> f64 {
        let seconds = if duration > 0.0 && self.is_seconds_scaled() {
            value
        } else {
            value * duration
        };
        if duration > 0.0 {
            seconds.clamp(0.0, duration)
        } else {
            seconds.max(0.0)
        }
    }

    /// Where `seconds` falls along the control, as a fraction of its width.
    #[must_use]
    pub fn fraction_of(&self, seconds: f64, duration: f64) -> f64 {
        let span = if self.is_seconds_scaled() {
            self.max
        } else if duration > 0.0 {
            duration
        } else {
            1.0
        };
        (seconds / span).clamp(0.0, 1.0)
    }
}

/// The floating label shown above the control while scrubbing.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLabel {
    pub text: String,
    /// Left edge of the label.
    pub x: f64,
    /// Bottom edge of the label.
    pub y: f64,
    pub seconds: f64,
}

impl PreviewLabel {
    /// Places a label for `seconds`, centred over its point on the control.
    #[must_use]
    pub fn place(seconds: f64, slider: &SliderModel, duration: f64) -> Self {
        let geometry = &slider.geometry;
        let fraction = slider.fraction_of(seconds, duration);
        let anchor = geometry.x + fraction * geometry.width.max(0.0);
        Self {
            text: format_time(seconds),
            x: anchor - PREVIEW_LABEL_WIDTH / 2.0,
            y: geometry.y + geometry.height + PREVIEW_LABEL_GAP,
            seconds,
        }
    }
}
