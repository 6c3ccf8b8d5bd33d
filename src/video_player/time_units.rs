// SPDX-License-Identifier: MPL-2.0
//! Time unit conversion utilities for the playback display.
//!
//! Provides conversions between engine seconds and what the controls show:
//! - `HH:MM:SS` labels (hours omitted when zero)
//! - `Duration` values for the timer set

use std::time::Duration;

/// Seconds per hour, for label formatting.
pub const SECS_PER_HOUR: u64 = 3600;

/// Formats a position in seconds as `MM:SS`, or `HH:MM:SS` past the first hour.
///
/// Seconds are truncated, not rounded. Negative and non-finite values show as zero.
///
/// # Examples
///
/// ```
/// use seekwise::video_player::time_units::format_time;
///
/// assert_eq!(format_time(125.9), "02:05");
/// assert_eq!(format_time(3665.0), "01:01:05");
/// ```
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let hours = total_secs / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Converts a millisecond setting into a timer `Duration`.
#[inline]
#[must_use]
pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
