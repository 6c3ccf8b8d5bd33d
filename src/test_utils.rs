// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and controller driving.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::application::port::MediaEngine;
use crate::video_player::PlaybackController;
use tokio::time::Instant;

/// Default epsilon for f64 comparisons.
/// Suitable for values that should be "exactly equal" but may have minor floating-point errors.
pub const F64_EPSILON: f64 = 1e-10;

/// Fires every controller deadline up to and including `until`, in order.
///
/// Mirrors what the service loop does when it sleeps until the next deadline.
pub fn run_until<E: MediaEngine>(controller: &mut PlaybackController<E>, until: Instant) {
    while let Some(deadline) = controller.next_deadline() {
        if deadline > until {
            break;
        }
        controller.on_deadline(deadline);
    }
}
