// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains playback-related value objects and enums that are
//! independent of any presentation or infrastructure concerns.

pub mod newtypes;
pub mod playback;
pub mod seek;

// Re-export commonly used types
pub use newtypes::{sanitize_secs, SeekStep, Volume};
pub use playback::PlaybackState;
pub use seek::{SeekMode, SeekStrategy, VerifyTolerance};
