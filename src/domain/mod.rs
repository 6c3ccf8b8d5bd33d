// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core playback types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Engine failure types ([`EngineError`](error::EngineError))
//! - [`video`]: Playback types ([`PlaybackState`](video::PlaybackState),
//!   [`SeekMode`](video::SeekMode), [`SeekStrategy`](video::SeekStrategy),
//!   [`Volume`](video::Volume), [`SeekStep`](video::SeekStep))

pub mod error;
pub mod video;
