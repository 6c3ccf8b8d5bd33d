// SPDX-License-Identifier: MPL-2.0
//! Media engine port definition.
//!
//! This module defines the [`MediaEngine`] trait, the handle the playback
//! controller drives. Adapters for concrete players implement it.
//!
//! # Design Notes
//!
//! - The engine is **stateful**: it owns the loaded source, position and transport state
//! - [`MediaEngine::seek`] has no documented unit. Some engines take seconds,
//!   some a fraction of the duration; the controller works out which
//! - Reads never fail. Engines that cannot answer report 0, which the
//!   controller treats as "unknown"
//! - Writes return [`EngineResult`] so a failing primitive is an explicit outcome

use crate::domain::error::EngineError;
use crate::domain::video::PlaybackState;
use std::path::Path;

/// Result of a single engine operation.
pub type EngineResult<T = ()> = Result<T, EngineError>;

/// Port for the media engine handle.
///
/// # Lifecycle
///
/// 1. Call `open()` with a local file
/// 2. Drive transport with `set_state()`
/// 3. Move playback with `seek()` or `set_position()`
/// 4. Read `position()` / `duration()` to observe the result
pub trait MediaEngine {
    /// Opens a media file, replacing whatever was loaded before.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the engine cannot open the file.
    fn open(&mut self, path: &Path) -> EngineResult;

    /// Current playback offset in seconds. 0 when unknown.
    fn position(&self) -> f64;

    /// Total length in seconds. 0 until the metadata is available.
    fn duration(&self) -> f64;

    /// Jumps playback. The unit of `value` is engine-specific.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the engine rejects the call.
    fn seek(&mut self, value: f64) -> EngineResult;

    /// Writes the position property directly, in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unsupported`] on engines without a writable position.
    fn set_position(&mut self, seconds: f64) -> EngineResult;

    /// Current transport state.
    fn state(&self) -> PlaybackState;

    /// Changes the transport state.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the transition is refused.
    fn set_state(&mut self, state: PlaybackState) -> EngineResult;

    /// Current volume in `[0, 1]`.
    fn volume(&self) -> f32;

    /// Sets the volume. Callers pass values already clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the engine has no volume control.
    fn set_volume(&mut self, volume: f32) -> EngineResult;
}
