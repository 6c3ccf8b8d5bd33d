// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the controller remains
//! independent of any concrete media engine.
//!
//! # Available Ports
//!
//! - [`engine`]: The media engine handle the controller drives
//!
//! # Design Notes
//!
//! - All traits use domain types only
//! - Methods return `Result` with domain error types
//! - No `async fn`: the controller owns all timing and calls the engine synchronously

pub mod engine;

pub use engine::{EngineResult, MediaEngine};
