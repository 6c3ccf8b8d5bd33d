// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: In-memory media engine with a configurable seek unit
//!   (implements [`MediaEngine`])
//!
//! [`MediaEngine`]: crate::application::port::MediaEngine

pub mod simulated;

pub use simulated::{EngineCall, SeekUnit, SimulatedEngine};
