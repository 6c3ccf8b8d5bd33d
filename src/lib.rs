// SPDX-License-Identifier: MPL-2.0
//! `seekwise` is a playback position controller for media engines whose seek
//! primitive does not say what unit it takes.
//!
//! It calibrates the unit with a single probe, performs seeks that are checked
//! against the resulting position, and runs press/drag/release scrubbing with
//! a debounced time preview.

#![doc(html_root_url = "https://docs.rs/seekwise/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod paths;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
