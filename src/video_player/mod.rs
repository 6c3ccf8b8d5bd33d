// SPDX-License-Identifier: MPL-2.0
//! Playback position control for Seekwise.
//!
//! This module works out, at runtime, whether a media engine's seek primitive
//! takes seconds or a fraction of the duration, and builds reliable seeking
//! and scrubbing on top of that answer.
//!
//! # Components
//!
//! - [`prober`]: one-shot calibration of the seek unit
//! - [`verified_seek`]: seek, wait, check, fall back to the next strategy
//! - [`scrub`]: press/drag/release with a debounced time preview
//! - [`poller`]: periodic sync of labels and the control with the engine
//! - [`controller`]: the state machine tying them together
//! - [`service`]: the Tokio task that drives the controller

pub mod control;
pub mod controller;
pub mod poller;
pub mod prober;
pub mod scrub;
pub mod service;
pub mod session;
pub mod time_units;
pub mod timers;
pub mod tuning;
pub mod verified_seek;
pub mod view;

pub use control::{PointerEvent, PreviewLabel, SliderGeometry, SliderModel};
pub use controller::PlaybackController;
pub use service::{spawn_player, PlayerCommand, PlayerHandle, PlayerService};
pub use session::{MediaItem, PlaybackSession, SeekCalibration};
pub use timers::TimerKind;
pub use tuning::Tuning;
pub use verified_seek::{AttemptOutcome, SeekAttemptPlan, SeekOutcome, SeekReport};
pub use view::{Notice, PlayButton, PlayerView};
