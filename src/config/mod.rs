// SPDX-License-Identifier: MPL-2.0
//! This module handles the controller's configuration, loading and saving
//! tuning values to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[timing]` - Poll period, calibration delay, settle delay, preview debounce
//! - `[tolerance]` - Probe and verification thresholds
//! - `[playback]` - Rewind/forward step and volume
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `SEEKWISE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use seekwise::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.playback.seek_step_secs = Some(5.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Timer settings, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Status poller period.
    #[serde(
        default = "default_poll_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub poll_interval_ms: Option<u64>,

    /// Delay between load and seek-mode calibration.
    #[serde(
        default = "default_calibration_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub calibration_delay_ms: Option<u64>,

    /// Wait after a seek before the position is sampled.
    #[serde(
        default = "default_settle_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub settle_delay_ms: Option<u64>,

    /// Quiet period before the scrub preview appears.
    #[serde(
        default = "default_preview_debounce_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_debounce_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            calibration_delay_ms: default_calibration_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            preview_debounce_ms: default_preview_debounce_ms(),
        }
    }
}

/// Seek classification and verification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToleranceConfig {
    /// Duration change (seconds) treated as a new media source.
    #[serde(
        default = "default_duration_change_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_change_secs: Option<f64>,

    /// Lower bound of the verification tolerance (seconds).
    #[serde(
        default = "default_verify_min_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub verify_min_secs: Option<f64>,

    /// Verification tolerance as a ratio of the duration.
    #[serde(
        default = "default_verify_ratio",
        skip_serializing_if = "Option::is_none"
    )]
    pub verify_ratio: Option<f64>,

    /// Duration assumed for the tolerance when the real one is unknown.
    #[serde(
        default = "default_unknown_duration_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub unknown_duration_secs: Option<f64>,

    /// Value passed to the seek primitive by the calibration probe.
    #[serde(
        default = "default_probe_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub probe_value: Option<f64>,

    /// Absolute tolerance for the seconds branch of the probe.
    #[serde(
        default = "default_probe_seconds_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub probe_seconds_secs: Option<f64>,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            duration_change_secs: default_duration_change_secs(),
            verify_min_secs: default_verify_min_secs(),
            verify_ratio: default_verify_ratio(),
            unknown_duration_secs: default_unknown_duration_secs(),
            probe_value: default_probe_value(),
            probe_seconds_secs: default_probe_seconds_secs(),
        }
    }
}

/// Playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Rewind/forward step in seconds.
    #[serde(
        default = "default_seek_step_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub seek_step_secs: Option<f64>,

    /// Engine volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step_secs(),
            volume: default_volume(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Controller configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Timer settings.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Seek thresholds.
    #[serde(default)]
    pub tolerance: ToleranceConfig,

    /// Playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_poll_interval_ms() -> Option<u64> {
    Some(DEFAULT_POLL_INTERVAL_MS)
}

fn default_calibration_delay_ms() -> Option<u64> {
    Some(DEFAULT_CALIBRATION_DELAY_MS)
}

fn default_settle_delay_ms() -> Option<u64> {
    Some(DEFAULT_SETTLE_DELAY_MS)
}

fn default_preview_debounce_ms() -> Option<u64> {
    Some(DEFAULT_PREVIEW_DEBOUNCE_MS)
}

fn default_duration_change_secs() -> Option<f64> {
    Some(DEFAULT_DURATION_CHANGE_SECS)
}

fn default_verify_min_secs() -> Option<f64> {
    Some(DEFAULT_VERIFY_MIN_SECS)
}

fn default_verify_ratio() -> Option<f64> {
    Some(DEFAULT_VERIFY_RATIO)
}

fn default_unknown_duration_secs() -> Option<f64> {
    Some(DEFAULT_UNKNOWN_DURATION_SECS)
}

fn default_probe_value() -> Option<f64> {
    Some(DEFAULT_PROBE_VALUE)
}

fn default_probe_seconds_secs() -> Option<f64> {
    Some(DEFAULT_PROBE_SECONDS_SECS)
}

fn default_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_SEEK_STEP_SECS)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("ignoring {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
