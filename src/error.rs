// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Media(MediaError),
}

/// Failures that prevent a playback session from being created.
/// Each one is shown to the user as a dismissable notice.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The catalog entry points at a file that is not on local storage.
    FileMissing(String),

    /// The file exists but the engine refused to open it.
    CouldNotPlay(String),
}

impl MediaError {
    /// Returns the notice key shown to the user for this error.
    pub fn notice_key(&self) -> &'static str {
        match self {
            MediaError::FileMissing(_) => "notice-file-missing",
            MediaError::CouldNotPlay(_) => "notice-could-not-play",
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::FileMissing(path) => write!(f, "File not found: {}", path),
            MediaError::CouldNotPlay(reason) => write!(f, "Could not play video: {}", reason),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
