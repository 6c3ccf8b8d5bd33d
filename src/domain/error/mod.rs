// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! Errors raised by a media engine primitive. The controller treats every one
//! of them as a failed step and moves on; none of them reach the user.

use std::fmt;

/// Failure of a single media engine operation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine does not implement this operation.
    Unsupported(&'static str),

    /// The engine has no media loaded.
    NotLoaded,

    /// The engine could not open the given source.
    OpenFailed(String),

    /// The engine rejected the call (bad argument, transient failure).
    Rejected(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Unsupported(op) => write!(f, "operation not supported: {}", op),
            EngineError::NotLoaded => write!(f, "no media loaded"),
            EngineError::OpenFailed(msg) => write!(f, "open failed: {}", msg),
            EngineError::Rejected(msg) => write!(f, "rejected: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
