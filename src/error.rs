//! Error types
//!
//! Losing a run is not an error: it is a world state transition. These cover
//! configuration mistakes and I/O at the simulation boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the world registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("world not found: {0}")]
    WorldNotFound(String),
    #[error("no active world")]
    NoActiveWorld,
}

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// A failed read of the external openness signal (never fatal)
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal source I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed sample on line {line}: {text:?}")]
    Malformed { line: usize, text: String },
}
