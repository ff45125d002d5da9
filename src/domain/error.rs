//! Domain error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reasons a recorder can end up in.
///
/// Carried by [`RecorderState::Failed`](crate::domain::RecorderState::Failed)
/// and returned by capture session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("Capture session is already running")]
    AlreadyRunning,

    #[error("Capture session has not been configured")]
    SessionMissing,

    #[error("Capture session rejected the device input")]
    InputsAreInvalid,

    #[error("Operation is not valid in the current session state")]
    InvalidOperation,

    #[error("No front-facing camera available")]
    NoCamerasAvailable,

    #[error("No microphone available")]
    NoAudioAvailable,

    #[error("Capture session configuration failed")]
    ConfigurationFailed,

    #[error("Camera access has not been authorized")]
    NotAuthorized,

    #[error("Face metadata is not supported by this device")]
    UndefinedError,

    #[error("Unknown capture error")]
    Unknown,
}

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected minutes, seconds and milliseconds in that order (e.g., 30s, 1m, 2m30s, 500ms)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unknown face filter name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid face filter: \"{input}\". Valid filters are: contain, intersect")]
pub struct InvalidFaceFilterError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_messages() {
        assert!(ErrorKind::NoCamerasAvailable.to_string().contains("camera"));
        assert!(ErrorKind::AlreadyRunning.to_string().contains("already running"));
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ConfigurationFailed).unwrap();
        assert_eq!(json, "\"configuration_failed\"");
    }
}
