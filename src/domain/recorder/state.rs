//! Recorder lifecycle state machine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::ErrorKind;

/// Recorder lifecycle states.
///
/// Full equality is structural. Transition guards compare
/// [`StateClass`] instead, so any two `Recording` values (or any two
/// `Failed` values) count as the same state there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecorderState {
    #[default]
    Created,
    Initialized,
    Unauthorized,
    Authorized,
    Preparing,
    /// `faces_detected` is `None` until the first metadata batch is measured.
    Recording { faces_detected: Option<usize> },
    Stopping,
    Stopped,
    Failed { error: ErrorKind },
}

/// Variant tag of a [`RecorderState`], ignoring its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    Created,
    Initialized,
    Unauthorized,
    Authorized,
    Preparing,
    Recording,
    Stopping,
    Stopped,
    Failed,
}

/// What `start()` does from a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    /// Query (and possibly request) camera authorization
    CheckAuthorization,
    /// Attach the preview and configure the capture session
    Configure,
    /// Nothing to do; the call is logged and dropped
    Ignore,
}

impl RecorderState {
    /// Fresh recording state before any metadata batch arrived
    pub const fn recording() -> Self {
        Self::Recording {
            faces_detected: None,
        }
    }

    pub const fn failed(error: ErrorKind) -> Self {
        Self::Failed { error }
    }

    pub const fn class(&self) -> StateClass {
        match self {
            Self::Created => StateClass::Created,
            Self::Initialized => StateClass::Initialized,
            Self::Unauthorized => StateClass::Unauthorized,
            Self::Authorized => StateClass::Authorized,
            Self::Preparing => StateClass::Preparing,
            Self::Recording { .. } => StateClass::Recording,
            Self::Stopping => StateClass::Stopping,
            Self::Stopped => StateClass::Stopped,
            Self::Failed { .. } => StateClass::Failed,
        }
    }

    /// Compare variant tags only
    pub fn same_class(&self, other: &RecorderState) -> bool {
        self.class() == other.class()
    }

    pub fn is_recording(&self) -> bool {
        self.class() == StateClass::Recording
    }

    /// `Stopped` and `Failed` end the recorder's useful life.
    pub fn is_terminal(&self) -> bool {
        matches!(self.class(), StateClass::Stopped | StateClass::Failed)
    }

    pub fn faces_detected(&self) -> Option<usize> {
        match self {
            Self::Recording { faces_detected } => *faces_detected,
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            Self::Failed { error } => Some(*error),
            _ => None,
        }
    }

    /// Transition guard for `start()`
    pub fn start_action(&self) -> StartAction {
        match self.class() {
            StateClass::Initialized | StateClass::Unauthorized => StartAction::CheckAuthorization,
            StateClass::Authorized => StartAction::Configure,
            StateClass::Created
            | StateClass::Preparing
            | StateClass::Recording
            | StateClass::Stopping
            | StateClass::Stopped
            | StateClass::Failed => StartAction::Ignore,
        }
    }
}

impl StateClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Initialized => "initialized",
            Self::Unauthorized => "unauthorized",
            Self::Authorized => "authorized",
            Self::Preparing => "preparing",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recording {
                faces_detected: Some(count),
            } => write!(f, "recording ({} faces)", count),
            Self::Failed { error } => write!(f, "failed: {}", error),
            other => write!(f, "{}", other.class()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_created() {
        assert_eq!(RecorderState::default(), RecorderState::Created);
    }

    #[test]
    fn recording_states_share_a_class() {
        let unmeasured = RecorderState::recording();
        let measured = RecorderState::Recording {
            faces_detected: Some(3),
        };
        assert_ne!(unmeasured, measured);
        assert!(unmeasured.same_class(&measured));
    }

    #[test]
    fn failed_states_share_a_class() {
        let a = RecorderState::failed(ErrorKind::NoCamerasAvailable);
        let b = RecorderState::failed(ErrorKind::UndefinedError);
        assert_ne!(a, b);
        assert!(a.same_class(&b));
    }

    #[test]
    fn start_checks_authorization_when_initialized_or_unauthorized() {
        assert_eq!(
            RecorderState::Initialized.start_action(),
            StartAction::CheckAuthorization
        );
        assert_eq!(
            RecorderState::Unauthorized.start_action(),
            StartAction::CheckAuthorization
        );
    }

    #[test]
    fn start_configures_when_authorized() {
        assert_eq!(
            RecorderState::Authorized.start_action(),
            StartAction::Configure
        );
    }

    #[test]
    fn start_is_ignored_elsewhere() {
        let ignored = [
            RecorderState::Created,
            RecorderState::Preparing,
            RecorderState::recording(),
            RecorderState::Stopping,
            RecorderState::Stopped,
            RecorderState::failed(ErrorKind::Unknown),
        ];
        for state in ignored {
            assert_eq!(state.start_action(), StartAction::Ignore, "{}", state);
        }
    }

    #[test]
    fn terminal_states() {
        assert!(RecorderState::Stopped.is_terminal());
        assert!(RecorderState::failed(ErrorKind::Unknown).is_terminal());
        assert!(!RecorderState::recording().is_terminal());
    }

    #[test]
    fn payload_accessors() {
        let state = RecorderState::Recording {
            faces_detected: Some(2),
        };
        assert_eq!(state.faces_detected(), Some(2));
        assert_eq!(RecorderState::recording().faces_detected(), None);
        assert_eq!(
            RecorderState::failed(ErrorKind::InputsAreInvalid).error(),
            Some(ErrorKind::InputsAreInvalid)
        );
    }

    #[test]
    fn state_display() {
        assert_eq!(RecorderState::Initialized.to_string(), "initialized");
        assert_eq!(RecorderState::recording().to_string(), "recording");
        assert_eq!(
            RecorderState::Recording {
                faces_detected: Some(1)
            }
            .to_string(),
            "recording (1 faces)"
        );
        assert!(RecorderState::failed(ErrorKind::NoCamerasAvailable)
            .to_string()
            .starts_with("failed"));
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_string(&RecorderState::failed(ErrorKind::Unknown)).unwrap();
        assert_eq!(json, r#"{"state":"failed","error":"unknown"}"#);
    }
}
