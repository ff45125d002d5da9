//! Outbound recorder notifications

use serde::Serialize;

use crate::domain::{DetectedFace, RecorderState};

/// Everything a recorder publishes, in publication order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RecorderEvent {
    StateChanged { state: RecorderState },
    FacesDetected { faces: Vec<DetectedFace> },
}

/// Port for whoever consumes recorder output (UI, CLI, tests).
///
/// Both methods are called on the session context, right after the
/// corresponding write. Implementations must not block and should hand
/// the data over to their own thread if they need one.
pub trait RecorderListener: Send + Sync {
    fn on_state_changed(&self, state: &RecorderState);

    fn on_faces_detected(&self, faces: &[DetectedFace]);
}

/// Listener that drops everything
pub struct NoopListener;

impl RecorderListener for NoopListener {
    fn on_state_changed(&self, _state: &RecorderState) {}

    fn on_faces_detected(&self, _faces: &[DetectedFace]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let event = RecorderEvent::StateChanged {
            state: RecorderState::Stopped,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"state_changed","state":{"state":"stopped"}}"#);
    }
}
