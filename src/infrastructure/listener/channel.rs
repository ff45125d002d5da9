//! Listener that forwards recorder events into a tokio channel

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::application::ports::{RecorderEvent, RecorderListener};
use crate::domain::{DetectedFace, RecorderState};

/// Bridges recorder callbacks (session thread) to async consumers.
///
/// Events are sent in the order the recorder emits them. Once the receiver
/// is gone, further events are discarded.
pub struct ChannelListener {
    tx: UnboundedSender<RecorderEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, UnboundedReceiver<RecorderEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: RecorderEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver closed");
        }
    }
}

impl RecorderListener for ChannelListener {
    fn on_state_changed(&self, state: &RecorderState) {
        self.forward(RecorderEvent::StateChanged { state: *state });
    }

    fn on_faces_detected(&self, faces: &[DetectedFace]) {
        self.forward(RecorderEvent::FacesDetected {
            faces: faces.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rect;

    #[test]
    fn forwards_events_in_order() {
        let (listener, mut rx) = ChannelListener::new();
        listener.on_state_changed(&RecorderState::Initialized);
        listener.on_faces_detected(&[DetectedFace::new(Rect::from_size(1.0, 1.0))]);

        assert_eq!(
            rx.try_recv().unwrap(),
            RecorderEvent::StateChanged {
                state: RecorderState::Initialized
            }
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            RecorderEvent::FacesDetected { faces } if faces.len() == 1
        ));
    }

    #[test]
    fn closed_receiver_is_ignored() {
        let (listener, rx) = ChannelListener::new();
        drop(rx);
        listener.on_state_changed(&RecorderState::Stopped);
    }
}
