//! Camera recorder: the orchestrating state machine
//!
//! Drives authorization, session configuration and per-frame metadata
//! processing, and publishes every state write and every face batch to a
//! [`RecorderListener`]. All transitions after construction happen on the
//! capture session's serial context, which gives them a total order.

mod state_cell;

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::domain::{
    FaceFilter, MetadataObject, PreviewTarget, Rect, RecorderState, StartAction, StateClass,
};

use super::authorization::{AuthorizationGate, GateDecision};
use super::capture_session::CaptureSession;
use super::metadata_processor::MetadataProcessor;
use super::ports::{
    AuthorizationProvider, CaptureDevice, MetadataSink, RecorderListener, SerialExecutor,
};

use state_cell::StateCell;

/// Recorder tuning
#[derive(Debug, Clone, Copy, Default)]
pub struct RecorderOptions {
    /// Geometric test faces must pass against the preview bounds
    pub face_filter: FaceFilter,
    /// Also bind the default microphone during configuration
    pub capture_audio: bool,
}

/// Camera recorder state machine.
///
/// `start()`, `stop()` and `resize_preview()` can be called from any thread;
/// they only post work to the session context and return immediately.
pub struct CameraRecorder {
    inner: Arc<RecorderInner>,
}

struct RecorderInner {
    state: StateCell,
    gate: AuthorizationGate,
    session: CaptureSession,
    processor: MetadataProcessor,
    preview: Mutex<PreviewTarget>,
    listener: Arc<dyn RecorderListener>,
}

impl CameraRecorder {
    /// Build a recorder and move it straight to `Initialized`.
    ///
    /// `queue` becomes the session context; it is owned by the capture
    /// session from here on.
    pub fn new(
        authorization: Arc<dyn AuthorizationProvider>,
        device: Arc<dyn CaptureDevice>,
        queue: Arc<dyn SerialExecutor>,
        preview: PreviewTarget,
        listener: Arc<dyn RecorderListener>,
        options: RecorderOptions,
    ) -> Self {
        let inner = Arc::new(RecorderInner {
            state: StateCell::new(RecorderState::Created),
            gate: AuthorizationGate::new(authorization),
            session: CaptureSession::new(device, queue, options.capture_audio),
            processor: MetadataProcessor::new(options.face_filter),
            preview: Mutex::new(preview),
            listener,
        });
        inner.transition(RecorderState::Initialized);
        Self { inner }
    }

    /// Advance the lifecycle: check authorization, then configure and start
    /// the capture session. Ignored (with a warning) in states where there
    /// is nothing to start.
    pub fn start(&self) {
        let inner = Arc::clone(&self.inner);
        self.inner
            .session
            .dispatch(Box::new(move || inner.handle_start()));
    }

    /// Tear the session down and move to `Stopped`, from any state.
    pub fn stop(&self) {
        let inner = Arc::clone(&self.inner);
        self.inner
            .session
            .dispatch(Box::new(move || inner.handle_stop()));
    }

    /// Change the preview geometry used to filter faces
    pub fn resize_preview(&self, bounds: Rect) {
        let inner = Arc::clone(&self.inner);
        self.inner.session.dispatch(Box::new(move || {
            inner.preview.lock().bounds = bounds;
            inner.session.resize_preview(bounds);
            tracing::debug!(%bounds, "preview resized");
        }));
    }

    /// Latest committed state
    pub fn state(&self) -> RecorderState {
        self.inner.state.get()
    }

    pub fn state_class(&self) -> StateClass {
        self.inner.state.class()
    }

    /// Number of state writes so far
    pub fn sequence(&self) -> u64 {
        self.inner.state.sequence()
    }

    /// Faces in the last processed batch, `None` until one was measured
    pub fn faces_detected(&self) -> Option<usize> {
        self.inner.state.get().faces_detected()
    }

    pub fn face_filter(&self) -> FaceFilter {
        self.inner.processor.filter()
    }

    pub fn preview(&self) -> PreviewTarget {
        *self.inner.preview.lock()
    }

    /// Block until all work posted so far has run on the session context.
    ///
    /// Authorization prompts complete on the provider's schedule, so a
    /// pending access request may still post work after this returns.
    pub fn wait_idle(&self) {
        self.inner.session.queue().flush();
    }
}

impl RecorderInner {
    /// Commit a state and notify the listener after the write
    fn transition(&self, state: RecorderState) {
        let sequence = self.state.set(state);
        tracing::info!(sequence, %state, "recorder state changed");
        self.listener.on_state_changed(&state);
    }

    /// Commit only when the current class is one of `expected`
    fn transition_from(&self, expected: &[StateClass], state: RecorderState) -> bool {
        match self.state.set_if(expected, state) {
            Some(sequence) => {
                tracing::info!(sequence, %state, "recorder state changed");
                self.listener.on_state_changed(&state);
                true
            }
            None => false,
        }
    }

    fn handle_start(self: &Arc<Self>) {
        let state = self.state.get();
        match state.start_action() {
            StartAction::CheckAuthorization => self.check_authorization(),
            StartAction::Configure => self.prepare(),
            StartAction::Ignore => {
                tracing::warn!(%state, "start() ignored in current state");
            }
        }
    }

    fn check_authorization(self: &Arc<Self>) {
        match self.gate.check_status() {
            GateDecision::Undecided => {
                let recorder = Arc::downgrade(self);
                self.gate
                    .request_access(move |decision| Self::post_access_decision(recorder, decision));
            }
            decision => self.apply_access_decision(decision),
        }
    }

    /// Hop from the provider's thread back onto the session context
    fn post_access_decision(recorder: Weak<Self>, decision: GateDecision) {
        let Some(inner) = recorder.upgrade() else {
            tracing::debug!("recorder dropped before access decision arrived");
            return;
        };
        let target = Arc::clone(&inner);
        inner
            .session
            .dispatch(Box::new(move || target.apply_access_decision(decision)));
    }

    fn apply_access_decision(self: &Arc<Self>, decision: GateDecision) {
        let Some(state) = decision.state() else {
            tracing::info!(state = %self.state.get(), "camera access not granted, state unchanged");
            return;
        };

        let awaiting = [StateClass::Initialized, StateClass::Unauthorized];
        if !self.transition_from(&awaiting, state) {
            tracing::debug!(
                current = %self.state.get(),
                decision = ?decision,
                "stale access decision dropped"
            );
            return;
        }

        if decision == GateDecision::Authorized {
            self.prepare();
        }
    }

    fn prepare(self: &Arc<Self>) {
        if !self.transition_from(&[StateClass::Authorized], RecorderState::Preparing) {
            return;
        }

        let preview = *self.preview.lock();
        let result = self
            .session
            .attach_preview(preview)
            .and_then(|()| self.session.configure(self.metadata_sink()))
            .and_then(|()| self.session.start_session());

        let outcome = match result {
            Ok(()) => RecorderState::recording(),
            Err(kind) => {
                tracing::warn!(error = %kind, "capture session could not be prepared");
                self.session.stop_session();
                RecorderState::failed(kind)
            }
        };
        self.transition_from(&[StateClass::Preparing], outcome);
    }

    /// Sink handed to the device. Holds the recorder weakly so the device
    /// never keeps it alive.
    fn metadata_sink(self: &Arc<Self>) -> MetadataSink {
        let recorder: Weak<Self> = Arc::downgrade(self);
        Arc::new(move |batch: Vec<MetadataObject>| {
            if let Some(inner) = recorder.upgrade() {
                let target = Arc::clone(&inner);
                inner
                    .session
                    .dispatch(Box::new(move || target.handle_batch(batch)));
            }
        })
    }

    fn handle_batch(&self, batch: Vec<MetadataObject>) {
        let state = self.state.get();
        if !state.is_recording() {
            tracing::trace!(%state, size = batch.len(), "metadata batch dropped");
            return;
        }

        let preview = *self.preview.lock();
        let faces = self.processor.process(&batch, &preview, |raw| {
            self.session.transform(raw, &preview)
        });
        tracing::debug!(raw = batch.len(), faces = faces.len(), "metadata batch processed");

        self.listener.on_faces_detected(&faces);

        let count = Some(faces.len());
        if state.faces_detected() != count {
            self.transition_from(
                &[StateClass::Recording],
                RecorderState::Recording {
                    faces_detected: count,
                },
            );
        }
    }

    fn handle_stop(&self) {
        if self.state.class() == StateClass::Stopped {
            self.session.stop_session();
            tracing::debug!("stop() while already stopped");
            return;
        }
        self.transition(RecorderState::Stopping);
        self.session.stop_session();
        self.transition(RecorderState::Stopped);
    }
}
