//! Capture session: owns the device input/output graph

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{ErrorKind, PreviewTarget, Rect};

use super::ports::{
    CaptureDevice, InputHandle, Job, MetadataOutput, MetadataSink, SerialExecutor,
};

/// Bindings created by one successful configuration attempt
#[derive(Debug)]
struct SessionGraph {
    video_input: InputHandle,
    audio_input: Option<InputHandle>,
    metadata_output: MetadataOutput,
}

/// Owns the device pipeline and the session context it is mutated on.
///
/// Everything except [`dispatch`](Self::dispatch) and the read accessors
/// must be called from the session context.
pub struct CaptureSession {
    device: Arc<dyn CaptureDevice>,
    queue: Arc<dyn SerialExecutor>,
    graph: Mutex<Option<SessionGraph>>,
    preview: Mutex<Option<PreviewTarget>>,
    running: AtomicBool,
    capture_audio: bool,
}

impl CaptureSession {
    pub fn new(
        device: Arc<dyn CaptureDevice>,
        queue: Arc<dyn SerialExecutor>,
        capture_audio: bool,
    ) -> Self {
        Self {
            device,
            queue,
            graph: Mutex::new(None),
            preview: Mutex::new(None),
            running: AtomicBool::new(false),
            capture_audio,
        }
    }

    /// Post work onto the session context
    pub fn dispatch(&self, job: Job) {
        self.queue.dispatch(job);
    }

    pub fn queue(&self) -> &Arc<dyn SerialExecutor> {
        &self.queue
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_configured(&self) -> bool {
        self.graph.lock().is_some()
    }

    pub fn preview(&self) -> Option<PreviewTarget> {
        *self.preview.lock()
    }

    /// Bind the preview surface. Re-attaching the same target is a no-op.
    pub fn attach_preview(&self, target: PreviewTarget) -> Result<(), ErrorKind> {
        let mut current = self.preview.lock();
        if current.as_ref() == Some(&target) {
            return Ok(());
        }
        if self.is_running() {
            tracing::warn!(preview = target.id.0, "cannot attach preview while running");
            return Err(ErrorKind::InvalidOperation);
        }
        self.device.attach_preview(&target);
        *current = Some(target);
        tracing::debug!(preview = target.id.0, "preview attached");
        Ok(())
    }

    /// Update the geometry of the attached preview, keeping the binding.
    pub fn resize_preview(&self, bounds: Rect) -> Option<PreviewTarget> {
        let mut current = self.preview.lock();
        let resized = current.map(|p| p.with_bounds(bounds));
        *current = resized;
        resized
    }

    /// Build a fresh input/output graph.
    ///
    /// Any previous graph is torn down first. All steps run inside one
    /// configuration transaction; a failure leaves no graph behind.
    pub fn configure(&self, sink: MetadataSink) -> Result<(), ErrorKind> {
        self.teardown();

        self.device.begin_configuration();
        let result = self.build_graph(sink);
        self.device.commit_configuration();

        match result {
            Ok(graph) => {
                tracing::info!(
                    video = %graph.video_input.label,
                    audio = graph.audio_input.is_some(),
                    output = graph.metadata_output.id,
                    "capture session configured"
                );
                *self.graph.lock() = Some(graph);
                Ok(())
            }
            Err(kind) => {
                tracing::warn!(error = %kind, "capture session configuration failed");
                self.device.remove_all();
                Err(kind)
            }
        }
    }

    fn build_graph(&self, sink: MetadataSink) -> Result<SessionGraph, ErrorKind> {
        let video_input = self
            .device
            .open_default_front_camera()
            .map_err(|err| {
                tracing::warn!(error = %err, "front camera could not be opened");
                ErrorKind::from(err)
            })?
            .ok_or(ErrorKind::NoCamerasAvailable)?;

        if !self.device.attach_input(&video_input) {
            return Err(ErrorKind::InputsAreInvalid);
        }

        let audio_input = if self.capture_audio {
            let microphone = self
                .device
                .open_default_microphone()
                .map_err(|err| {
                    tracing::warn!(error = %err, "microphone could not be opened");
                    ErrorKind::NoAudioAvailable
                })?
                .ok_or(ErrorKind::NoAudioAvailable)?;
            if !self.device.attach_input(&microphone) {
                return Err(ErrorKind::InputsAreInvalid);
            }
            Some(microphone)
        } else {
            None
        };

        let metadata_output = MetadataOutput::allocate();
        if !self.device.attach_metadata_output(&metadata_output) {
            return Err(ErrorKind::ConfigurationFailed);
        }

        if !self.device.supports_face_metadata(&metadata_output) {
            return Err(ErrorKind::UndefinedError);
        }
        self.device.restrict_metadata_to_faces(&metadata_output);
        self.device.set_metadata_sink(&metadata_output, sink);

        Ok(SessionGraph {
            video_input,
            audio_input,
            metadata_output,
        })
    }

    /// Begin frame delivery for the configured graph.
    pub fn start_session(&self) -> Result<(), ErrorKind> {
        if !self.is_configured() {
            return Err(ErrorKind::SessionMissing);
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ErrorKind::AlreadyRunning);
        }
        self.device.start_running();
        tracing::info!("capture session running");
        Ok(())
    }

    /// Stop delivery and drop the graph. Safe in any state, idempotent.
    pub fn stop_session(&self) {
        self.teardown();
    }

    /// Map device-space bounds into the given preview
    pub fn transform(&self, raw: Rect, preview: &PreviewTarget) -> Rect {
        self.device.transform(raw, preview)
    }

    fn teardown(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.device.stop_running();
            tracing::info!("capture session stopped");
        }
        if self.graph.lock().take().is_some() {
            self.device.remove_all();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
