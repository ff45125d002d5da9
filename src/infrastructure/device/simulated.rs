//! In-process camera used by the CLI and the tests
//!
//! Implements both the authorization and the device ports. Every failure
//! mode of the real hardware can be switched on through
//! [`SimulatedCameraConfig`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::application::ports::{
    AccessCallback, AuthorizationProvider, CaptureDevice, DeviceError, InputHandle, MediaKind,
    MetadataOutput, MetadataSink,
};
use crate::domain::{AuthorizationStatus, MetadataObject, PreviewId, PreviewTarget, Rect};

use super::synthetic_feed::{FeedConfig, FeedHandle};

/// Behaviour switches for [`SimulatedCamera`]
#[derive(Debug, Clone)]
pub struct SimulatedCameraConfig {
    /// Status reported before any access request
    pub authorization: AuthorizationStatus,
    /// Answer given to the access prompt
    pub grant_on_request: bool,
    pub has_front_camera: bool,
    /// `false` makes opening the front camera fail
    pub camera_opens: bool,
    pub accepts_input: bool,
    pub accepts_output: bool,
    pub supports_faces: bool,
    pub has_microphone: bool,
    /// Generate frames while running; `None` means batches only arrive
    /// through [`SimulatedCamera::deliver`]
    pub feed: Option<FeedConfig>,
}

impl Default for SimulatedCameraConfig {
    fn default() -> Self {
        Self {
            authorization: AuthorizationStatus::Granted,
            grant_on_request: true,
            has_front_camera: true,
            camera_opens: true,
            accepts_input: true,
            accepts_output: true,
            supports_faces: true,
            has_microphone: true,
            feed: None,
        }
    }
}

/// Device operations as observed by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    BeginConfiguration,
    CommitConfiguration,
    AttachInput(MediaKind),
    AttachMetadataOutput,
    RestrictToFaces,
    AttachPreview(PreviewId),
    RemoveAll,
    StartRunning,
    StopRunning,
}

pub struct SimulatedCamera {
    config: SimulatedCameraConfig,
    status: Mutex<AuthorizationStatus>,
    prompts: Mutex<Vec<JoinHandle<()>>>,
    sink: Mutex<Option<MetadataSink>>,
    /// Last sink ever installed; survives `remove_all`
    retired_sink: Mutex<Option<MetadataSink>>,
    feed: Mutex<Option<FeedHandle>>,
    running: AtomicBool,
    next_input: AtomicU64,
    calls: Mutex<Vec<DeviceCall>>,
}

impl SimulatedCamera {
    pub fn new(config: SimulatedCameraConfig) -> Self {
        Self {
            status: Mutex::new(config.authorization),
            config,
            prompts: Mutex::new(Vec::new()),
            sink: Mutex::new(None),
            retired_sink: Mutex::new(None),
            feed: Mutex::new(None),
            running: AtomicBool::new(false),
            next_input: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Change the reported authorization status
    pub fn set_authorization(&self, status: AuthorizationStatus) {
        *self.status.lock() = status;
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn has_sink(&self) -> bool {
        self.sink.lock().is_some()
    }

    /// Every device call so far, in order
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: DeviceCall) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    /// Push one batch through the installed sink as a running camera would.
    /// Returns `false` if nothing was delivered.
    pub fn deliver(&self, batch: Vec<MetadataObject>) -> bool {
        if !self.is_running() {
            return false;
        }
        let sink = self.sink.lock().clone();
        match sink {
            Some(sink) => {
                sink(batch);
                true
            }
            None => false,
        }
    }

    /// Push a batch through the most recent sink even after it was removed,
    /// like a frame callback that was already in flight during teardown.
    pub fn deliver_stale(&self, batch: Vec<MetadataObject>) -> bool {
        let sink = self
            .sink
            .lock()
            .clone()
            .or_else(|| self.retired_sink.lock().clone());
        match sink {
            Some(sink) => {
                sink(batch);
                true
            }
            None => false,
        }
    }

    /// Wait for outstanding access prompts to complete
    pub fn wait_for_prompts(&self) {
        let prompts: Vec<_> = self.prompts.lock().drain(..).collect();
        for prompt in prompts {
            let _ = prompt.join();
        }
    }

    fn record(&self, call: DeviceCall) {
        self.calls.lock().push(call);
    }

    fn open(&self, label: &str, media: MediaKind) -> InputHandle {
        InputHandle::new(self.next_input.fetch_add(1, Ordering::Relaxed), label, media)
    }
}

impl AuthorizationProvider for SimulatedCamera {
    fn status(&self) -> AuthorizationStatus {
        *self.status.lock()
    }

    fn request_access(&self, completion: AccessCallback) {
        let granted = self.config.grant_on_request;
        if granted {
            *self.status.lock() = AuthorizationStatus::Granted;
        } else {
            *self.status.lock() = AuthorizationStatus::Denied;
        }
        tracing::debug!(granted, "simulated access prompt answered");

        // the answer arrives on a thread of its own, like a system dialog
        match thread::Builder::new()
            .name("access-prompt".into())
            .spawn(move || completion(granted))
        {
            Ok(prompt) => self.prompts.lock().push(prompt),
            Err(err) => tracing::error!(error = %err, "could not spawn access prompt"),
        }
    }
}

impl CaptureDevice for SimulatedCamera {
    fn begin_configuration(&self) {
        self.record(DeviceCall::BeginConfiguration);
    }

    fn commit_configuration(&self) {
        self.record(DeviceCall::CommitConfiguration);
    }

    fn open_default_front_camera(&self) -> Result<Option<InputHandle>, DeviceError> {
        if !self.config.has_front_camera {
            return Ok(None);
        }
        if !self.config.camera_opens {
            return Err(DeviceError::OpenFailed {
                device: "front camera".into(),
                reason: "device busy".into(),
            });
        }
        Ok(Some(self.open("Simulated front camera", MediaKind::Video)))
    }

    fn open_default_microphone(&self) -> Result<Option<InputHandle>, DeviceError> {
        if !self.config.has_microphone {
            return Ok(None);
        }
        Ok(Some(self.open("Simulated microphone", MediaKind::Audio)))
    }

    fn attach_input(&self, input: &InputHandle) -> bool {
        self.record(DeviceCall::AttachInput(input.media));
        self.config.accepts_input
    }

    fn attach_metadata_output(&self, _output: &MetadataOutput) -> bool {
        self.record(DeviceCall::AttachMetadataOutput);
        self.config.accepts_output
    }

    fn supports_face_metadata(&self, _output: &MetadataOutput) -> bool {
        self.config.supports_faces
    }

    fn restrict_metadata_to_faces(&self, _output: &MetadataOutput) {
        // batches still carry every kind; filtering happens downstream
        self.record(DeviceCall::RestrictToFaces);
    }

    fn set_metadata_sink(&self, _output: &MetadataOutput, sink: MetadataSink) {
        *self.retired_sink.lock() = Some(sink.clone());
        *self.sink.lock() = Some(sink);
    }

    fn attach_preview(&self, preview: &PreviewTarget) {
        self.record(DeviceCall::AttachPreview(preview.id));
    }

    fn remove_all(&self) {
        self.record(DeviceCall::RemoveAll);
        self.sink.lock().take();
    }

    fn start_running(&self) {
        self.record(DeviceCall::StartRunning);
        self.running.store(true, Ordering::SeqCst);

        let (Some(feed), Some(sink)) = (self.config.feed, self.sink.lock().clone()) else {
            return;
        };
        match FeedHandle::spawn(feed, sink) {
            Ok(handle) => *self.feed.lock() = Some(handle),
            Err(err) => tracing::error!(error = %err, "could not start synthetic feed"),
        }
    }

    fn stop_running(&self) {
        self.record(DeviceCall::StopRunning);
        self.running.store(false, Ordering::SeqCst);
        let feed = self.feed.lock().take();
        drop(feed);
    }

    fn transform(&self, raw: Rect, preview: &PreviewTarget) -> Rect {
        if raw.is_empty() {
            return Rect::ZERO;
        }
        let unit = if preview.mirrored {
            raw.mirrored_unit()
        } else {
            raw
        };
        let mapped = unit.denormalize(&preview.bounds);
        if [mapped.x, mapped.y, mapped.width, mapped.height]
            .iter()
            .all(|v| v.is_finite())
        {
            mapped
        } else {
            Rect::ZERO
        }
    }
}

impl Drop for SimulatedCamera {
    fn drop(&mut self) {
        self.feed.lock().take();
    }
}
