//! Capture device port interfaces

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{ErrorKind, MetadataObject, PreviewTarget, Rect};

/// Device layer errors
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("Failed to open device '{device}': {reason}")]
    OpenFailed { device: String, reason: String },
}

/// A camera that exists but cannot be opened fails configuration
impl From<DeviceError> for ErrorKind {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::OpenFailed { .. } => ErrorKind::ConfigurationFailed,
        }
    }
}

/// Media carried by a device input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
}

/// An opened device ready to be bound as a session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHandle {
    pub id: u64,
    pub label: String,
    pub media: MediaKind,
}

impl InputHandle {
    pub fn new(id: u64, label: impl Into<String>, media: MediaKind) -> Self {
        Self {
            id,
            label: label.into(),
            media,
        }
    }
}

/// Metadata output created by the core for one configuration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetadataOutput {
    pub id: u64,
}

impl MetadataOutput {
    /// Allocate an output with a process-unique id
    pub fn allocate() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// Receives one metadata batch per captured frame.
/// Called by the device on its own capture thread.
pub type MetadataSink = Arc<dyn Fn(Vec<MetadataObject>) + Send + Sync + 'static>;

/// Port for the camera device layer.
///
/// Mutating methods are only ever called from the session context, so
/// implementations do not need to order them against each other.
pub trait CaptureDevice: Send + Sync {
    /// Open a configuration transaction. Changes made until
    /// [`commit_configuration`](Self::commit_configuration) are applied atomically.
    fn begin_configuration(&self);

    /// Apply everything since [`begin_configuration`](Self::begin_configuration)
    fn commit_configuration(&self);

    /// Open the default front-facing camera.
    ///
    /// # Returns
    /// `Ok(None)` when no such camera exists, `Err` when it exists but
    /// cannot be turned into an input
    fn open_default_front_camera(&self) -> Result<Option<InputHandle>, DeviceError>;

    /// Open the default microphone, with the same contract as the camera
    fn open_default_microphone(&self) -> Result<Option<InputHandle>, DeviceError>;

    /// Bind an input to the session. Returns `false` if the session rejects it.
    fn attach_input(&self, input: &InputHandle) -> bool;

    /// Bind a metadata output to the session. Returns `false` if rejected.
    fn attach_metadata_output(&self, output: &MetadataOutput) -> bool;

    /// Whether the attached output can deliver face metadata
    fn supports_face_metadata(&self, output: &MetadataOutput) -> bool;

    /// Limit delivered metadata types to faces
    fn restrict_metadata_to_faces(&self, output: &MetadataOutput);

    /// Install the receiver for metadata batches
    fn set_metadata_sink(&self, output: &MetadataOutput, sink: MetadataSink);

    /// Bind the preview surface the video is rendered into
    fn attach_preview(&self, preview: &PreviewTarget);

    /// Detach every input, output and sink from the session
    fn remove_all(&self);

    /// Start frame delivery
    fn start_running(&self);

    /// Stop frame delivery. Must be safe to call when not running.
    fn stop_running(&self);

    /// Map device-space bounds into the preview's coordinate space.
    /// Returns [`Rect::ZERO`] when no sensible mapping exists.
    fn transform(&self, raw: Rect, preview: &PreviewTarget) -> Rect;
}
