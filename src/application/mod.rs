//! Application layer - recorder orchestration and port interfaces
//!
//! The recorder state machine lives here together with the pieces it
//! drives. Everything platform specific sits behind the traits in
//! [`ports`].

pub mod authorization;
pub mod capture_session;
pub mod metadata_processor;
pub mod ports;
pub mod recorder;

pub use authorization::{AuthorizationGate, GateDecision};
pub use capture_session::CaptureSession;
pub use metadata_processor::MetadataProcessor;
pub use recorder::{CameraRecorder, RecorderOptions};
