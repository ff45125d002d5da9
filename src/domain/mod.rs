//! Domain layer - Core business logic
//!
//! Contains value objects, the recorder state machine, and domain errors.
//! This layer has no dependencies on external systems.

pub mod authorization;
pub mod config;
pub mod duration;
pub mod error;
pub mod geometry;
pub mod metadata;
pub mod preview;
pub mod recorder;

// Re-export common types
pub use authorization::AuthorizationStatus;
pub use config::AppConfig;
pub use duration::Duration;
pub use error::*;
pub use geometry::Rect;
pub use metadata::{DetectedFace, FaceFilter, MetadataKind, MetadataObject};
pub use preview::{PreviewId, PreviewTarget};
pub use recorder::{RecorderState, StartAction, StateClass};
