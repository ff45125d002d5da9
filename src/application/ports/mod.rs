//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod authorization;
pub mod config;
pub mod device;
pub mod executor;
pub mod listener;

// Re-export common types
pub use authorization::{AccessCallback, AuthorizationProvider};
pub use config::ConfigStore;
pub use device::{
    CaptureDevice, DeviceError, InputHandle, MediaKind, MetadataOutput, MetadataSink,
};
pub use executor::{Job, SerialExecutor};
pub use listener::{NoopListener, RecorderEvent, RecorderListener};
