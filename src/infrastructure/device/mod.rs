//! Capture device adapters

mod simulated;
pub mod synthetic_feed;

pub use simulated::{DeviceCall, SimulatedCamera, SimulatedCameraConfig};
pub use synthetic_feed::FeedConfig;
