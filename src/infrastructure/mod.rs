//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: the session
//! dispatch queue, the simulated camera, event listeners and the
//! config file store.

pub mod config;
pub mod device;
pub mod dispatch;
pub mod listener;

pub use config::XdgConfigStore;
pub use device::{DeviceCall, FeedConfig, SimulatedCamera, SimulatedCameraConfig};
pub use dispatch::DispatchQueue;
pub use listener::ChannelListener;
