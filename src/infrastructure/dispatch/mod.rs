//! Session context executors

mod serial_queue;

pub use serial_queue::DispatchQueue;
