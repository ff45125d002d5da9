//! Recorder lifecycle domain

mod state;

pub use state::{RecorderState, StartAction, StateClass};
