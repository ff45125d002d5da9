//! CLI layer - Command-line interface
//!
//! Argument parsing, logging setup, output formatting and the capture
//! session runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_capture, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{CaptureOptions, Cli, Commands, ConfigAction, SimulationArgs};
pub use presenter::Presenter;
