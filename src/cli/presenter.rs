//! CLI presenter for output formatting

use std::time::Duration as StdDuration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::RecorderEvent;
use crate::domain::{DetectedFace, ErrorKind, RecorderState};

/// How the face count should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// No face in view
    Neutral,
    /// Exactly one face
    Positive,
    /// More than one face
    Warning,
}

impl Indicator {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => Self::Neutral,
            1 => Self::Positive,
            _ => Self::Warning,
        }
    }
}

/// Presenter for CLI output formatting.
///
/// Status goes to stderr; face data (or JSON events) goes to stdout.
pub struct Presenter {
    json: bool,
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            json: false,
            spinner: None,
        }
    }

    /// Presenter that emits one JSON object per recorder event
    pub fn json() -> Self {
        Self {
            json: true,
            spinner: None,
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        if self.json {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(StdDuration::from_millis(80));
        self.spinner = Some(spinner);
    }

    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        self.suspend(|| println!("{}", text));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Render one recorder event
    pub fn event(&mut self, event: &RecorderEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(err) => tracing::warn!(error = %err, "event could not be encoded"),
            }
            return;
        }

        match event {
            RecorderEvent::StateChanged { state } => self.state_changed(state),
            RecorderEvent::FacesDetected { faces } => {
                self.update_spinner(&format!(
                    "Recording... {} {}",
                    format_indicator(faces.len()),
                    describe_faces(faces).dimmed()
                ));
            }
        }
    }

    fn state_changed(&mut self, state: &RecorderState) {
        match state {
            RecorderState::Preparing => self.info("Configuring capture session"),
            RecorderState::Recording { faces_detected } => {
                match faces_detected {
                    None => {
                        self.success("Recording");
                        self.start_spinner("Recording... waiting for faces");
                    }
                    Some(count) => self.output(&format_face_line(*count)),
                }
            }
            RecorderState::Unauthorized => {
                self.error("Camera access is denied or restricted");
            }
            RecorderState::Failed { error } => {
                self.stop_spinner();
                self.error(&failure_message(*error));
            }
            RecorderState::Stopped => {
                self.stop_spinner();
                self.success("Stopped");
            }
            other => tracing::debug!(state = %other, "state not presented"),
        }
    }

    /// Run `print` without tearing the spinner line
    fn suspend<F: FnOnce()>(&self, print: F) {
        match self.spinner {
            Some(ref spinner) => spinner.suspend(print),
            None => print(),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Short colored face count
pub fn format_indicator(count: usize) -> String {
    let label = match count {
        1 => "1 face".to_string(),
        n => format!("{} faces", n),
    };
    match Indicator::for_count(count) {
        Indicator::Neutral => format!("{} {}", "○".dimmed(), label.dimmed()),
        Indicator::Positive => format!("{} {}", "●".green(), label.green()),
        Indicator::Warning => format!("{} {}", "●".yellow(), label.yellow()),
    }
}

/// Line written to stdout whenever the face count changes
pub fn format_face_line(count: usize) -> String {
    format!("faces: {}", format_indicator(count))
}

pub fn describe_faces(faces: &[DetectedFace]) -> String {
    faces
        .iter()
        .map(|f| f.bounds.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn failure_message(error: ErrorKind) -> String {
    format!("Recording failed: {}", error)
}
