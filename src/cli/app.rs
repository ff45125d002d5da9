//! Capture session runner

use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::application::ports::{ConfigStore, RecorderEvent};
use crate::application::{CameraRecorder, RecorderOptions};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::{PreviewTarget, RecorderState, StateClass};
use crate::infrastructure::{ChannelListener, DispatchQueue, SimulatedCamera};

use super::args::CaptureOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

const PREVIEW_ID: u32 = 1;

/// Why the event loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Elapsed,
    Interrupted,
    Terminal,
}

/// Run one capture session until the duration elapses, the recorder
/// reaches a dead end, or Ctrl-C arrives.
pub async fn run_capture(options: CaptureOptions) -> ExitCode {
    let mut presenter = if options.json {
        Presenter::json()
    } else {
        Presenter::new()
    };

    let queue = match DispatchQueue::new("capture-session") {
        Ok(queue) => Arc::new(queue),
        Err(e) => {
            presenter.error(&format!("Failed to start session context: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let camera = Arc::new(SimulatedCamera::new(options.camera.clone()));
    let (listener, mut events) = ChannelListener::new();
    let (width, height) = options.preview_size;
    let recorder = CameraRecorder::new(
        camera.clone(),
        camera,
        queue,
        PreviewTarget::new(PREVIEW_ID, f64::from(width), f64::from(height)),
        Arc::new(listener),
        RecorderOptions {
            face_filter: options.face_filter,
            capture_audio: options.capture_audio,
        },
    );

    tracing::info!(
        duration = %options.duration,
        filter = %options.face_filter,
        width,
        height,
        "starting capture"
    );
    recorder.start();

    let reason = pump_events(&mut presenter, &mut events, &options).await;
    let outcome = recorder.state();
    tracing::debug!(?reason, state = %outcome, "event loop finished");

    if reason == StopReason::Interrupted {
        presenter.warn("Interrupted");
    }
    recorder.stop();
    tokio::task::block_in_place(|| recorder.wait_idle());
    while let Ok(event) = events.try_recv() {
        presenter.event(&event);
    }

    exit_code(&outcome, &presenter)
}

async fn pump_events(
    presenter: &mut Presenter,
    events: &mut UnboundedReceiver<RecorderEvent>,
    options: &CaptureOptions,
) -> StopReason {
    let deadline = tokio::time::sleep(options.duration.as_std());
    tokio::pin!(deadline);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                presenter.event(&event);
                if let RecorderEvent::StateChanged { state } = event {
                    if state.is_terminal() || state.class() == StateClass::Unauthorized {
                        return StopReason::Terminal;
                    }
                }
            }
            _ = &mut deadline => return StopReason::Elapsed,
            _ = &mut interrupt => return StopReason::Interrupted,
        }
    }
}

/// Map the state the session ended in to a process exit code
fn exit_code(outcome: &RecorderState, presenter: &Presenter) -> ExitCode {
    match outcome.class() {
        StateClass::Failed | StateClass::Unauthorized => ExitCode::from(EXIT_ERROR),
        StateClass::Initialized => {
            presenter.warn("Camera access was not granted");
            ExitCode::from(EXIT_ERROR)
        }
        _ => ExitCode::from(EXIT_SUCCESS),
    }
}

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await.map_err(|e| {
        tracing::warn!(error = %e, path = %store.path().display(), "config file rejected");
        e
    })?;

    Ok(AppConfig::defaults().merge(file_config).merge(cli_config))
}
