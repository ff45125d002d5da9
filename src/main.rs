//! face-recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use face_recorder::cli::{
    app::{load_merged_config, run_capture, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{CaptureOptions, Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use face_recorder::domain::config::AppConfig;
use face_recorder::domain::error::ConfigError;
use face_recorder::domain::FaceFilter;
use face_recorder::infrastructure::{FeedConfig, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // flags only override when given
    let cli_config = AppConfig {
        preview_width: cli.width,
        preview_height: cli.height,
        face_filter: cli.filter.map(|f| FaceFilter::from(f).to_string()),
        fps: cli.fps,
        faces: cli.faces,
        duration: cli.duration.clone(),
        capture_audio: cli.audio.then_some(true),
    };
    let config = match load_merged_config(&XdgConfigStore::new(), cli_config).await {
        Ok(config) => config,
        Err(e @ ConfigError::ReadError(_)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let duration = match config.duration() {
        Ok(duration) => duration,
        Err(e) => {
            presenter.error(&format!("Invalid duration: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let mut camera = cli.simulation.camera_config();
    camera.feed = Some(FeedConfig {
        fps: config.fps_or_default(),
        faces: config.faces_or_default(),
    });

    let options = CaptureOptions {
        camera,
        preview_size: config.preview_size_or_default(),
        face_filter: config.face_filter_or_default(),
        capture_audio: config.capture_audio_or_default(),
        duration,
        json: cli.json,
    };

    run_capture(options).await
}
