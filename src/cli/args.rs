//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::{AppConfig, MAX_FPS};
use crate::domain::{AuthorizationStatus, Duration, FaceFilter};
use crate::infrastructure::SimulatedCameraConfig;

/// face-recorder - front camera face tracking session
#[derive(Parser, Debug)]
#[command(name = "face-recorder")]
#[command(version)]
#[command(about = "Run a camera capture session and stream detected face bounds")]
#[command(long_about = None)]
pub struct Cli {
    /// How long to record before stopping (e.g. 10s, 1m, 1s500ms)
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<String>,

    /// Geometric test faces must pass against the preview
    #[arg(short = 'f', long, value_name = "POLICY")]
    pub filter: Option<FilterArg>,

    /// Faces per simulated frame
    #[arg(long, value_name = "N")]
    pub faces: Option<usize>,

    /// Simulated frame rate (1-240)
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FPS))
    )]
    pub fps: Option<u32>,

    /// Preview width in points
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Preview height in points
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Also bind the default microphone
    #[arg(short = 'a', long)]
    pub audio: bool,

    /// Print every recorder event as a JSON line on stdout
    #[arg(long)]
    pub json: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Switches for the simulated camera
#[derive(clap::Args, Debug, Default, Clone)]
pub struct SimulationArgs {
    /// Camera permission reported before any prompt
    #[arg(long, value_name = "STATUS", default_value = "granted")]
    pub authorization: AuthorizationArg,

    /// Decline the access prompt
    #[arg(long)]
    pub deny_request: bool,

    /// Pretend there is no front camera
    #[arg(long)]
    pub no_camera: bool,

    /// Front camera exists but cannot be opened
    #[arg(long)]
    pub broken_camera: bool,

    /// Session rejects inputs
    #[arg(long)]
    pub reject_input: bool,

    /// Session rejects the metadata output
    #[arg(long)]
    pub reject_output: bool,

    /// Metadata output cannot report faces
    #[arg(long)]
    pub no_face_support: bool,

    /// Pretend there is no microphone
    #[arg(long)]
    pub no_microphone: bool,
}

impl SimulationArgs {
    /// Camera behaviour; the feed is filled in from the merged config
    pub fn camera_config(&self) -> SimulatedCameraConfig {
        SimulatedCameraConfig {
            authorization: self.authorization.into(),
            grant_on_request: !self.deny_request,
            has_front_camera: !self.no_camera,
            camera_opens: !self.broken_camera,
            accepts_input: !self.reject_input,
            accepts_output: !self.reject_output,
            supports_faces: !self.no_face_support,
            has_microphone: !self.no_microphone,
            feed: None,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AuthorizationArg {
    #[default]
    Granted,
    Denied,
    Restricted,
    NotDetermined,
}

impl From<AuthorizationArg> for AuthorizationStatus {
    fn from(arg: AuthorizationArg) -> Self {
        match arg {
            AuthorizationArg::Granted => AuthorizationStatus::Granted,
            AuthorizationArg::Denied => AuthorizationStatus::Denied,
            AuthorizationArg::Restricted => AuthorizationStatus::Restricted,
            AuthorizationArg::NotDetermined => AuthorizationStatus::NotDetermined,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    Contain,
    Intersect,
}

impl From<FilterArg> for FaceFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Contain => FaceFilter::Contain,
            FilterArg::Intersect => FaceFilter::Intersect,
        }
    }
}

/// Fully resolved options for one capture run
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub camera: SimulatedCameraConfig,
    pub preview_size: (u32, u32),
    pub face_filter: FaceFilter,
    pub capture_audio: bool,
    pub duration: Duration,
    pub json: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &AppConfig::KEYS;

pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
