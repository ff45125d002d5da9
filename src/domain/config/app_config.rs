//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::duration::Duration;
use crate::domain::error::{ConfigError, DurationParseError};
use crate::domain::metadata::FaceFilter;

pub const DEFAULT_PREVIEW_WIDTH: u32 = 640;
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 480;
pub const DEFAULT_FPS: u32 = 15;
pub const DEFAULT_FACES: usize = 1;
/// Highest frame rate the synthetic feed will run at
pub const MAX_FPS: u32 = 240;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub preview_width: Option<u32>,
    pub preview_height: Option<u32>,
    pub face_filter: Option<String>,
    pub fps: Option<u32>,
    pub faces: Option<usize>,
    pub duration: Option<String>,
    pub capture_audio: Option<bool>,
}

impl AppConfig {
    /// Keys accepted in the config file and by `config set`
    pub const KEYS: [&'static str; 7] = [
        "preview_width",
        "preview_height",
        "face_filter",
        "fps",
        "faces",
        "duration",
        "capture_audio",
    ];

    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            preview_width: Some(DEFAULT_PREVIEW_WIDTH),
            preview_height: Some(DEFAULT_PREVIEW_HEIGHT),
            face_filter: Some(FaceFilter::default().to_string()),
            fps: Some(DEFAULT_FPS),
            faces: Some(DEFAULT_FACES),
            duration: Some(Duration::default_duration().to_string()),
            capture_audio: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            preview_width: other.preview_width.or(self.preview_width),
            preview_height: other.preview_height.or(self.preview_height),
            face_filter: other.face_filter.or(self.face_filter),
            fps: other.fps.or(self.fps),
            faces: other.faces.or(self.faces),
            duration: other.duration.or(self.duration),
            capture_audio: other.capture_audio.or(self.capture_audio),
        }
    }

    /// Preview size, falling back to defaults for missing or zero values
    pub fn preview_size_or_default(&self) -> (u32, u32) {
        let width = self
            .preview_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_PREVIEW_WIDTH);
        let height = self
            .preview_height
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_PREVIEW_HEIGHT);
        (width, height)
    }

    pub fn face_filter_or_default(&self) -> FaceFilter {
        self.face_filter
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn fps_or_default(&self) -> u32 {
        self.fps
            .filter(|f| *f > 0)
            .unwrap_or(DEFAULT_FPS)
            .min(MAX_FPS)
    }

    pub fn faces_or_default(&self) -> usize {
        self.faces.unwrap_or(DEFAULT_FACES)
    }

    /// Session length; the default when unset, an error when unparsable
    pub fn duration(&self) -> Result<Duration, DurationParseError> {
        match self.duration.as_deref() {
            Some(text) => text.parse(),
            None => Ok(Duration::default_duration()),
        }
    }

    pub fn capture_audio_or_default(&self) -> bool {
        self.capture_audio.unwrap_or(false)
    }

    /// Check every value that is set. Reports the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::ValidationError {
            key: key.to_string(),
            message,
        };

        if self.preview_width == Some(0) {
            return Err(invalid("preview_width", "Value must be positive".into()));
        }
        if self.preview_height == Some(0) {
            return Err(invalid("preview_height", "Value must be positive".into()));
        }
        if let Some(fps) = self.fps {
            check_fps(fps).map_err(|message| invalid("fps", message))?;
        }
        if let Some(filter) = &self.face_filter {
            filter
                .parse::<FaceFilter>()
                .map_err(|e| invalid("face_filter", e.to_string()))?;
        }
        self.duration()
            .map_err(|e| invalid("duration", e.to_string()))?;
        Ok(())
    }
}

/// Frame rate bounds shared by the CLI and the config file
pub fn check_fps(fps: u32) -> Result<u32, String> {
    if (1..=MAX_FPS).contains(&fps) {
        Ok(fps)
    } else {
        Err(format!("Value must be between 1 and {}", MAX_FPS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.preview_size_or_default(), (640, 480));
        assert_eq!(config.face_filter, Some("contain".to_string()));
        assert_eq!(config.fps, Some(15));
        assert_eq!(config.faces, Some(1));
        assert_eq!(config.duration, Some("10s".to_string()));
        assert_eq!(config.capture_audio, Some(false));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.preview_width.is_none());
        assert!(config.face_filter.is_none());
        assert!(config.duration.is_none());
        assert!(config.capture_audio.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            fps: Some(30),
            face_filter: Some("contain".to_string()),
            faces: Some(2),
            ..Default::default()
        };
        let other = AppConfig {
            fps: None,
            face_filter: Some("intersect".to_string()),
            faces: Some(0),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.fps, Some(30));
        assert_eq!(merged.face_filter_or_default(), FaceFilter::Intersect);
        assert_eq!(merged.faces, Some(0));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = AppConfig {
            preview_width: Some(0),
            face_filter: Some("overlap".to_string()),
            fps: Some(0),
            duration: Some("forever".to_string()),
            ..Default::default()
        };
        assert_eq!(config.preview_size_or_default(), (640, 480));
        assert_eq!(config.face_filter_or_default(), FaceFilter::Contain);
        assert_eq!(config.fps_or_default(), 15);
    }

    #[test]
    fn fps_is_capped() {
        let config = AppConfig {
            fps: Some(5000),
            ..Default::default()
        };
        assert_eq!(config.fps_or_default(), MAX_FPS);
        assert!(check_fps(MAX_FPS).is_ok());
        assert!(check_fps(MAX_FPS + 1).is_err());
        assert!(check_fps(0).is_err());
    }

    #[test]
    fn duration_parses_or_reports() {
        let mut config = AppConfig {
            duration: Some("1m".to_string()),
            ..Default::default()
        };
        assert_eq!(config.duration().unwrap().as_secs(), 60);

        config.duration = None;
        assert_eq!(config.duration().unwrap().as_secs(), 10);

        config.duration = Some("forever".to_string());
        assert_eq!(config.duration().unwrap_err().input, "forever");
    }

    #[test]
    fn defaults_validate() {
        assert!(AppConfig::defaults().validate().is_ok());
        assert!(AppConfig::empty().validate().is_ok());
    }

    #[test]
    fn validate_names_the_bad_key() {
        let cases = [
            AppConfig { fps: Some(1000), ..Default::default() },
            AppConfig { preview_height: Some(0), ..Default::default() },
            AppConfig { face_filter: Some("overlap".into()), ..Default::default() },
            AppConfig { duration: Some("later".into()), ..Default::default() },
        ];
        let keys = ["fps", "preview_height", "face_filter", "duration"];

        for (config, expected) in cases.iter().zip(keys) {
            match config.validate() {
                Err(ConfigError::ValidationError { key, .. }) => assert_eq!(key, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
        }
    }
}
