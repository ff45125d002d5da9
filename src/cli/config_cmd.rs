//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{check_fps, AppConfig};
use crate::domain::error::ConfigError;
use crate::domain::{Duration, FaceFilter};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!(
                "Config file created at: {}",
                store.path().display()
            ));
            Ok(())
        }
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => {
            check_key(&key)?;
            let config = store.load().await?;
            presenter.output(get_value(&config, &key).as_deref().unwrap_or(NOT_SET));
            Ok(())
        }
        ConfigAction::List => {
            let config = store.load().await?;
            for key in VALID_CONFIG_KEYS {
                presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
            }
            Ok(())
        }
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Current value of `key` as text
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "preview_width" => config.preview_width.map(|v| v.to_string()),
        "preview_height" => config.preview_height.map(|v| v.to_string()),
        "face_filter" => config.face_filter.clone(),
        "fps" => config.fps.map(|v| v.to_string()),
        "faces" => config.faces.map(|v| v.to_string()),
        "duration" => config.duration.clone(),
        "capture_audio" => config.capture_audio.map(|v| v.to_string()),
        _ => None,
    }
}

/// Validate `value` for `key` and store it
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "preview_width" => config.preview_width = Some(parse_positive(key, value)?),
        "preview_height" => config.preview_height = Some(parse_positive(key, value)?),
        "fps" => {
            let fps = parse_positive(key, value)?;
            config.fps = Some(check_fps(fps).map_err(|message| invalid(key, message))?);
        }
        "faces" => {
            let faces = value
                .parse::<usize>()
                .map_err(|_| invalid(key, "Value must be a whole number"))?;
            config.faces = Some(faces);
        }
        "face_filter" => {
            let filter = value
                .parse::<FaceFilter>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.face_filter = Some(filter.to_string());
        }
        "duration" => {
            let duration = value
                .parse::<Duration>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.duration = Some(duration.to_string());
        }
        "capture_audio" => {
            config.capture_audio = Some(
                parse_bool(value).ok_or_else(|| invalid(key, "Value must be 'true' or 'false'"))?,
            )
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, "Value must be a positive whole number")),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
