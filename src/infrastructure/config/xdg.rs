//! TOML config file under the XDG config directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "face-recorder";
const FILE_NAME: &str = "config.toml";

/// Config store backed by `$XDG_CONFIG_HOME/face-recorder/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        Self {
            path: base.join(APP_DIR).join(FILE_NAME),
        }
    }

    /// Store at an explicit location
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse file contents, rejecting unknown keys and invalid values
    fn decode(content: &str) -> Result<AppConfig, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(key) = table.keys().find(|k| !AppConfig::KEYS.contains(&k.as_str())) {
            return Err(ConfigError::ValidationError {
                key: key.clone(),
                message: format!("Unknown key. Valid keys: {}", AppConfig::KEYS.join(", ")),
            });
        }

        let config: AppConfig = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn encode(config: &AppConfig) -> Result<String, ConfigError> {
        config.validate()?;
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using empty config");
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;
        let config = Self::decode(&content)?;
        tracing::debug!(path = %self.path.display(), ?config, "config loaded");
        Ok(config)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = Self::encode(config)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let staging = self.staging_path();
        fs::write(&staging, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }
        self.save(&AppConfig::defaults()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with("face-recorder/config.toml"));
    }

    #[test]
    fn decode_partial_file() {
        let config = XdgConfigStore::decode(
            r#"
fps = 30
face_filter = "intersect"
"#,
        )
        .unwrap();
        assert_eq!(config.fps, Some(30));
        assert_eq!(config.face_filter.as_deref(), Some("intersect"));
        assert!(config.duration.is_none());
    }

    #[test]
    fn decode_rejects_wrong_types() {
        let err = XdgConfigStore::decode("fps = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn decode_rejects_unknown_keys() {
        let err = XdgConfigStore::decode("fps = 30\nframerate = 60\n").unwrap_err();
        match err {
            ConfigError::ValidationError { key, message } => {
                assert_eq!(key, "framerate");
                assert!(message.contains("fps"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_out_of_range_values() {
        for content in ["fps = 5000", "face_filter = \"overlap\"", "duration = \"later\""] {
            let err = XdgConfigStore::decode(content).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError { .. }), "{content}");
        }
    }

    #[test]
    fn encode_refuses_invalid_config() {
        let config = AppConfig {
            fps: Some(0),
            ..Default::default()
        };
        assert!(XdgConfigStore::encode(&config).is_err());
    }

    #[test]
    fn staging_file_sits_next_to_config() {
        let store = XdgConfigStore::with_path("/tmp/fr/config.toml");
        assert_eq!(store.staging_path(), PathBuf::from("/tmp/fr/config.toml.tmp"));
    }

    #[test]
    fn encoded_defaults_decode_back() {
        let text = XdgConfigStore::encode(&AppConfig::defaults()).unwrap();
        assert_eq!(XdgConfigStore::decode(&text).unwrap(), AppConfig::defaults());
    }
}
